pub mod command;
pub mod controller;
pub mod registry;

pub use command::{assemble, parse_wire, Command, CommandArgs, CommandCode, WireCommand, FILLER};
pub use controller::{ConnectionReport, DeviceController, PumpState, QueryReply, SwitchState, ValveState};
pub use registry::{ChannelSide, DeviceClass, DeviceIndexRegistry, InputLine};

//! Host-side control of a pneumatic rig (valves, pressure sensors, pumps)
//! driven by a microcontroller over a line-oriented serial link.

pub mod config;
pub mod error;
pub mod rig;
pub mod util;

#[cfg(test)]
mod tests;

pub use config::RigConfig;
pub use error::{PneumaticError, Result};
pub use rig::{DeviceController, DeviceIndexRegistry};
pub use util::io::{open_serial, SerialSession, TransportSession};

/// Open the configured serial port and build a controller over it.
pub fn connect(config: &RigConfig) -> Result<DeviceController<tokio_serial::SerialStream>> {
    let session = open_serial(&config.serial)?;
    let registry = DeviceIndexRegistry::build(config.output_channels);
    Ok(DeviceController::new(session, registry))
}

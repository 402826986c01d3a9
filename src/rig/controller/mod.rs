mod new;
mod close;
mod set_single_valve;
mod set_valve_group;
mod get_valve_state;
mod get_pressure;
mod get_pump_pressures;
mod set_pump_setpoint;
mod get_pump_setpoint;
mod set_pump_state;
mod get_pump_state;
mod send_raw;
mod switch_input_channel;
mod test_connection;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::watch;

use crate::error::Result;
use crate::rig::{
    command::{Command, CommandArgs, CommandCode},
    registry::DeviceIndexRegistry,
};
use crate::util::io::TransportSession;

pub use switch_input_channel::SwitchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValveState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PumpState {
    Off,
    On,
}

impl ValveState {
    pub fn as_value(&self) -> i32 {
        match self {
            ValveState::Closed => 0,
            ValveState::Open => 1,
        }
    }
}

impl PumpState {
    pub fn as_value(&self) -> i32 {
        match self {
            PumpState::Off => 0,
            PumpState::On => 1,
        }
    }
}

impl From<bool> for ValveState {
    fn from(open: bool) -> Self {
        if open { ValveState::Open } else { ValveState::Closed }
    }
}

impl From<bool> for PumpState {
    fn from(on: bool) -> Self {
        if on { PumpState::On } else { PumpState::Off }
    }
}

/// Outcome of a query: whether the command was echoed, and the line the rig
/// printed after the echo (empty if nothing arrived before the timeout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReply {
    pub acked: bool,
    pub reply: String,
}

impl QueryReply {
    pub fn value<T: FromStr>(&self) -> Option<T> {
        self.reply.parse().ok()
    }

    /// Reply read as a 0/1 state
    pub fn state(&self) -> Option<bool> {
        self.value::<i32>().map(|v| v != 0)
    }
}

/// Result of [`DeviceController::test_connection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub echoed: bool,
    pub returned: String,
}

/// Per-device operations on the rig over one owned session
pub struct DeviceController<S> {
    session: TransportSession<S>,
    registry: DeviceIndexRegistry,
    switch_state: watch::Sender<SwitchState>,
}

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn registry(&self) -> &DeviceIndexRegistry {
        &self.registry
    }

    pub fn session(&self) -> &TransportSession<S> {
        &self.session
    }

    async fn send_command(&mut self, code: CommandCode, args: CommandArgs) -> Result<bool> {
        let wire = Command::new(code, args).wire();
        self.session.send(&wire).await
    }

    async fn query(&mut self, code: CommandCode, args: CommandArgs) -> Result<QueryReply> {
        let acked = self.send_command(code, args).await?;
        let reply = self.session.receive().await?;
        Ok(QueryReply { acked, reply })
    }
}

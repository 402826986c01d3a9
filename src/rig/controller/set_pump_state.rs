use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::log_debug;
use crate::rig::command::{CommandArgs, CommandCode};

use super::{DeviceController, PumpState};

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `PS` - switch a pump on or off
    pub async fn set_pump_state(&mut self, name: &str, state: PumpState) -> Result<bool> {
        let id = self.registry.pump_id(name)?;

        log_debug!("Setting pump {} ({}) to {:?}", name, id, state);
        self.send_command(CommandCode::SetPumpState, CommandArgs::WithBoth { id, value: state.as_value() })
            .await
    }
}

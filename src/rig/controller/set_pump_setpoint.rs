use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::log_debug;
use crate::rig::command::{CommandArgs, CommandCode};

use super::DeviceController;

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `RS` - reference pressure the pump regulates towards
    pub async fn set_pump_setpoint(&mut self, name: &str, setpoint: i32) -> Result<bool> {
        let id = self.registry.pump_id(name)?;

        log_debug!("Setting pump {} setpoint to {}", name, setpoint);
        self.send_command(CommandCode::SetRefSetpoint, CommandArgs::WithBoth { id, value: setpoint })
            .await
    }
}

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::log_debug;
use crate::rig::{
    command::{CommandArgs, CommandCode},
    registry::ChannelSide,
};

use super::{DeviceController, ValveState};

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `SI`/`SO` - open or close one valve. Returns the echo ack.
    pub async fn set_single_valve(&mut self, name: &str, state: ValveState) -> Result<bool> {
        let code = CommandCode::sided(
            ChannelSide::classify(name),
            CommandCode::SetSingleInValve,
            CommandCode::SetSingleOutValve,
        );
        let id = self.registry.valve_id(name)?;

        log_debug!("Setting valve {} ({}) to {:?}", name, id, state);
        self.send_command(code, CommandArgs::WithBoth { id, value: state.as_value() }).await
    }
}

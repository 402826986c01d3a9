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
    /// `AI`/`AO` - every valve on one side at once
    pub async fn set_valve_group(&mut self, side: ChannelSide, state: ValveState) -> Result<bool> {
        let code = CommandCode::sided(side, CommandCode::SetAllInValves, CommandCode::SetAllOutValves);

        log_debug!("Setting all {:?} valves to {:?}", side, state);
        self.send_command(code, CommandArgs::WithValue(state.as_value())).await
    }
}

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::rig::{
    command::{CommandArgs, CommandCode},
    registry::ChannelSide,
};

use super::{DeviceController, QueryReply};

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `VI`/`VO`. The reply line is handed back raw; see [`QueryReply::state`].
    pub async fn get_valve_state(&mut self, name: &str) -> Result<QueryReply> {
        let code = CommandCode::sided(
            ChannelSide::classify(name),
            CommandCode::GetInValveState,
            CommandCode::GetOutValveState,
        );
        let id = self.registry.valve_id(name)?;

        self.query(code, CommandArgs::WithId(id)).await
    }
}

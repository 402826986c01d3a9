use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::rig::command::{CommandArgs, CommandCode};

use super::{DeviceController, QueryReply};

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub async fn get_pump_state(&mut self, name: &str) -> Result<QueryReply> {
        let id = self.registry.pump_id(name)?;
        self.query(CommandCode::GetPumpState, CommandArgs::WithId(id)).await
    }
}

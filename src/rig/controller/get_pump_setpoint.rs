use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::rig::command::{CommandArgs, CommandCode};

use super::{DeviceController, QueryReply};

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `RG`
    pub async fn get_pump_setpoint(&mut self, name: &str) -> Result<QueryReply> {
        let id = self.registry.pump_id(name)?;
        self.query(CommandCode::GetRefSetpoint, CommandArgs::WithId(id)).await
    }
}

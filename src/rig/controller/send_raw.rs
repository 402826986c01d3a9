use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::log_info;
use crate::rig::command::{assemble, CommandArgs};

use super::{DeviceController, QueryReply};

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Send an arbitrary code with no registry lookup, then read one more line.
    pub async fn send_raw(&mut self, code: &str, args: CommandArgs) -> Result<QueryReply> {
        let wire = assemble(code, args);
        log_info!("Sending raw command {}", wire);

        let acked = self.session.send(&wire).await?;
        let reply = self.session.receive().await?;
        Ok(QueryReply { acked, reply })
    }
}

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::log_debug;
use crate::rig::{
    command::{CommandArgs, CommandCode},
    registry::ChannelSide,
};

use super::DeviceController;

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `GI`/`GO` - the pressure line printed by the rig, as text.
    ///
    /// The reading is returned even if the echo did not match; an empty
    /// string means nothing arrived in time.
    pub async fn get_pressure(&mut self, name: &str) -> Result<String> {
        let code = CommandCode::sided(
            ChannelSide::classify(name),
            CommandCode::GetInPressure,
            CommandCode::GetOutPressure,
        );
        let id = self.registry.sensor_id(name)?;

        let reply = self.query(code, CommandArgs::WithId(id)).await?;
        log_debug!("Pressure {}: '{}'", name, reply.reply);
        Ok(reply.reply)
    }
}

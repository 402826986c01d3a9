use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::{log_info, log_warn};

use super::{ConnectionReport, DeviceController};

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Link check for manual use: send `test_string`, note whether it was
    /// echoed, then report whatever the rig sends next. Never fails on a bad
    /// echo.
    pub async fn test_connection(&mut self, test_string: &str) -> Result<ConnectionReport> {
        let echoed = self.session.send(test_string).await?;
        if !echoed {
            log_warn!("Sending data to the rig over serial appears to be broken");
        }

        let returned = self.session.receive().await?;
        log_info!("When '{}' was sent, the rig returned '{}'", test_string, returned);

        Ok(ConnectionReport { echoed, returned })
    }
}

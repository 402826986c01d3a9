use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;

use super::DeviceController;

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub async fn close(&mut self) -> Result<()> {
        self.session.close().await
    }
}

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::log_info;
use crate::rig::registry::InputLine;

use super::DeviceController;

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `[negative, positive]` pump-line pressures
    pub async fn get_pump_pressures(&mut self) -> Result<[String; 2]> {
        let negative = self.get_pressure(InputLine::Negative.as_str()).await?;
        let positive = self.get_pressure(InputLine::Positive.as_str()).await?;

        log_info!("Pump pressures: negative={} positive={}", negative, positive);
        Ok([negative, positive])
    }
}

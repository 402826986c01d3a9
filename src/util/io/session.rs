// src/util/io/session.rs
//! Transport Session - owns the line-oriented link to the rig's microcontroller.
//!
//! Lines from the rig end in `\r`; lines to the rig end in `\n`. Every
//! command is acknowledged by the rig echoing it back verbatim.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use crate::config::SerialConfig;
use crate::error::{PneumaticError, Result};
use crate::{log_debug, log_info, log_warn};

/// Inbound line terminator
pub const TERMINATOR: u8 = b'\r';

pub type SerialSession = TransportSession<SerialStream>;

/// Open the configured serial device and wrap it in a session.
pub fn open_serial(config: &SerialConfig) -> Result<SerialSession> {
    log_info!("Opening serial port {} at {} baud", config.device, config.baud);

    let port = tokio_serial::new(&config.device, config.baud)
        .timeout(config.read_timeout())
        .open_native_async()?;

    Ok(TransportSession::new(port, config.read_timeout()))
}

pub struct TransportSession<S> {
    stream: Option<BufReader<S>>,
    read_timeout: Duration,
}

impl<S> TransportSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, read_timeout: Duration) -> Self {
        Self {
            stream: Some(BufReader::new(stream)),
            read_timeout,
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    fn stream(&mut self) -> Result<&mut BufReader<S>> {
        self.stream.as_mut().ok_or(PneumaticError::SessionClosed)
    }

    /// Read one `\r`-terminated line, trimmed.
    ///
    /// A timeout is not an error: whatever arrived before the deadline is
    /// returned, possibly empty. Callers decide whether that is a failed
    /// exchange.
    pub async fn receive(&mut self) -> Result<String> {
        let read_timeout = self.read_timeout;
        let stream = self.stream()?;

        let mut line = Vec::new();
        let outcome = tokio::time::timeout(read_timeout, stream.read_until(TERMINATOR, &mut line)).await;

        match outcome {
            Ok(Ok(0)) => log_warn!("Link closed by the rig while waiting for a reply"),
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => log_warn!(
                "Read timed out after {:?} with {} byte(s) buffered",
                read_timeout,
                line.len()
            ),
        }

        let text = String::from_utf8_lossy(&line).trim().to_string();
        log_debug!("<- {}", text);
        Ok(text)
    }

    /// Write `text` followed by a newline, without waiting for a reply.
    pub async fn write_line(&mut self, text: &str) -> Result<()> {
        let stream = self.stream()?;

        log_debug!("-> {}", text);
        let line = format!("{}\n", text);
        stream.write_all(line.as_bytes()).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Write `text` and check that the rig echoes it back unchanged.
    ///
    /// `Ok(false)` means the echo did not match (or never came).
    pub async fn send(&mut self, text: &str) -> Result<bool> {
        self.write_line(text).await?;
        let echo = self.receive().await?;

        let acked = echo == text;
        if !acked {
            log_warn!("Ack mismatch: sent '{}', rig returned '{}'", text, echo);
        }
        Ok(acked)
    }

    /// Release the link. Closing twice is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.shutdown().await?;
            log_info!("Transport session closed");
        }
        Ok(())
    }
}

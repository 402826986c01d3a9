use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::watch;

use crate::log_info;
use crate::rig::registry::DeviceIndexRegistry;
use crate::util::io::TransportSession;

use super::{DeviceController, SwitchState};

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(session: TransportSession<S>, registry: DeviceIndexRegistry) -> Self {
        let (switch_state, _) = watch::channel(SwitchState::Idle);

        log_info!(
            "Device controller ready with {} output channel(s)",
            registry.output_channels()
        );

        Self {
            session,
            registry,
            switch_state,
        }
    }
}

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::{PneumaticError, Result};
use crate::rig::registry::{ChannelSide, InputLine};
use crate::{log_error, log_info, log_warn};

use super::{DeviceController, ValveState};

/// Progress of an input channel switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchState {
    Idle,
    AllInputsClosing,
    NeutralOpen { delay: Duration },
    NeutralClosing,
    TargetOpen(InputLine),
}

impl<S> DeviceController<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn subscribe_switch_state(&self) -> watch::Receiver<SwitchState> {
        self.switch_state.subscribe()
    }

    pub fn switch_state(&self) -> SwitchState {
        self.switch_state.borrow().clone()
    }

    fn enter(&self, state: SwitchState) {
        log_info!("Input switch: {:?}", state);
        self.switch_state.send_replace(state);
    }

    /// Connect `target` (NEG or POS) as the active input line.
    ///
    /// Closes every input valve, vents through Neutral for `delay`, closes
    /// Neutral and only then opens `target`. Returns whether every step was
    /// echoed. An invalid target is reported after the vent, with all input
    /// valves closed.
    pub async fn switch_input_channel(&mut self, target: &str, delay: Duration) -> Result<bool> {
        self.switch_input_channel_with_cancel(target, delay, &CancellationToken::new())
            .await
    }

    /// As [`switch_input_channel`](Self::switch_input_channel), but `cancel`
    /// may cut the Neutral vent short. Neutral is still closed before
    /// returning [`PneumaticError::SwitchCancelled`].
    pub async fn switch_input_channel_with_cancel(
        &mut self,
        target: &str,
        delay: Duration,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let result = self.run_switch(target, delay, cancel).await;
        self.enter(SwitchState::Idle);
        result
    }

    async fn run_switch(&mut self, target: &str, delay: Duration, cancel: &CancellationToken) -> Result<bool> {
        let neutral = InputLine::Neutral.as_str();

        self.enter(SwitchState::AllInputsClosing);
        let mut acked = self.set_valve_group(ChannelSide::Input, ValveState::Closed).await?;
        acked &= self.set_single_valve(neutral, ValveState::Open).await?;

        self.enter(SwitchState::NeutralOpen { delay });
        let cancelled = tokio::select! {
            _ = tokio::time::sleep(delay) => false,
            _ = cancel.cancelled() => true,
        };

        self.enter(SwitchState::NeutralClosing);
        acked &= self.set_single_valve(neutral, ValveState::Closed).await?;

        if cancelled {
            log_warn!("Input switch to {} cancelled; all input valves left closed", target);
            return Err(PneumaticError::SwitchCancelled);
        }

        let line = match InputLine::from_name(target) {
            Some(line) if line != InputLine::Neutral => line,
            _ => {
                log_error!("Input channel switch called on non-input valve '{}'", target);
                return Err(PneumaticError::InvalidTarget(target.to_string()));
            }
        };

        self.enter(SwitchState::TargetOpen(line));
        acked &= self.set_single_valve(line.as_str(), ValveState::Open).await?;

        if !acked {
            log_warn!("Input switch to {} finished with unacknowledged steps", line);
        }
        Ok(acked)
    }
}

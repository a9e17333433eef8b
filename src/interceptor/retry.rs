//! Re-installing a tap that could not be created.
//!
//! Tap creation fails until the process is trusted for accessibility.
//! The dispatcher asks on every tick; attempts are spaced by an interval
//! and only the first failure of a streak is logged.

use std::time::{Duration, Instant};

use tracing::{info, trace, warn};

use super::{EventTapHost, Interceptor};
use crate::error::TapError;
use crate::model::TriggerSettings;

#[derive(Debug)]
pub struct ArmRetry {
    interval: Duration,
    last_attempt: Option<Instant>,
    failure_logged: bool,
}

impl ArmRetry {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_attempt: None,
            failure_logged: false,
        }
    }

    /// Whether an attempt is allowed at `now`. Claims the slot if so.
    pub fn is_due(&mut self, now: Instant) -> bool {
        if self
            .last_attempt
            .is_some_and(|last| now.saturating_duration_since(last) < self.interval)
        {
            return false;
        }
        self.last_attempt = Some(now);
        true
    }

    fn record(&mut self, result: &Result<(), TapError>) {
        match result {
            Ok(()) => {
                info!("event tap installed on retry");
                self.failure_logged = false;
            }
            Err(err) if !self.failure_logged => {
                warn!(%err, "event tap retry failed, will keep trying");
                self.failure_logged = true;
            }
            Err(err) => trace!(%err, "event tap retry failed"),
        }
    }
}

impl<H: EventTapHost> Interceptor<H> {
    /// Arm if no tap is live, the process is trusted and `retry` allows
    /// an attempt at `now`. Returns whether a tap was installed.
    pub fn arm_if_due(
        &mut self,
        settings: &TriggerSettings,
        trusted: bool,
        retry: &mut ArmRetry,
        now: Instant,
    ) -> bool {
        if self.is_armed() || !trusted || !retry.is_due(now) {
            return false;
        }
        let result = self.arm(settings);
        retry.record(&result);
        result.is_ok()
    }
}

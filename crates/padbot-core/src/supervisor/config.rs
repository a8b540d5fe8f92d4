use std::time::Duration;

use serde::Deserialize;

/// Poll loop policy for [`ActionSupervisor`](super::ActionSupervisor).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Overall deadline for one action.
    pub timeout_ms: u64,
    /// Pause between polls while the action is running.
    pub poll_interval_ms: u64,
    /// Pause after a transient poll failure.
    pub retry_backoff_ms: u64,
    /// Consecutive transient poll failures tolerated before giving up.
    pub max_consecutive_retries: u32,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5 * 60 * 1_000,
            poll_interval_ms: 500,
            retry_backoff_ms: 1_000,
            max_consecutive_retries: 3,
        }
    }
}

impl SupervisorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("supervisor.timeout_ms must be non-zero".into());
        }
        if self.poll_interval_ms == 0 {
            return Err("supervisor.poll_interval_ms must be non-zero".into());
        }
        Ok(())
    }
}

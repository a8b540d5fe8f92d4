use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Execution state of a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    /// Accepted, waiting for a worker permit.
    Pending,
    /// A worker is executing it.
    Running,
    Succeeded,
    /// Finished, but some best-effort part did not.
    Partial,
    Failed,
    /// Action supervision hit its deadline.
    TimedOut,
    /// Stopped locally before reaching a robot-side terminal state.
    Cancelled,
}

impl OperationStatus {
    /// Returns `true` if the operation won't transition further.
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns `true` if the operation is pending or running.
    pub fn is_active(&self) -> bool {
        matches!(self, OperationStatus::Pending | OperationStatus::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Pending => "pending",
            OperationStatus::Running => "running",
            OperationStatus::Succeeded => "succeeded",
            OperationStatus::Partial => "partial",
            OperationStatus::Failed => "failed",
            OperationStatus::TimedOut => "timedOut",
            OperationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OperationStatus::Pending),
            "running" => Ok(OperationStatus::Running),
            "succeeded" => Ok(OperationStatus::Succeeded),
            "partial" => Ok(OperationStatus::Partial),
            "failed" => Ok(OperationStatus::Failed),
            "timedout" | "timed_out" => Ok(OperationStatus::TimedOut),
            "cancelled" | "canceled" => Ok(OperationStatus::Cancelled),
            _ => Err(format!(
                "invalid status: '{s}' (valid: pending, running, succeeded, partial, failed, timedOut, cancelled)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(OperationStatus::Succeeded.is_terminal());
        assert!(OperationStatus::Partial.is_terminal());
        assert!(OperationStatus::Failed.is_terminal());
        assert!(OperationStatus::TimedOut.is_terminal());
        assert!(OperationStatus::Cancelled.is_terminal());

        assert!(!OperationStatus::Pending.is_terminal());
        assert!(!OperationStatus::Running.is_terminal());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("TimedOut".parse::<OperationStatus>(), Ok(OperationStatus::TimedOut));
        assert_eq!("canceled".parse::<OperationStatus>(), Ok(OperationStatus::Cancelled));
        assert!("bogus".parse::<OperationStatus>().is_err());
    }

    #[test]
    fn wire_name_matches_as_str() {
        let json = serde_json::to_string(&OperationStatus::TimedOut).unwrap();
        assert_eq!(json, format!("\"{}\"", OperationStatus::TimedOut.as_str()));
    }
}

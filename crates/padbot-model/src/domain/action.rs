use std::fmt;

use serde::{Deserialize, Serialize};

/// Robot-assigned identifier of one in-flight action.
///
/// The robot may report the id as a JSON string or number; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionHandle(String);

impl ActionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ActionHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ActionHandle {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a supervised robot action.
///
/// `Running` is the only non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ActionStatus {
    /// The robot still reports action metadata.
    Running,
    /// The robot no longer reports the action.
    Succeeded,
    /// Supervision gave up: retry budget exhausted or a non-retryable error.
    Failed { reason: String },
    /// No terminal state was observed before the supervision deadline.
    TimedOut,
    /// Supervision was stopped locally (superseded, stopped or shut down).
    Cancelled { reason: String },
}

impl ActionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ActionStatus::Running)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionStatus::Succeeded)
    }
}

/// Motion profile for a navigation action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Plain move-to with final heading.
    #[default]
    Standard,
    /// Precise approach used for product shelves: tighter tolerance and robot-side retries.
    Precise,
}

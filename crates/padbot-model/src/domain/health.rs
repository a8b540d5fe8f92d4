use serde::{Deserialize, Serialize};

/// Result of probing the robot's health endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotHealth {
    /// The control API answered with a 2xx status.
    pub reachable: bool,
    /// The robot reported `hasError` in its health document.
    pub has_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RobotHealth {
    pub fn is_available(&self) -> bool {
        self.reachable && !self.has_error
    }
}

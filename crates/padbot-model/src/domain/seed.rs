use serde::{Deserialize, Serialize};

use crate::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFailure {
    pub name: String,
    pub kind: ErrorKind,
    pub reason: String,
}

/// Per-waypoint outcome of a POI seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Waypoints created on the robot.
    pub created: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<SeedFailure>,
}

impl SeedReport {
    pub fn attempted(&self) -> usize {
        self.created.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when at least one waypoint was attempted and none was created.
    pub fn is_total_failure(&self) -> bool {
        self.created.is_empty() && !self.failed.is_empty()
    }
}

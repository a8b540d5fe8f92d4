use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeederConfig {
    /// Local JSON list of default waypoints.
    pub waypoints_path: PathBuf,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            waypoints_path: PathBuf::from("waypoints.json"),
        }
    }
}

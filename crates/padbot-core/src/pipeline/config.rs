use std::path::PathBuf;

use serde::Deserialize;

use padbot_model::Pose;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fallback home dock as `[x, y, z, yaw, pitch, roll]`.
    pub home_dock: Option<[f64; 6]>,
    /// Distance from the dock at which the robot's pose is placed.
    pub offset_distance_m: f64,
    /// Map binary uploaded when the caller names none.
    pub map_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            home_dock: None,
            offset_distance_m: 0.2,
            map_path: PathBuf::from("map.stcm"),
        }
    }
}

impl PipelineConfig {
    pub fn configured_home_dock(&self) -> Option<Pose> {
        self.home_dock.map(Pose::from_array)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.offset_distance_m.is_finite() {
            return Err("pipeline.offset_distance_m must be finite".into());
        }
        if let Some(dock) = self.home_dock
            && dock.iter().any(|v| !v.is_finite())
        {
            return Err("homedock must contain six finite numbers".into());
        }
        Ok(())
    }
}

use serde::Deserialize;

use crate::error::CoreError;
use crate::pipeline::PipelineConfig;
use crate::seeder::SeederConfig;
use crate::supervisor::SupervisorConfig;

/// Configuration of a [`RobotController`](super::RobotController) and the components it owns.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Worker permits: operations beyond this wait as `Pending`.
    pub max_concurrent_operations: usize,
    /// A new navigate or go-home cancels supervision of the previous one.
    pub supersede_motion: bool,
    /// Finished operation records kept for queries.
    pub max_retained_operations: usize,
    pub supervisor: SupervisorConfig,
    pub pipeline: PipelineConfig,
    pub seeder: SeederConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_operations: 4,
            supersede_motion: true,
            max_retained_operations: 1_000,
            supervisor: SupervisorConfig::default(),
            pipeline: PipelineConfig::default(),
            seeder: SeederConfig::default(),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_concurrent_operations == 0 {
            return Err(CoreError::InvalidConfig(
                "max_concurrent_operations must be non-zero".into(),
            ));
        }
        if self.max_retained_operations == 0 {
            return Err(CoreError::InvalidConfig(
                "max_retained_operations must be non-zero".into(),
            ));
        }
        self.supervisor.validate().map_err(CoreError::InvalidConfig)?;
        self.pipeline.validate().map_err(CoreError::InvalidConfig)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ControllerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_pool() {
        let cfg = ControllerConfig {
            max_concurrent_operations: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_retention() {
        let cfg = ControllerConfig {
            max_retained_operations: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let mut cfg = ControllerConfig::default();
        cfg.supervisor.poll_interval_ms = 0;
        assert!(cfg.validate().is_err());
    }
}

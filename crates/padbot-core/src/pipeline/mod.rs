mod config;
pub use config::PipelineConfig;

mod step;
pub use step::{ProvisioningStep, StepAction};

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use padbot_client::RobotApi;
use padbot_model::{PipelineResult, PipelineStatus, Pose, ProvisionSettings, StepFailure};

use crate::error::CoreError;

/// Caller coordinates closer than this to the origin on both axes count as unset.
pub const UNSET_HOME_DOCK_EPSILON: f64 = 0.001;

/// Pick the home dock for a run.
///
/// Caller coordinates win unless both `x` and `y` are within
/// [`UNSET_HOME_DOCK_EPSILON`] of zero; then the configured dock is used, and
/// without one the origin.
pub fn resolve_home_dock(settings: &ProvisionSettings, configured: Option<Pose>) -> Pose {
    let unset = settings.home_dock_x.abs() < UNSET_HOME_DOCK_EPSILON
        && settings.home_dock_y.abs() < UNSET_HOME_DOCK_EPSILON;
    if !unset {
        return Pose::planar(settings.home_dock_x, settings.home_dock_y, settings.home_dock_yaw);
    }
    match configured {
        Some(dock) => dock,
        None => {
            warn!("no home dock given or configured; using the origin");
            Pose::ORIGIN
        }
    }
}

/// Installs a map and home pose on the robot.
///
/// Steps run strictly one after another: each depends on robot-side state left
/// by the one before (a pose only means something once its map is loaded).
pub struct MapProvisioningPipeline {
    api: Arc<dyn RobotApi>,
    cfg: PipelineConfig,
}

impl MapProvisioningPipeline {
    pub fn new(api: Arc<dyn RobotApi>, cfg: PipelineConfig) -> Self {
        Self { api, cfg }
    }

    pub fn plan(&self, settings: &ProvisionSettings) -> Vec<ProvisioningStep> {
        let home_dock = resolve_home_dock(settings, self.cfg.configured_home_dock());
        let map_path = settings
            .map_path
            .clone()
            .unwrap_or_else(|| self.cfg.map_path.clone());
        ProvisioningStep::plan(home_dock, map_path, self.cfg.offset_distance_m)
    }

    #[instrument(level = "info", skip(self, settings))]
    pub async fn run(&self, settings: &ProvisionSettings) -> PipelineResult {
        self.run_steps(self.plan(settings)).await
    }

    /// Execute `steps` in order and fold their outcomes into one result.
    pub async fn run_steps(&self, steps: Vec<ProvisioningStep>) -> PipelineResult {
        let mut completed = Vec::with_capacity(steps.len());
        let mut failures: Vec<StepFailure> = Vec::new();

        for step in steps {
            debug!(step = step.name, critical = step.critical, "running step");

            match self.execute(&step.action).await {
                Ok(()) => {
                    info!(step = step.name, "step completed");
                    completed.push(step.name.to_string());
                }
                Err(e) if step.critical => {
                    error!(step = step.name, error = %e, "critical step failed; aborting");
                    let message = format!("step '{}' failed: {e}", step.name);
                    failures.push(StepFailure {
                        step: step.name.to_string(),
                        critical: true,
                        kind: e.kind(),
                        reason: e.to_string(),
                    });
                    return PipelineResult {
                        status: PipelineStatus::Failed,
                        message,
                        completed_steps: completed,
                        failures,
                    };
                }
                Err(e) => {
                    warn!(step = step.name, error = %e, "step failed; continuing");
                    failures.push(StepFailure {
                        step: step.name.to_string(),
                        critical: false,
                        kind: e.kind(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let (status, message) = match failures.first() {
            None => (
                PipelineStatus::Success,
                "map processed and uploaded successfully".to_string(),
            ),
            Some(first) => (
                PipelineStatus::Partial,
                format!(
                    "map uploaded, but step '{}' failed: {}",
                    first.step, first.reason
                ),
            ),
        };
        PipelineResult {
            status,
            message,
            completed_steps: completed,
            failures,
        }
    }

    async fn execute(&self, action: &StepAction) -> Result<(), CoreError> {
        match action {
            StepAction::ClearMap => self.api.clear_map().await?,
            StepAction::ClearPois => self.api.clear_pois().await?,
            StepAction::UploadMap(path) => {
                let map = read_map(path).await?;
                debug!(bytes = map.len(), path = %path.display(), "uploading map");
                self.api.upload_map(map).await?
            }
            StepAction::SetHomeDock(pose) => {
                self.api.clear_home_docks().await?;
                self.api.set_home_pose(pose).await?
            }
            StepAction::SetPose(pose) => self.api.set_pose(pose).await?,
            StepAction::PersistMap => self.api.persist_map().await?,
        }
        Ok(())
    }
}

async fn read_map(path: &Path) -> Result<Vec<u8>, CoreError> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CoreError::MapFileNotFound(path.to_path_buf()),
        _ => CoreError::Io(format!("{}: {e}", path.display())),
    })
}

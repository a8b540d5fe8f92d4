use std::path::PathBuf;

use padbot_model::Pose;

/// Remote operation performed by one pipeline step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    ClearMap,
    ClearPois,
    UploadMap(PathBuf),
    /// Clear stored home docks, then write the new home pose.
    SetHomeDock(Pose),
    SetPose(Pose),
    PersistMap,
}

/// One named unit of the provisioning sequence.
///
/// A failing critical step aborts the run; a failing non-critical step is
/// recorded and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningStep {
    pub name: &'static str,
    pub critical: bool,
    pub action: StepAction,
}

impl ProvisioningStep {
    fn critical(name: &'static str, action: StepAction) -> Self {
        Self {
            name,
            critical: true,
            action,
        }
    }

    fn best_effort(name: &'static str, action: StepAction) -> Self {
        Self {
            name,
            critical: false,
            action,
        }
    }

    /// The fixed provisioning order.
    pub fn plan(home_dock: Pose, map_path: PathBuf, offset_distance_m: f64) -> Vec<Self> {
        vec![
            Self::critical("clear_map", StepAction::ClearMap),
            Self::critical("clear_pois", StepAction::ClearPois),
            Self::critical("upload_map", StepAction::UploadMap(map_path)),
            Self::critical("set_home_dock", StepAction::SetHomeDock(home_dock)),
            Self::best_effort(
                "set_pose",
                StepAction::SetPose(home_dock.offset_along_yaw(offset_distance_m)),
            ),
            Self::best_effort("persist_map", StepAction::PersistMap),
        ]
    }
}

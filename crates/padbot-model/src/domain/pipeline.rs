use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ErrorKind;

/// Caller-supplied parameters of one map provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvisionSettings {
    #[serde(default, alias = "homeDockX")]
    pub home_dock_x: f64,
    #[serde(default, alias = "homeDockY")]
    pub home_dock_y: f64,
    #[serde(default, alias = "homeDockYaw")]
    pub home_dock_yaw: f64,
    /// Map binary to upload. Falls back to the configured map path when absent.
    #[serde(default, alias = "mapPath", skip_serializing_if = "Option::is_none")]
    pub map_path: Option<PathBuf>,
}

/// Consolidated outcome of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PipelineStatus {
    /// Every step succeeded.
    Success,
    /// All critical steps succeeded, at least one non-critical step failed.
    Partial,
    /// A critical step failed and the run was aborted.
    Failed,
}

/// One step that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: String,
    pub critical: bool,
    /// Classification of the underlying error, e.g. `MapFileNotFound`.
    pub kind: ErrorKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub status: PipelineStatus,
    pub message: String,
    /// Names of the steps that succeeded, in execution order.
    pub completed_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<StepFailure>,
}

impl PipelineResult {
    pub fn is_success(&self) -> bool {
        self.status == PipelineStatus::Success
    }

    /// First failure that aborted the run, if any.
    pub fn critical_failure(&self) -> Option<&StepFailure> {
        self.failures.iter().find(|f| f.critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_accept_camel_case_keys() {
        let s: ProvisionSettings = serde_json::from_str(
            r#"{"homeDockX":1.0,"homeDockY":2.0,"homeDockYaw":0.5,"mapPath":"/tmp/map.stcm"}"#,
        )
        .unwrap();
        assert_eq!(s.home_dock_x, 1.0);
        assert_eq!(s.home_dock_y, 2.0);
        assert_eq!(s.home_dock_yaw, 0.5);
        assert_eq!(s.map_path, Some(PathBuf::from("/tmp/map.stcm")));
    }

    #[test]
    fn critical_failure_skips_soft_failures() {
        let result = PipelineResult {
            status: PipelineStatus::Failed,
            message: "upload_map failed".into(),
            completed_steps: vec!["clear_map".into()],
            failures: vec![
                StepFailure {
                    step: "set_pose".into(),
                    critical: false,
                    kind: ErrorKind::Http,
                    reason: "http 500".into(),
                },
                StepFailure {
                    step: "upload_map".into(),
                    critical: true,
                    kind: ErrorKind::MapFileNotFound,
                    reason: "missing".into(),
                },
            ],
        };
        assert_eq!(result.critical_failure().unwrap().step, "upload_map");
        assert!(!result.is_success());
    }
}

use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::{
    ActionStatus, OperationError, OperationId, OperationStatus, PipelineResult, SeedReport,
};

/// What a controller operation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Navigate,
    GoHome,
    StopNavigation,
    ProvisionMap,
    SeedPois,
    ResetPois,
}

impl OperationKind {
    /// Short identifier used in logs and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Navigate => "navigate",
            OperationKind::GoHome => "go_home",
            OperationKind::StopNavigation => "stop_navigation",
            OperationKind::ProvisionMap => "provision_map",
            OperationKind::SeedPois => "seed_pois",
            OperationKind::ResetPois => "reset_pois",
        }
    }

    /// Operations that put the robot in motion.
    pub fn is_motion(&self) -> bool {
        matches!(self, OperationKind::Navigate | OperationKind::GoHome)
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "navigate" => Ok(OperationKind::Navigate),
            "go_home" | "gohome" => Ok(OperationKind::GoHome),
            "stop_navigation" | "stopnavigation" => Ok(OperationKind::StopNavigation),
            "provision_map" | "provisionmap" => Ok(OperationKind::ProvisionMap),
            "seed_pois" | "seedpois" => Ok(OperationKind::SeedPois),
            "reset_pois" | "resetpois" => Ok(OperationKind::ResetPois),
            _ => Err(format!("invalid operation kind: '{s}'")),
        }
    }
}

/// Kind-specific payload of a finished operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum OperationReport {
    Action(ActionStatus),
    Pipeline(PipelineResult),
    Seed(SeedReport),
}

/// Terminal result delivered to the caller of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub id: OperationId,
    pub kind: OperationKind,
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<OperationReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Succeeded
    }
}

/// Stored record of an operation, as exposed through status queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationInfo {
    pub id: OperationId,
    pub kind: OperationKind,
    pub status: OperationStatus,
    #[serde(with = "time_serde")]
    pub created_at: SystemTime,
    #[serde(with = "time_serde")]
    pub updated_at: SystemTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<OperationReport>,
    /// Last error (if status is Failed/TimedOut/Cancelled).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

mod time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let since_epoch = time
            .duration_since(UNIX_EPOCH)
            .map_err(serde::ser::Error::custom)?;
        (since_epoch.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, PipelineStatus};
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn kind_parses_both_spellings() {
        assert_eq!("go-home".parse::<OperationKind>(), Ok(OperationKind::GoHome));
        assert_eq!("provision_map".parse::<OperationKind>(), Ok(OperationKind::ProvisionMap));
        assert!("fly".parse::<OperationKind>().is_err());
        assert!(OperationKind::Navigate.is_motion());
        assert!(!OperationKind::SeedPois.is_motion());
    }

    #[test]
    fn info_serializes_timestamps_as_millis() {
        let at = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        let info = OperationInfo {
            id: OperationId::from("op-1"),
            kind: OperationKind::ProvisionMap,
            status: OperationStatus::Partial,
            created_at: at,
            updated_at: at,
            report: Some(OperationReport::Pipeline(PipelineResult {
                status: PipelineStatus::Partial,
                message: "set_pose failed".into(),
                completed_steps: vec!["clear_map".into()],
                failures: vec![],
            })),
            error: Some(OperationError::new(ErrorKind::PipelineStepFailed, "set_pose")),
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_123u64);
        assert_eq!(json["status"], "partial");
        assert_eq!(json["report"]["type"], "pipeline");

        let back: OperationInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, info);
    }
}

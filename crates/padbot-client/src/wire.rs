use serde::Serialize;
use serde_json::Value;

use padbot_model::{ActionHandle, ActionStatus, NavigationMode, Pose2D, Waypoint};

use crate::endpoints::{GO_HOME_ACTION, MOVE_TO_ACTION};
use crate::errors::ClientError;

/// Body of `POST /actions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRequest {
    pub action_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<MoveToOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gohome_options: Option<GoHomeOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveToOptions {
    pub target: Target,
    pub move_options: MoveOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveOptions {
    pub mode: u8,
    pub flags: Vec<&'static str>,
    pub yaw: f64,
    pub acceptable_precision: f64,
    pub fail_retry_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoHomeOptions {
    pub flags: &'static str,
    pub back_to_landing: bool,
    pub charging_retry_count: u32,
}

impl ActionRequest {
    pub fn move_to(target: Pose2D, mode: NavigationMode) -> Self {
        let move_options = match mode {
            NavigationMode::Standard => MoveOptions {
                mode: 0,
                flags: vec!["with_yaw"],
                yaw: target.yaw,
                acceptable_precision: 0.0,
                fail_retry_count: 0,
            },
            NavigationMode::Precise => MoveOptions {
                mode: 0,
                flags: vec!["with_yaw", "precise"],
                yaw: target.yaw,
                acceptable_precision: 0.5,
                fail_retry_count: 3,
            },
        };
        Self {
            action_name: MOVE_TO_ACTION.to_string(),
            options: Some(MoveToOptions {
                target: Target {
                    x: target.x,
                    y: target.y,
                    z: 0.0,
                },
                move_options,
            }),
            gohome_options: None,
        }
    }

    pub fn go_home() -> Self {
        Self {
            action_name: GO_HOME_ACTION.to_string(),
            options: None,
            gohome_options: Some(GoHomeOptions {
                flags: "dock",
                back_to_landing: true,
                charging_retry_count: 3,
            }),
        }
    }
}

/// Extract the action id from a dispatch response body.
pub fn decode_action_handle(body: &[u8]) -> Result<ActionHandle, ClientError> {
    let value: Value = serde_json::from_slice(body)?;
    match value.get("action_id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(ActionHandle::new(id.as_str())),
        Some(Value::Number(n)) => Ok(ActionHandle::new(n.to_string())),
        _ => Err(ClientError::MalformedResponse(
            "dispatch response carries no action_id".into(),
        )),
    }
}

/// Decode an action status document.
///
/// The robot signals completion by dropping the action descriptor: an object
/// without `action_name` is terminal success, any other object is still running.
pub fn decode_action_status(body: &[u8]) -> Result<ActionStatus, ClientError> {
    let value: Value = serde_json::from_slice(body)?;
    let Some(obj) = value.as_object() else {
        return Err(ClientError::MalformedResponse(
            "action status is not a json object".into(),
        ));
    };
    if obj.contains_key("action_name") {
        Ok(ActionStatus::Running)
    } else {
        Ok(ActionStatus::Succeeded)
    }
}

pub(crate) fn poi_body(id: &str, waypoint: &Waypoint) -> Value {
    serde_json::json!({
        "id": id,
        "pose": {
            "x": waypoint.pose.x,
            "y": waypoint.pose.y,
            "yaw": waypoint.pose.yaw,
        },
        "metadata": {
            "display_name": waypoint.name,
            "type": waypoint.kind,
            "group": waypoint.group,
        },
    })
}

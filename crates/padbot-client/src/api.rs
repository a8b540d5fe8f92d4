use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use padbot_model::{ActionHandle, ActionStatus, Pose, RobotHealth, Waypoint};

use crate::{
    endpoints,
    errors::ClientError,
    wire::{ActionRequest, poi_body},
};

/// Payload of a fire-and-forget command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandBody {
    Empty,
    Json(Value),
    Binary(Vec<u8>),
}

/// Typed transport to the robot's control API.
///
/// Implementations hold no state across calls. The four required methods are
/// the whole transport surface; every named robot command is a provided method
/// on top of them, so alternative transports only implement the primitives.
#[async_trait]
pub trait RobotApi: Send + Sync + 'static {
    /// Issue an action and return the handle to monitor it with.
    async fn dispatch_action(&self, request: &ActionRequest) -> Result<ActionHandle, ClientError>;

    /// Fetch the current state of an action: `Running` or `Succeeded`.
    async fn poll_action(&self, handle: &ActionHandle) -> Result<ActionStatus, ClientError>;

    /// Send a command whose only result is an HTTP status in `200..=204`.
    async fn simple_command(
        &self,
        method: Method,
        path: &str,
        body: CommandBody,
    ) -> Result<(), ClientError>;

    /// `GET` a JSON document.
    async fn fetch_json(&self, path: &str) -> Result<Value, ClientError>;

    async fn clear_map(&self) -> Result<(), ClientError> {
        self.simple_command(Method::DELETE, endpoints::MAPS, CommandBody::Empty)
            .await
    }

    async fn clear_pois(&self) -> Result<(), ClientError> {
        self.simple_command(Method::DELETE, endpoints::POIS, CommandBody::Empty)
            .await
    }

    async fn clear_home_docks(&self) -> Result<(), ClientError> {
        self.simple_command(Method::DELETE, endpoints::HOME_DOCKS, CommandBody::Empty)
            .await
    }

    async fn upload_map(&self, map: Vec<u8>) -> Result<(), ClientError> {
        self.simple_command(Method::PUT, endpoints::MAP_STCM, CommandBody::Binary(map))
            .await
    }

    async fn persist_map(&self) -> Result<(), ClientError> {
        self.simple_command(Method::POST, endpoints::MAP_PERSISTENT, CommandBody::Empty)
            .await
    }

    async fn set_home_pose(&self, pose: &Pose) -> Result<(), ClientError> {
        self.simple_command(Method::PUT, endpoints::HOME_POSE, CommandBody::Json(pose_body(pose)))
            .await
    }

    async fn set_pose(&self, pose: &Pose) -> Result<(), ClientError> {
        self.simple_command(Method::PUT, endpoints::POSE, CommandBody::Json(pose_body(pose)))
            .await
    }

    async fn stop_current_action(&self) -> Result<(), ClientError> {
        self.simple_command(Method::DELETE, endpoints::CURRENT_ACTION, CommandBody::Empty)
            .await
    }

    /// Create one POI with a fresh id.
    async fn create_poi(&self, waypoint: &Waypoint) -> Result<(), ClientError> {
        let id = uuid::Uuid::new_v4().to_string();
        self.simple_command(
            Method::POST,
            endpoints::POIS,
            CommandBody::Json(poi_body(&id, waypoint)),
        )
        .await
    }

    async fn set_max_line_speed(&self, speed: f64) -> Result<(), ClientError> {
        let body = json!({ "param": endpoints::MAX_SPEED_PARAM, "value": speed });
        self.simple_command(Method::PUT, endpoints::PARAMETER, CommandBody::Json(body))
            .await
    }

    async fn current_pose(&self) -> Result<Pose, ClientError> {
        let value = self.fetch_json(endpoints::POSE).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn list_pois(&self) -> Result<Value, ClientError> {
        self.fetch_json(endpoints::POIS).await
    }

    /// Probe the health endpoint. Never fails: an unreachable robot is a health result.
    async fn health(&self) -> RobotHealth {
        match self.fetch_json(endpoints::HEALTH).await {
            Ok(doc) => RobotHealth {
                reachable: true,
                has_error: doc
                    .get("hasError")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                detail: None,
            },
            Err(e) => RobotHealth {
                reachable: false,
                has_error: false,
                detail: Some(e.to_string()),
            },
        }
    }
}

fn pose_body(pose: &Pose) -> Value {
    json!({
        "x": pose.x,
        "y": pose.y,
        "z": pose.z,
        "yaw": pose.yaw,
        "pitch": pose.pitch,
        "roll": pose.roll,
    })
}

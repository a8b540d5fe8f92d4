mod config;
pub use config::SeederConfig;

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use padbot_client::RobotApi;
use padbot_model::{SeedFailure, SeedReport, Waypoint};

use crate::error::CoreError;

#[derive(Deserialize)]
#[serde(untagged)]
enum WaypointFile {
    List(Vec<Waypoint>),
    Wrapped { waypoints: Vec<Waypoint> },
}

/// Read a waypoint list from `path`.
///
/// Accepts either a bare JSON array or an object with a `waypoints` array.
/// Entries with non-finite coordinates make the whole file invalid.
pub async fn load_waypoints(path: &Path) -> Result<Vec<Waypoint>, CoreError> {
    let raw = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            CoreError::InvalidWaypoints(format!("{} does not exist", path.display()))
        }
        _ => CoreError::Io(format!("{}: {e}", path.display())),
    })?;

    let file: WaypointFile = serde_json::from_slice(&raw)
        .map_err(|e| CoreError::InvalidWaypoints(format!("{}: {e}", path.display())))?;
    let waypoints = match file {
        WaypointFile::List(list) => list,
        WaypointFile::Wrapped { waypoints } => waypoints,
    };

    if let Some(bad) = waypoints.iter().find(|w| !w.pose.is_finite()) {
        return Err(CoreError::InvalidWaypoints(format!(
            "waypoint '{}' has a non-finite pose",
            bad.name
        )));
    }
    Ok(waypoints)
}

/// Re-creates the default POIs on the robot from the local waypoint list.
pub struct PoiSeeder {
    api: Arc<dyn RobotApi>,
    cfg: SeederConfig,
}

impl PoiSeeder {
    pub fn new(api: Arc<dyn RobotApi>, cfg: SeederConfig) -> Self {
        Self { api, cfg }
    }

    /// Load the configured waypoint file and create one POI per entry.
    #[instrument(level = "info", skip(self), fields(path = %self.cfg.waypoints_path.display()))]
    pub async fn seed(&self) -> Result<SeedReport, CoreError> {
        let waypoints = load_waypoints(&self.cfg.waypoints_path).await?;
        Ok(self.seed_waypoints(&waypoints).await)
    }

    /// Create one POI per waypoint.
    ///
    /// Each creation stands alone: a failure is logged and recorded, and the
    /// remaining waypoints are still attempted.
    pub async fn seed_waypoints(&self, waypoints: &[Waypoint]) -> SeedReport {
        let mut report = SeedReport::default();

        for waypoint in waypoints {
            match self.api.create_poi(waypoint).await {
                Ok(()) => {
                    debug!(name = %waypoint.name, "poi created");
                    report.created.push(waypoint.name.clone());
                }
                Err(e) => {
                    warn!(name = %waypoint.name, error = %e, "failed to create poi");
                    let e = CoreError::from(e);
                    report.failed.push(SeedFailure {
                        name: waypoint.name.clone(),
                        kind: e.kind(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            created = report.created.len(),
            failed = report.failed.len(),
            "poi seeding finished"
        );
        report
    }

    /// Clear every POI on the robot, then seed the defaults.
    ///
    /// The waypoint file is read first so a broken file leaves the robot's
    /// POIs untouched. A failed clear aborts before any POI is created.
    #[instrument(level = "info", skip(self))]
    pub async fn reset(&self) -> Result<SeedReport, CoreError> {
        let waypoints = load_waypoints(&self.cfg.waypoints_path).await?;
        self.api.clear_pois().await?;
        info!("existing pois cleared");
        Ok(self.seed_waypoints(&waypoints).await)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use padbot_client::{ClientError, Method, endpoints};
    use padbot_model::Pose2D;

    use super::*;
    use crate::testing::ScriptedRobot;

    const LIST: &str = r#"[
        {"name":"Patrol Point 1","pose":{"x":1.0,"y":2.0,"yaw":0.0}},
        {"name":"Patrol Point 2","pose":{"x":-1.5,"y":0.5,"yaw":1.57},"type":"patrol"}
    ]"#;

    fn waypoint_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn seeder(robot: &Arc<ScriptedRobot>, file: &tempfile::NamedTempFile) -> PoiSeeder {
        PoiSeeder::new(
            robot.clone(),
            SeederConfig {
                waypoints_path: file.path().to_path_buf(),
            },
        )
    }

    #[tokio::test]
    async fn loads_bare_array() {
        let file = waypoint_file(LIST);
        let list = load_waypoints(file.path()).await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].pose, Pose2D::new(-1.5, 0.5, 1.57));
        assert_eq!(list[1].kind, "patrol");
    }

    #[tokio::test]
    async fn loads_wrapped_list() {
        let file = waypoint_file(&format!(r#"{{"waypoints":{LIST}}}"#));
        let list = load_waypoints(file.path()).await.unwrap();
        assert_eq!(list[0].name, "Patrol Point 1");
    }

    #[tokio::test]
    async fn malformed_file_is_invalid_waypoints() {
        let file = waypoint_file(r#"{"points":[]}"#);
        let err = load_waypoints(file.path()).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidWaypoints(_)));
    }

    #[tokio::test]
    async fn missing_file_is_invalid_waypoints() {
        let err = load_waypoints(Path::new("/nonexistent/padbot/waypoints.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidWaypoints(_)));
    }

    #[tokio::test]
    async fn seeds_every_waypoint() {
        let file = waypoint_file(LIST);
        let robot = Arc::new(ScriptedRobot::new());

        let report = seeder(&robot, &file).seed().await.unwrap();

        assert_eq!(report.created, vec!["Patrol Point 1", "Patrol Point 2"]);
        assert!(report.is_complete());
        assert_eq!(
            robot.calls(),
            vec![format!("POST {}", endpoints::POIS); 2]
        );
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_rest() {
        let file = waypoint_file(LIST);
        let robot = Arc::new(ScriptedRobot::new().failing(
            Method::POST,
            endpoints::POIS,
            ClientError::Http { code: 500 },
        ));

        let report = seeder(&robot, &file).seed().await.unwrap();

        assert_eq!(report.attempted(), 2);
        assert!(report.is_total_failure());
        assert_eq!(report.failed[0].name, "Patrol Point 1");
        assert_eq!(report.failed[0].kind, padbot_model::ErrorKind::Http);
        assert_eq!(robot.calls().len(), 2);
    }

    #[tokio::test]
    async fn reset_clears_before_creating() {
        let file = waypoint_file(LIST);
        let robot = Arc::new(ScriptedRobot::new());

        let report = seeder(&robot, &file).reset().await.unwrap();

        assert_eq!(report.created.len(), 2);
        let calls = robot.calls();
        assert_eq!(calls[0], format!("DELETE {}", endpoints::POIS));
        assert!(calls[1..].iter().all(|c| c.starts_with("POST")));
    }

    #[tokio::test]
    async fn failed_clear_creates_nothing() {
        let file = waypoint_file(LIST);
        let robot = Arc::new(ScriptedRobot::new().failing(
            Method::DELETE,
            endpoints::POIS,
            ClientError::Connection("refused".into()),
        ));

        let err = seeder(&robot, &file).reset().await.unwrap_err();

        assert!(matches!(err, CoreError::Connection(_)));
        assert_eq!(robot.calls(), vec![format!("DELETE {}", endpoints::POIS)]);
    }

    #[tokio::test]
    async fn broken_file_leaves_pois_untouched_on_reset() {
        let file = waypoint_file("not json");
        let robot = Arc::new(ScriptedRobot::new());

        assert!(seeder(&robot, &file).reset().await.is_err());
        assert!(robot.calls().is_empty());
    }
}

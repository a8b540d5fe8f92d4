//! Paths of the robot control API.

pub const ACTIONS: &str = "/api/core/motion/v1/actions";
pub const CURRENT_ACTION: &str = "/api/core/motion/v1/actions/:current";

pub const MAPS: &str = "/api/core/slam/v1/maps";
pub const MAP_STCM: &str = "/api/core/slam/v1/maps/stcm";
pub const MAP_PERSISTENT: &str = "/api/core/slam/v1/maps/persistent";

pub const HOME_DOCKS: &str = "/api/core/slam/v1/homedocks";
pub const HOME_POSE: &str = "/api/core/slam/v1/homepose";
pub const POSE: &str = "/api/core/slam/v1/localization/pose";

pub const POIS: &str = "/api/core/artifact/v1/pois";

pub const HEALTH: &str = "/api/core/system/v1/robot/health";
pub const PARAMETER: &str = "/api/core/system/v1/parameter";

pub const MOVE_TO_ACTION: &str = "slamtec.agent.actions.MoveToAction";
pub const GO_HOME_ACTION: &str = "slamtec.agent.actions.GoHomeAction";

pub const MAX_SPEED_PARAM: &str = "base.max_moving_speed";

pub fn action(id: &str) -> String {
    format!("{ACTIONS}/{id}")
}

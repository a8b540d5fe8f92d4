use serde::{Deserialize, Serialize};

use crate::Pose2D;

/// Named navigation target stored locally and seeded onto the robot as a POI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub pose: Pose2D,
    /// POI category forwarded as `metadata.type`.
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, pose: Pose2D) -> Self {
        Self {
            name: name.into(),
            pose,
            kind: String::new(),
            group: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_entry() {
        let w: Waypoint =
            serde_json::from_str(r#"{"name":"Patrol Point 1","pose":{"x":1.0,"y":2.0,"yaw":0.5}}"#)
                .unwrap();
        assert_eq!(w.name, "Patrol Point 1");
        assert_eq!(w.pose, Pose2D::new(1.0, 2.0, 0.5));
        assert!(w.kind.is_empty());
        assert!(w.group.is_empty());
    }

    #[test]
    fn type_field_maps_to_kind() {
        let w: Waypoint = serde_json::from_str(
            r#"{"name":"Shelf","pose":{"x":0,"y":0,"yaw":0},"type":"product","group":"aisle-3"}"#,
        )
        .unwrap();
        assert_eq!(w.kind, "product");
        assert_eq!(w.group, "aisle-3");
    }
}

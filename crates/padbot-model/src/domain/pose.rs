use serde::{Deserialize, Serialize};

/// Full 6-DoF pose as the robot reports and accepts it.
///
/// `yaw`, `pitch` and `roll` are radians. Missing fields decode as zero, which
/// matches how the robot omits unused axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Pose {
    pub const ORIGIN: Pose = Pose {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        yaw: 0.0,
        pitch: 0.0,
        roll: 0.0,
    };

    /// Pose on the floor plane: `z`, `pitch` and `roll` are zero.
    pub fn planar(x: f64, y: f64, yaw: f64) -> Self {
        Self {
            x,
            y,
            yaw,
            ..Self::ORIGIN
        }
    }

    /// Build from the `[x, y, z, yaw, pitch, roll]` layout used in configuration.
    pub fn from_array(v: [f64; 6]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
            yaw: v[3],
            pitch: v[4],
            roll: v[5],
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.x, self.y, self.z, self.yaw, self.pitch, self.roll]
    }

    /// Translate `distance` metres along the yaw heading.
    ///
    /// The heading is projected onto the x/z components of the pose; `y` and
    /// the orientation are carried over unchanged.
    pub fn offset_along_yaw(&self, distance: f64) -> Self {
        Self {
            x: self.x + distance * self.yaw.cos(),
            z: self.z + distance * self.yaw.sin(),
            ..*self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// Navigation target on the map plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.yaw.is_finite()
    }
}

impl From<Pose2D> for Pose {
    fn from(p: Pose2D) -> Self {
        Pose::planar(p.x, p.y, p.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn offset_with_zero_yaw_moves_along_x() {
        let home = Pose::from_array([1.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
        let p = home.offset_along_yaw(0.2);

        assert!(close(p.x, 1.2));
        assert!(close(p.y, 2.0));
        assert!(close(p.z, 0.0));
        assert_eq!(p.yaw, 0.0);
        assert_eq!(p.pitch, 0.0);
        assert_eq!(p.roll, 0.0);
    }

    #[test]
    fn offset_with_quarter_turn_moves_along_z() {
        let home = Pose::from_array([1.0, 2.0, 0.0, std::f64::consts::FRAC_PI_2, 0.0, 0.0]);
        let p = home.offset_along_yaw(0.2);

        assert!(close(p.x, 1.0));
        assert!(close(p.y, 2.0));
        assert!(close(p.z, 0.2));
    }

    #[test]
    fn missing_axes_decode_as_zero() {
        let p: Pose = serde_json::from_str(r#"{"x":1.5,"y":-2.0,"yaw":0.3}"#).unwrap();
        assert_eq!(p, Pose::planar(1.5, -2.0, 0.3));
    }

    #[test]
    fn non_finite_pose_is_detected() {
        assert!(Pose::ORIGIN.is_finite());
        assert!(!Pose::planar(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Pose2D::new(0.0, f64::INFINITY, 0.0).is_finite());
    }
}

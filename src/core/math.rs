// Pose math for controller offsets

use glam::{Quat, Vec3};

/// A rigid transform: orientation followed by translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub orientation: Quat,
    pub position: Vec3,
}

impl Pose {
    /// The transform that changes nothing
    pub const IDENTITY: Self = Self {
        orientation: Quat::IDENTITY,
        position: Vec3::ZERO,
    };

    /// Create a pose from an orientation and a position
    pub fn new(orientation: Quat, position: Vec3) -> Self {
        Self {
            orientation,
            position,
        }
    }

    /// Rotation about the controller's local X axis (in degrees), then a
    /// translation along -Z by `forward` meters
    pub fn from_pitch_offset(pitch_degrees: f32, forward: f32) -> Self {
        Self::new(
            Quat::from_rotation_x(pitch_degrees.to_radians()),
            Vec3::new(0.0, 0.0, -forward),
        )
    }

    /// Apply this pose to a point in local space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.orientation * point + self.position
    }

    /// Compose two poses: `self` applied after `local`
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            orientation: self.orientation * local.orientation,
            position: self.transform_point(local.position),
        }
    }

    /// Check whether this pose is the identity transform
    pub fn is_identity(&self) -> bool {
        self.orientation == Quat::IDENTITY && self.position == Vec3::ZERO
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

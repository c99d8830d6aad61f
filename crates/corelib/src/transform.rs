use crate::{Mat4, Vec3};

/// Model placement with non-uniform scale and Euler rotation (radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Applied as X, then Y, then Z in the model's local frame.
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    /// T * Rx * Ry * Rz * S.
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * rotation_xyz(self.rotation_euler)
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rx * Ry * Rz, shared by the model and camera matrices.
#[inline]
pub fn rotation_xyz(euler: Vec3) -> Mat4 {
    Mat4::from_rotation_x(euler.x) * Mat4::from_rotation_y(euler.y) * Mat4::from_rotation_z(euler.z)
}

use crate::{Mat4, Vec3, transform::rotation_xyz};

/// Perspective camera looking at the origin, with an extra Euler rotation
/// applied to the world after the look-at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, -20.0);
    const FRAMING_MARGIN: f32 = 1.1;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Self::DEFAULT_POSITION,
            rotation: Vec3::ZERO,
            fov_y_rad: 120f32.to_radians(),
            z_near: 0.001,
            z_far: 300.0,
            aspect: aspect_ratio(width, height),
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y) * rotation_xyz(self.rotation)
    }

    /// OpenGL-style clip space (z in [-1, 1]).
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    /// Pull the camera back along -Z so a mesh with per-axis extents
    /// `max_dims`, scaled by `scale`, fits the vertical field of view.
    /// An empty extent leaves the camera where it is.
    pub fn frame_bounds(&mut self, max_dims: Vec3, scale: f32) {
        let radius = max_dims.length() * scale;
        if radius <= f32::EPSILON {
            return;
        }
        let distance = radius / (self.fov_y_rad * 0.5).sin() * Self::FRAMING_MARGIN;
        self.position = Vec3::new(0.0, 0.0, -distance.min(self.z_far * 0.5));
        log::debug!("Camera framed at distance {:.3} for radius {:.3}", distance, radius);
    }
}

pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

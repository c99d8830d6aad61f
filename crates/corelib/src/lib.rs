//! Core types: math re-exports, transforms, camera and the viewer state that
//! maps user input onto them. Nothing here touches a window or a GPU.

pub use glam::{Mat3, Mat4, Vec2, Vec3, Vec4, vec3};

pub mod camera;
pub mod controls;
pub mod error;
pub mod lighting;
pub mod transform;
pub mod uniforms;
pub mod viewer;

pub use error::{CoreError, CoreResult};

//! Typed uniform block for the Phong shader, laid out to match a std140 GLSL block.

use bytemuck::{Pod, Zeroable};

use crate::{Mat3, Mat4, Vec3};

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PhongUniforms {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// Inverse-transpose of the model-view 3x3, widened to 4x4.
    pub normal: [[f32; 4]; 4],
    pub model_color: [f32; 4],
    pub light_positions: [[f32; 4]; 2],
    pub light_colors: [[f32; 4]; 2],
    pub ambient: f32,
    pub shine: f32,
    pub render_type: u32,
    pub _pad: u32,
    /// Per-light product, stored in `.x` of each 16-byte array element.
    pub diffuse: [[f32; 4]; 2],
    pub specular: [[f32; 4]; 2],
}

impl PhongUniforms {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[inline]
pub(crate) fn mat4(m: Mat4) -> [[f32; 4]; 4] {
    m.to_cols_array_2d()
}

#[inline]
pub(crate) fn mat3_padded(m: Mat3) -> [[f32; 4]; 4] {
    Mat4::from_mat3(m).to_cols_array_2d()
}

#[inline]
pub(crate) fn vec3_padded(v: Vec3) -> [f32; 4] {
    v.extend(0.0).to_array()
}

/// A scalar array element under std140 still takes a full vec4 slot.
#[inline]
pub(crate) fn scalar_padded(x: f32) -> [f32; 4] {
    [x, 0.0, 0.0, 0.0]
}

//! Interleaved vertex layout for consumers that want a single vertex buffer.

use bytemuck::{Pod, Zeroable};

use crate::expand::ExpandedMesh;

/// One de-indexed vertex. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl MeshVertex {
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();
}

/// Zip the flat streams of `mesh` into vertices. Missing UVs become `[0, 0]`.
/// The shortest stream decides the vertex count.
pub fn interleave(mesh: &ExpandedMesh) -> Vec<MeshVertex> {
    let vec3 = |c: &[f32]| [c[0], c[1], c[2]];
    let uvs = mesh
        .texcoords
        .chunks_exact(2)
        .map(|c| [c[0], c[1]])
        .chain(std::iter::repeat([0.0; 2]).take_while(|_| mesh.texcoords.is_empty()));

    mesh.positions
        .chunks_exact(3)
        .zip(mesh.normals.chunks_exact(3))
        .zip(mesh.tangents.chunks_exact(3))
        .zip(mesh.bitangents.chunks_exact(3))
        .zip(uvs)
        .map(|((((position, normal), tangent), bitangent), uv)| MeshVertex {
            position: vec3(position),
            normal: vec3(normal),
            uv,
            tangent: vec3(tangent),
            bitangent: vec3(bitangent),
        })
        .collect()
}

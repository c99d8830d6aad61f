//! De-indexing of parsed faces into flat per-vertex streams, plus the
//! per-triangle tangent frame used for bump mapping.

use glam::{Vec2, Vec3};

use crate::{
    error::{GeometryError, GeometryResult},
    obj::ObjDocument,
};

/// Below this UV-area determinant the linear solve is treated as singular.
pub const DEGENERATE_UV_EPSILON: f32 = 1e-8;

/// Five parallel flat streams; every face contributes three unshared vertices.
///
/// `texcoords` is empty when the source declared no `vt` records at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpandedMesh {
    pub positions: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub normals: Vec<f32>,
    pub tangents: Vec<f32>,
    pub bitangents: Vec<f32>,
}

impl ExpandedMesh {
    /// Expand `doc` in face order, then corner order.
    pub fn from_document(doc: &ObjDocument) -> GeometryResult<Self> {
        let vertex_total = doc.faces.len() * 3;
        let has_uvs = !doc.texcoords.is_empty();

        let mut mesh = Self {
            positions: Vec::with_capacity(vertex_total * 3),
            texcoords: Vec::with_capacity(if has_uvs { vertex_total * 2 } else { 0 }),
            normals: Vec::with_capacity(vertex_total * 3),
            tangents: Vec::with_capacity(vertex_total * 3),
            bitangents: Vec::with_capacity(vertex_total * 3),
        };

        for (face_index, face) in doc.faces.iter().enumerate() {
            let mut corner_positions = [Vec3::ZERO; 3];
            let mut corner_uvs = [Vec2::ZERO; 3];

            for (slot, corner) in face.corners.iter().enumerate() {
                let position_index = corner.position.ok_or_else(|| GeometryError::InvalidGeometry {
                    face: face_index,
                    reason: format!("corner {} has no position index", slot + 1),
                })?;
                let position = lookup(&doc.positions, position_index, face_index, "position")?;
                corner_positions[slot] = Vec3::from_array(position);
                mesh.positions.extend_from_slice(&position);

                if has_uvs {
                    let uv = match corner.texcoord {
                        Some(i) => lookup(&doc.texcoords, i, face_index, "texture coordinate")?,
                        None => [0.0; 2],
                    };
                    corner_uvs[slot] = Vec2::from_array(uv);
                    mesh.texcoords.extend_from_slice(&uv);
                }

                let normal = match corner.normal {
                    Some(i) => lookup(&doc.normals, i, face_index, "normal")?,
                    None => [0.0; 3],
                };
                mesh.normals.extend_from_slice(&normal);
            }

            let uvs = has_uvs.then_some(corner_uvs);
            let (tangent, bitangent) = tangent_basis(corner_positions, uvs);
            for _ in 0..3 {
                mesh.tangents.extend_from_slice(&tangent.to_array());
                mesh.bitangents.extend_from_slice(&bitangent.to_array());
            }
        }

        Ok(mesh)
    }
}

fn lookup<T: Copy>(items: &[T], index: usize, face: usize, what: &str) -> GeometryResult<T> {
    items
        .get(index)
        .copied()
        .ok_or_else(|| GeometryError::InvalidGeometry {
            face,
            reason: format!(
                "{what} index {} out of range ({} defined)",
                index + 1,
                items.len()
            ),
        })
}

/// Solve `[d1; d2] * [T; B] = [e1; e2]` for one triangle.
///
/// The result is neither normalized nor orthogonalized against the normal.
/// When the UVs are missing or span zero area the frame comes from
/// [`fallback_basis`] instead.
pub fn tangent_basis(positions: [Vec3; 3], uvs: Option<[Vec2; 3]>) -> (Vec3, Vec3) {
    let e1 = positions[1] - positions[0];
    let e2 = positions[2] - positions[0];

    if let Some(uv) = uvs {
        let d1 = uv[1] - uv[0];
        let d2 = uv[2] - uv[0];
        let det = d1.x * d2.y - d2.x * d1.y;
        if det.abs() > DEGENERATE_UV_EPSILON {
            let f = 1.0 / det;
            let tangent = f * (d2.y * e1 - d1.y * e2);
            let bitangent = f * (-d2.x * e1 + d1.x * e2);
            if tangent.is_finite() && bitangent.is_finite() {
                return (tangent, bitangent);
            }
        }
    }

    fallback_basis(e1, e2)
}

/// Orthonormal frame around the face normal (`+Z` for zero-area faces).
/// The tangent is built against the world axis least aligned with the normal.
pub fn fallback_basis(e1: Vec3, e2: Vec3) -> (Vec3, Vec3) {
    let normal = e1.cross(e2).try_normalize().unwrap_or(Vec3::Z);
    let a = normal.abs();
    let axis = if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let tangent = normal.cross(axis).try_normalize().unwrap_or(Vec3::X);
    let bitangent = normal.cross(tangent);
    (tangent, bitangent)
}

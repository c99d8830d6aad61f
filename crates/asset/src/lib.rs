//! Asset loading: OBJ geometry with per-vertex tangent frames, and the
//! diffuse/bump texture maps that go with it.

pub mod error;
pub mod expand;
pub mod geometry;
pub mod mesh;
pub mod obj;
pub mod texture;

pub use error::{GeometryError, GeometryResult};
pub use geometry::GeometryData;
pub use mesh::MeshVertex;
pub use texture::{SurfaceMaps, TextureData};

//! `GeometryData`: owns a parsed OBJ mesh and its expanded vertex streams.
//!
//! Loading runs parse and expansion to completion before touching `self`, so
//! a failed load leaves the previous mesh intact and readers never observe a
//! half-built state.

use std::{io::BufRead, path::Path};

use glam::Vec3;

use crate::{
    error::GeometryResult,
    expand::ExpandedMesh,
    mesh::{self, MeshVertex},
    obj::{self, ObjDocument},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryData {
    document: ObjDocument,
    mesh: ExpandedMesh,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a geometry object straight from a file.
    pub fn from_obj_file(path: impl AsRef<Path>) -> GeometryResult<Self> {
        let mut geometry = Self::new();
        geometry.load_from_obj_file(path)?;
        Ok(geometry)
    }

    /// Replace the current mesh with the contents of an OBJ file.
    pub fn load_from_obj_file(&mut self, path: impl AsRef<Path>) -> GeometryResult<()> {
        let path = path.as_ref();
        self.replace(obj::parse_obj_file(path)?)?;
        log::info!(
            "Loaded {}: {} faces, {} vertices, texcoords={}",
            path.display(),
            self.face_count(),
            self.vertex_count(),
            self.has_texture_coords()
        );
        Ok(())
    }

    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> GeometryResult<()> {
        self.replace(obj::parse_obj(reader)?)
    }

    pub fn load_from_str(&mut self, contents: &str) -> GeometryResult<()> {
        self.replace(obj::parse_obj_str(contents)?)
    }

    fn replace(&mut self, document: ObjDocument) -> GeometryResult<()> {
        let mesh = ExpandedMesh::from_document(&document)?;
        self.document = document;
        self.mesh = mesh;
        Ok(())
    }

    // Counters

    pub fn face_count(&self) -> usize {
        self.document.faces.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.positions.len() / 3
    }

    pub fn normal_count(&self) -> usize {
        self.mesh.normals.len() / 3
    }

    /// Zero when the source had no `vt` records.
    pub fn texture_coord_count(&self) -> usize {
        self.mesh.texcoords.len() / 2
    }

    pub fn tangent_count(&self) -> usize {
        self.mesh.tangents.len() / 3
    }

    pub fn bitangent_count(&self) -> usize {
        self.mesh.bitangents.len() / 3
    }

    pub fn has_texture_coords(&self) -> bool {
        !self.mesh.texcoords.is_empty()
    }

    // Accessors

    pub fn vertex_data(&self) -> &[f32] {
        &self.mesh.positions
    }

    pub fn texture_coord_data(&self) -> &[f32] {
        &self.mesh.texcoords
    }

    pub fn normal_data(&self) -> &[f32] {
        &self.mesh.normals
    }

    pub fn tangent_data(&self) -> &[f32] {
        &self.mesh.tangents
    }

    pub fn bitangent_data(&self) -> &[f32] {
        &self.mesh.bitangents
    }

    /// Raw records as parsed, before de-indexing.
    pub fn document(&self) -> &ObjDocument {
        &self.document
    }

    pub fn expanded(&self) -> &ExpandedMesh {
        &self.mesh
    }

    pub fn interleaved(&self) -> Vec<MeshVertex> {
        mesh::interleave(&self.mesh)
    }

    /// Per-axis maximum of `|coordinate|` over every expanded vertex.
    /// This is not the bounding-box extent. Zero for an empty mesh.
    pub fn find_max_dimensions(&self) -> Vec3 {
        self.mesh
            .positions
            .chunks_exact(3)
            .fold(Vec3::ZERO, |acc, p| {
                acc.max(Vec3::new(p[0], p[1], p[2]).abs())
            })
    }
}

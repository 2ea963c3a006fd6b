//! Indexed triangle mesh with derived vertex normals.
//!
//! The engine hands these buffers to the host renderer as-is: positions
//! and normals as tightly packed `f32` triples, indices as `u32` triples
//! with counter-clockwise winding for outward-facing triangles. Normals
//! are always derived from the triangles, never authored.

use crate::core::types::Vec3;
use crate::math::Aabb;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            normals: Vec::new(),
        }
    }

    /// Append a vertex, returning its index.
    pub fn add_vertex(&mut self, position: Vec3) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push(position);
        idx
    }

    /// Append one triangle (counter-clockwise seen from outside).
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append a quad as two triangles sharing the a-c diagonal.
    pub fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Clear all buffers, keeping allocations for a rebuild.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.indices.clear();
        self.normals.clear();
    }

    /// Recompute per-vertex normals by averaging adjacent face normals.
    ///
    /// Face normals are accumulated unnormalized, so larger triangles
    /// weigh more. Vertices not referenced by any triangle get +Y.
    pub fn compute_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        for n in &mut self.normals {
            *n = n.normalize_or(Vec3::Y);
        }
    }

    /// World-space bounds of the current vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }

    /// Position buffer as raw bytes (12 bytes per vertex).
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal buffer as raw bytes (12 bytes per vertex).
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Index buffer as raw bytes (little-endian u32).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

//! Animated open water surface.

use crate::core::types::Vec3;
use crate::mesh::Mesh;
use crate::water::{Ripples, WaveField};

/// Parameters shared by the water surface and volume builders
#[derive(Clone, Debug)]
pub struct WaterParams {
    /// Rest elevation of the water surface
    pub level: f32,
    /// Side length of the square footprint (matches the terrain slab)
    pub size: f32,
    /// Grid resolution per side (quads); clamped to at least 1
    pub segments: u32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            level: 0.8,
            size: 4.0,
            segments: 12,
        }
    }
}

/// Flat water plane whose every vertex follows the combined wave +
/// ripple height each frame. The grid topology never changes; only
/// vertex heights and normals do.
pub struct WaterSurface {
    mesh: Mesh,
    waves: WaveField,
}

impl WaterSurface {
    pub fn build(params: &WaterParams) -> Self {
        let seg = params.segments.max(1) as usize;
        let size = params.size;
        let coord = |i: usize| (i as f32 / seg as f32 - 0.5) * size;

        let mut mesh = Mesh::with_capacity((seg + 1) * (seg + 1), seg * seg * 6);
        for i in 0..=seg {
            for j in 0..=seg {
                mesh.add_vertex(Vec3::new(coord(i), params.level, coord(j)));
            }
        }
        for i in 0..seg {
            for j in 0..seg {
                let p00 = (i * (seg + 1) + j) as u32;
                let p01 = p00 + 1;
                let p10 = ((i + 1) * (seg + 1) + j) as u32;
                let p11 = p10 + 1;
                mesh.push_quad(p00, p01, p11, p10);
            }
        }
        mesh.compute_normals();

        Self {
            mesh,
            waves: WaveField::new(params.level),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn waves(&self) -> &WaveField {
        &self.waves
    }

    /// Re-set every vertex to the combined surface height and
    /// recompute normals. The only per-frame mutation is vertex y.
    pub fn update(&mut self, time: f32, ripples: &Ripples) {
        for p in &mut self.mesh.positions {
            p.y = self.waves.height_at(p.x, p.z, time) + ripples.displacement_at(p.x, p.z, time);
        }
        self.mesh.compute_normals();
    }
}

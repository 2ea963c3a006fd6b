//! Water volume: wall-only shell between the seabed and the surface.

use crate::core::types::Vec3;
use crate::mesh::Mesh;
use crate::terrain::HeightField;
use crate::water::{Ripples, WaterParams, WaveField};

/// Open-topped, open-bottomed shell around the water body. The floor
/// rim follows the terrain, the top rim follows the animated surface;
/// only the rim vertices move after construction.
pub struct WaterVolume {
    mesh: Mesh,
    top_rim: Vec<u32>,
    waves: WaveField,
}

impl WaterVolume {
    /// Build the four wall strips. The two reversed walls use mirrored
    /// parametrization so all four wind outward consistently.
    pub fn build(height: &HeightField, params: &WaterParams) -> Self {
        let seg = params.segments.max(1) as usize;
        let size = params.size;
        let half = size / 2.0;

        let mut mesh = Mesh::with_capacity(4 * (seg + 1) * 2, 4 * seg * 6);
        let mut top_rim = Vec::with_capacity(4 * (seg + 1));

        let mut wall = |station: &dyn Fn(f32) -> (f32, f32)| {
            let base = mesh.vertex_count() as u32;
            for k in 0..=seg {
                let t = k as f32 / seg as f32;
                let (x, z) = station(t);
                mesh.add_vertex(Vec3::new(x, height.height_at(x, z), z));
                top_rim.push(mesh.add_vertex(Vec3::new(x, params.level, z)));
            }
            for k in 0..seg as u32 {
                let bot0 = base + 2 * k;
                let top0 = bot0 + 1;
                let bot1 = base + 2 * (k + 1);
                let top1 = bot1 + 1;
                mesh.push_quad(bot0, top0, top1, bot1);
            }
        };

        // Front wall (z = -size/2)
        wall(&|t| ((t - 0.5) * size, -half));
        // Back wall (z = size/2), mirrored
        wall(&|t| ((0.5 - t) * size, half));
        // Left wall (x = -size/2), mirrored
        wall(&|t| (-half, (0.5 - t) * size));
        // Right wall (x = size/2)
        wall(&|t| (half, (t - 0.5) * size));

        mesh.compute_normals();

        Self {
            mesh,
            top_rim,
            waves: WaveField::new(params.level),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Indices of the vertices forming the animated top rim.
    pub fn top_rim(&self) -> &[u32] {
        &self.top_rim
    }

    /// Re-set the top rim to the combined surface height and recompute
    /// normals. Wall topology and floor vertices are never rebuilt.
    pub fn update(&mut self, time: f32, ripples: &Ripples) {
        for &idx in &self.top_rim {
            let p = &mut self.mesh.positions[idx as usize];
            p.y = self.waves.height_at(p.x, p.z, time) + ripples.displacement_at(p.x, p.z, time);
        }
        self.mesh.compute_normals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_volume() -> WaterVolume {
        let height = HeightField::new(0, -0.9);
        WaterVolume::build(&height, &WaterParams::default())
    }

    #[test]
    fn test_wall_only_counts() {
        let volume = build_volume();
        let seg = 12usize;
        assert_eq!(volume.mesh().vertex_count(), 4 * (seg + 1) * 2);
        assert_eq!(volume.mesh().indices.len(), 4 * seg * 6);
        assert_eq!(volume.top_rim().len(), 4 * (seg + 1));
    }

    #[test]
    fn test_rim_vertices_start_at_level() {
        let volume = build_volume();
        for &idx in volume.top_rim() {
            assert_eq!(volume.mesh().positions[idx as usize].y, 0.8);
        }
    }

    #[test]
    fn test_floor_follows_terrain() {
        let height = HeightField::new(0, -0.9);
        let volume = WaterVolume::build(&height, &WaterParams::default());
        let rim: std::collections::HashSet<u32> = volume.top_rim().iter().copied().collect();
        for (i, p) in volume.mesh().positions.iter().enumerate() {
            if !rim.contains(&(i as u32)) {
                assert_eq!(p.y, height.height_at(p.x, p.z));
            }
        }
    }

    #[test]
    fn test_update_moves_only_rim() {
        let mut volume = build_volume();
        let floor_before: Vec<f32> = volume
            .mesh()
            .positions
            .iter()
            .step_by(2)
            .map(|p| p.y)
            .collect();
        volume.update(3.0, &Ripples::new());
        let floor_after: Vec<f32> = volume
            .mesh()
            .positions
            .iter()
            .step_by(2)
            .map(|p| p.y)
            .collect();
        assert_eq!(floor_before, floor_after);
        for &idx in volume.top_rim() {
            let p = volume.mesh().positions[idx as usize];
            assert_ne!(p.y, 0.8, "rim vertex should follow the wave at t=3");
        }
    }

    #[test]
    fn test_walls_wind_outward() {
        let volume = build_volume();
        let seg = 12usize;
        let wall_len = (seg + 1) * 2;
        let expected = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        for (w, out) in expected.iter().enumerate() {
            // Mid-wall floor vertex: its faces lie in the wall plane.
            let idx = w * wall_len + (seg / 2) * 2;
            let n = volume.mesh().normals[idx];
            assert!(n.dot(*out) > 0.7, "wall {w} normal {n:?} not along {out:?}");
        }
    }
}

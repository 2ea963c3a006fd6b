//! Terrain slab mesh builder.
//!
//! Turns the height field over a bounded square into a closed solid:
//! a heightmapped top surface, four ruled side walls and a flat bottom,
//! all wound outward. Built once per seed/parameter change; never
//! touched by the per-frame update.

use crate::core::types::Vec3;
use crate::mesh::Mesh;
use crate::terrain::HeightField;

/// Parameters controlling the terrain slab
#[derive(Clone, Debug)]
pub struct TerrainParams {
    /// Side length of the square footprint
    pub size: f32,
    /// Grid resolution per side (quads); clamped to at least 1
    pub segments: u32,
    /// Base elevation of the undisturbed seabed plane
    pub floor_y: f32,
    /// Slab depth below `floor_y` down to the flat bottom
    pub thickness: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            size: 4.0,
            segments: 12,
            floor_y: -0.9,
            thickness: 0.5,
        }
    }
}

/// Build the closed terrain slab for a height field.
///
/// Identical height field + params produce byte-identical buffers.
/// Side-wall edge vertices are recomputed (not shared with the top
/// grid) so each wall winds independently; they land on bit-identical
/// positions, keeping the solid watertight.
pub fn build_terrain(height: &HeightField, params: &TerrainParams) -> Mesh {
    let seg = params.segments.max(1) as usize;
    let size = params.size;
    let bottom_y = params.floor_y - params.thickness;

    let coord = |i: usize| (i as f32 / seg as f32 - 0.5) * size;

    // Height grid sampled once, reused by top surface and walls.
    let mut heights = vec![0.0f32; (seg + 1) * (seg + 1)];
    for i in 0..=seg {
        for j in 0..=seg {
            heights[i * (seg + 1) + j] = height.height_at(coord(i), coord(j));
        }
    }
    let h = |i: usize, j: usize| heights[i * (seg + 1) + j];

    let verts = (seg + 1) * (seg + 1) + 4 * (seg + 1) * 2 + 4;
    let idxs = seg * seg * 6 + 4 * seg * 6 + 6;
    let mut mesh = Mesh::with_capacity(verts, idxs);

    // Top surface: i along +x, j along +z.
    for i in 0..=seg {
        for j in 0..=seg {
            mesh.add_vertex(Vec3::new(coord(i), h(i, j), coord(j)));
        }
    }
    for i in 0..seg {
        for j in 0..seg {
            let p00 = (i * (seg + 1) + j) as u32;
            let p01 = p00 + 1;
            let p10 = ((i + 1) * (seg + 1) + j) as u32;
            let p11 = p10 + 1;
            // a-c diagonal split, normals up
            mesh.push_quad(p00, p01, p11, p10);
        }
    }

    // Side walls: ruled strips from the top edge down to the flat
    // bottom. Station order per wall keeps every wall winding outward.
    let mut wall = |stations: &mut dyn Iterator<Item = (f32, f32, f32)>| {
        let base = mesh.vertex_count() as u32;
        let mut count = 0u32;
        for (x, z, top) in stations {
            mesh.add_vertex(Vec3::new(x, top, z));
            mesh.add_vertex(Vec3::new(x, bottom_y, z));
            count += 1;
        }
        for k in 0..count - 1 {
            let top0 = base + 2 * k;
            let bot0 = top0 + 1;
            let top1 = base + 2 * (k + 1);
            let bot1 = top1 + 1;
            mesh.push_quad(top0, top1, bot1, bot0);
        }
    };

    // Front edge (z = -size/2), x ascending
    wall(&mut (0..=seg).map(|i| (coord(i), -size / 2.0, h(i, 0))));
    // Back edge (z = size/2), x descending
    wall(&mut (0..=seg).rev().map(|i| (coord(i), size / 2.0, h(i, seg))));
    // Left edge (x = -size/2), z descending
    wall(&mut (0..=seg).rev().map(|j| (-size / 2.0, coord(j), h(0, j))));
    // Right edge (x = size/2), z ascending
    wall(&mut (0..=seg).map(|j| (size / 2.0, coord(j), h(seg, j))));

    // Bottom face, wound downward
    let bl = mesh.add_vertex(Vec3::new(-size / 2.0, bottom_y, -size / 2.0));
    let br = mesh.add_vertex(Vec3::new(size / 2.0, bottom_y, -size / 2.0));
    let tr = mesh.add_vertex(Vec3::new(size / 2.0, bottom_y, size / 2.0));
    let tl = mesh.add_vertex(Vec3::new(-size / 2.0, bottom_y, size / 2.0));
    mesh.push_quad(bl, br, tr, tl);

    mesh.compute_normals();
    mesh
}

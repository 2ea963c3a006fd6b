//! Perturbed-icosahedron rock shapes.

use std::collections::HashMap;

use crate::core::types::Vec3;
use crate::mesh::Mesh;
use crate::rng::SeededRng;

/// Stream offset for rock placement draws.
pub const ROCK_SEED_OFFSET: i32 = 2000;
/// Stream offset for rock tilt draws, one stream per scene.
pub const ROCK_TILT_SEED_OFFSET: i32 = 2100;
/// Base stream offset for rock shape variants; variant `i` uses
/// `seed + ROCK_SHAPE_SEED_OFFSET + 100 * i`.
pub const ROCK_SHAPE_SEED_OFFSET: i32 = 4000;

/// How many distinct rock shapes a scene draws from.
const SHAPE_POOL: usize = 5;

/// Golden-ratio icosahedron, subdivided once and flattened into a
/// triangle soup (three unique vertices per face, flat-shaded look).
/// Midpoints are projected back onto the unit sphere.
fn icosahedron_soup() -> Vec<Vec3> {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let v: Vec<Vec3> = [
        (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
        (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
        (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    let mut soup = Vec::with_capacity(20 * 4 * 3);
    for [a, b, c] in FACES {
        let (pa, pb, pc) = (v[a], v[b], v[c]);
        let ab = pa.midpoint(pb).normalize();
        let bc = pb.midpoint(pc).normalize();
        let ca = pc.midpoint(pa).normalize();
        soup.extend_from_slice(&[pa, ab, ca]);
        soup.extend_from_slice(&[ab, pb, bc]);
        soup.extend_from_slice(&[ca, bc, pc]);
        soup.extend_from_slice(&[ab, bc, ca]);
    }
    soup
}

/// Quantized position key; vertices within 1e-4 of each other count as
/// the same corner and must displace together.
fn position_key(p: Vec3) -> [i64; 3] {
    [
        (p.x * 1.0e4).round() as i64,
        (p.y * 1.0e4).round() as i64,
        (p.z * 1.0e4).round() as i64,
    ]
}

/// Build one boulder mesh from a shape seed.
///
/// Each unique corner position gets a radial displacement in
/// [0.7, 1.3); duplicated soup vertices at the same corner reuse it,
/// keeping the surface crack free. The Y axis is flattened for a
/// squashed silhouette.
pub fn build_rock(seed: i32) -> Mesh {
    let mut rng = SeededRng::new(seed);
    let soup = icosahedron_soup();

    let mut displacements: HashMap<[i64; 3], f32> = HashMap::new();
    for &p in &soup {
        displacements
            .entry(position_key(p))
            .or_insert_with(|| rng.range(0.7, 1.3));
    }

    let mut mesh = Mesh::with_capacity(soup.len(), soup.len());
    for &p in &soup {
        let dir = p.normalize();
        let d = displacements[&position_key(p)];
        mesh.add_vertex(Vec3::new(dir.x * d, dir.y * d * 0.7, dir.z * d));
    }
    for tri in 0..soup.len() as u32 / 3 {
        mesh.push_triangle(tri * 3, tri * 3 + 1, tri * 3 + 2);
    }
    mesh.compute_normals();
    mesh
}

/// Build the scene's pool of rock shape variants (at most five, fewer
/// if fewer rocks are placed).
pub fn build_rock_set(world_seed: i32, rock_count: usize) -> Vec<Mesh> {
    (0..SHAPE_POOL.min(rock_count))
        .map(|i| build_rock(world_seed + ROCK_SHAPE_SEED_OFFSET + 100 * i as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soup_is_once_subdivided_icosahedron() {
        let soup = icosahedron_soup();
        assert_eq!(soup.len(), 20 * 4 * 3);
        // 42 unique corners after one subdivision (12 + 30 midpoints).
        let unique: std::collections::HashSet<[i64; 3]> =
            soup.iter().map(|&p| position_key(p)).collect();
        assert_eq!(unique.len(), 42);
    }

    #[test]
    fn test_rock_deterministic() {
        let a = build_rock(4000);
        let b = build_rock(4000);
        assert_eq!(a.position_bytes(), b.position_bytes());
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_shared_corners_stay_welded() {
        let mesh = build_rock(77);
        // Group displaced vertices by their original corner: all soup
        // vertices that started at one position must land at one
        // position.
        let soup = icosahedron_soup();
        let mut landed: HashMap<[i64; 3], Vec3> = HashMap::new();
        for (orig, &out) in soup.iter().zip(&mesh.positions) {
            let key = position_key(*orig);
            match landed.get(&key) {
                None => {
                    landed.insert(key, out);
                }
                Some(&prev) => {
                    assert_eq!(prev, out, "corner {key:?} split apart");
                }
            }
        }
    }

    #[test]
    fn test_displacement_range_and_flattening() {
        let mesh = build_rock(123);
        for p in &mesh.positions {
            // Undo the Y flattening to recover the radial displacement.
            let r = Vec3::new(p.x, p.y / 0.7, p.z).length();
            assert!(r > 0.7 - 1e-4 && r < 1.3 + 1e-4, "displacement {r} out of range");
        }
    }

    #[test]
    fn test_rock_set_size_tracks_count() {
        assert_eq!(build_rock_set(42, 12).len(), 5);
        assert_eq!(build_rock_set(42, 3).len(), 3);
        assert_eq!(build_rock_set(42, 0).len(), 0);
    }

    #[test]
    fn test_rock_variants_differ() {
        let set = build_rock_set(42, 5);
        assert_ne!(set[0].position_bytes(), set[1].position_bytes());
    }
}

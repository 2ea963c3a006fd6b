//! Swaying seaweed stalks with animated leaves.
//!
//! A stalk is a tube swept along a Catmull-Rom curve whose control
//! points sway with time, so the whole tube is rebuilt every frame
//! (buffers are reused). Leaves are small blades pinned to the curve;
//! their vertices flap against an immutable base shape.

use crate::core::types::Vec3;
use crate::math::CatmullRom;
use crate::mesh::Mesh;

/// Stream offset for seaweed placement draws.
pub const SEAWEED_SEED_OFFSET: i32 = 1000;
/// Stream offset for per-stalk sway phase draws.
pub const SEAWEED_SWAY_SEED_OFFSET: i32 = 1100;

const CONTROL_POINTS: usize = 12;
const TUBE_SEGMENTS: usize = 32;
const RADIAL_SEGMENTS: usize = 8;
const LEAVES_PER_STALK: usize = 4;
const LEAF_SEGMENTS: usize = 6;
const BASE_RADIUS: f32 = 0.02;
const SWAY_AMPLITUDE: f32 = 0.12;
/// Radius reduction at the stalk tip.
const TIP_TAPER: f32 = 0.8;
const LEAF_LENGTH: f32 = 0.12;
const LEAF_WIDTH: f32 = 0.04;

/// A blade pinned to the stalk curve. `position`/`yaw`/`roll` place it
/// for the renderer; the mesh flaps in the blade's local frame.
pub struct Leaf {
    pub mesh: Mesh,
    base: Vec<Vec3>,
    pub position: Vec3,
    pub yaw: f32,
    pub roll: f32,
}

impl Leaf {
    fn new(index: usize) -> Self {
        let mut mesh = Mesh::with_capacity((LEAF_SEGMENTS + 1) * 2, LEAF_SEGMENTS * 6);
        for i in 0..=LEAF_SEGMENTS {
            let t = i as f32 / LEAF_SEGMENTS as f32;
            let x = t * LEAF_LENGTH;
            // Sine width profile, narrowing toward the tip.
            let w = LEAF_WIDTH * (t * std::f32::consts::PI).sin() * (1.0 - t * 0.3);
            mesh.add_vertex(Vec3::new(x, 0.0, -w / 2.0));
            mesh.add_vertex(Vec3::new(x, 0.0, w / 2.0));
        }
        for i in 0..LEAF_SEGMENTS as u32 {
            let a = i * 2;
            let b = a + 1;
            let c = a + 2;
            let d = a + 3;
            mesh.push_triangle(a, c, b);
            mesh.push_triangle(b, c, d);
        }
        mesh.compute_normals();

        // Alternate sides along the stalk so leaves fan out.
        let side = if index % 2 == 0 { 1.0 } else { -1.0 };
        Self {
            base: mesh.positions.clone(),
            mesh,
            position: Vec3::ZERO,
            yaw: index as f32 * std::f32::consts::PI * 0.6 + side * std::f32::consts::FRAC_PI_2,
            roll: 0.3 * side,
        }
    }

    /// Curve parameter where this leaf attaches.
    fn attach_t(index: usize) -> f32 {
        (index as f32 + 1.5) / (LEAVES_PER_STALK as f32 + 2.0)
    }

    /// Flap the blade: displacement grows with the square of the
    /// distance along the leaf, plus a smaller twist term. Always
    /// applied against the base shape, never cumulatively.
    fn animate(&mut self, time: f32, stalk_phase: f32, index: usize) {
        for (p, base) in self.mesh.positions.iter_mut().zip(&self.base) {
            let progress = base.x / LEAF_LENGTH;
            let wave_phase = time * 1.5 + stalk_phase + index as f32 * 1.2 + progress * 2.0;
            let flap = wave_phase.sin() * progress * progress * 0.008;
            let twist = (wave_phase * 0.5).sin() * progress * 0.003;
            *p = Vec3::new(base.x, base.y + flap, base.z + twist);
        }
        self.mesh.compute_normals();
    }
}

/// One seaweed stalk rooted on the terrain.
pub struct Stalk {
    /// Root point on the terrain surface.
    pub root: Vec3,
    pub height: f32,
    /// Leaf flap phase.
    pub phase: f32,
    phase_x: f32,
    phase_z: f32,
    pub mesh: Mesh,
    pub leaves: Vec<Leaf>,
}

impl Stalk {
    pub fn new(root: Vec3, height: f32, phase: f32, phase_x: f32, phase_z: f32) -> Self {
        let mut stalk = Self {
            root,
            height: height.max(0.05),
            phase,
            phase_x,
            phase_z,
            mesh: Mesh::new(),
            leaves: (0..LEAVES_PER_STALK).map(Leaf::new).collect(),
        };
        stalk.rebuild(0.0);
        stalk
    }

    /// Control points for the current sway. Sway strength grows with
    /// the square of normalized height so the base stays planted.
    fn control_points(&self, time: f32) -> Vec<Vec3> {
        (0..CONTROL_POINTS)
            .map(|i| {
                let t = i as f32 / (CONTROL_POINTS - 1) as f32;
                let sway = t * t * SWAY_AMPLITUDE;
                let offset_x = (time * 0.8 + self.phase_x + t * 2.0).sin() * sway
                    + (time * 0.5 + self.phase_x * 1.5 + t * 1.5).sin() * sway * 0.4;
                let offset_z = (time * 0.6 + self.phase_z + t * 1.8).cos() * sway
                    + (time * 0.9 + self.phase_z * 0.8 + t * 1.2).cos() * sway * 0.3;
                self.root + Vec3::new(offset_x, t * self.height, offset_z)
            })
            .collect()
    }

    /// Rebuild the swept tube and re-pin the leaves for this frame.
    pub fn rebuild(&mut self, time: f32) {
        let curve = CatmullRom::new(self.control_points(time));

        self.mesh.clear();

        // Parallel-transport frames along the curve keep rings from
        // spinning between segments.
        let mut normal = pick_perpendicular(curve.tangent(0.0));
        for s in 0..=TUBE_SEGMENTS {
            let u = s as f32 / TUBE_SEGMENTS as f32;
            let center = curve.point(u);
            let tangent = curve.tangent(u);
            normal = (normal - tangent * normal.dot(tangent)).normalize_or(pick_perpendicular(tangent));
            let binormal = tangent.cross(normal).normalize_or(Vec3::X);

            // Taper pulls ring vertices toward the spine, up to 80%
            // at the tip.
            let radius = BASE_RADIUS * (1.0 - TIP_TAPER * u);
            for r in 0..RADIAL_SEGMENTS {
                let a = r as f32 / RADIAL_SEGMENTS as f32 * std::f32::consts::TAU;
                let dir = normal * a.cos() + binormal * a.sin();
                self.mesh.add_vertex(center + dir * radius);
            }
        }
        for s in 0..TUBE_SEGMENTS as u32 {
            for r in 0..RADIAL_SEGMENTS as u32 {
                let r1 = (r + 1) % RADIAL_SEGMENTS as u32;
                let a = s * RADIAL_SEGMENTS as u32 + r;
                let b = s * RADIAL_SEGMENTS as u32 + r1;
                let c = (s + 1) * RADIAL_SEGMENTS as u32 + r1;
                let d = (s + 1) * RADIAL_SEGMENTS as u32 + r;
                self.mesh.push_quad(a, b, c, d);
            }
        }
        self.mesh.compute_normals();

        for i in 0..self.leaves.len() {
            let at = curve.point(Leaf::attach_t(i));
            let leaf = &mut self.leaves[i];
            leaf.position = at;
            leaf.animate(time, self.phase, i);
        }
    }
}

/// Any unit vector perpendicular to `v`.
fn pick_perpendicular(v: Vec3) -> Vec3 {
    let candidate = if v.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    v.cross(candidate).normalize_or(Vec3::X)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stalk() -> Stalk {
        Stalk::new(Vec3::new(0.5, -0.9, -0.2), 0.8, 1.0, 2.0, 3.0)
    }

    #[test]
    fn test_tube_counts() {
        let s = stalk();
        assert_eq!(s.mesh.vertex_count(), (TUBE_SEGMENTS + 1) * RADIAL_SEGMENTS);
        assert_eq!(s.mesh.triangle_count(), TUBE_SEGMENTS * RADIAL_SEGMENTS * 2);
        assert_eq!(s.leaves.len(), LEAVES_PER_STALK);
    }

    #[test]
    fn test_base_ring_centered_on_root() {
        let s = stalk();
        let ring = &s.mesh.positions[..RADIAL_SEGMENTS];
        let center = ring.iter().sum::<Vec3>() / RADIAL_SEGMENTS as f32;
        assert!((center - s.root).length() < 1e-3, "base ring center {center:?}");
    }

    #[test]
    fn test_taper_narrows_toward_tip() {
        let s = stalk();
        let ring_radius = |ring: usize| {
            let verts = &s.mesh.positions[ring * RADIAL_SEGMENTS..(ring + 1) * RADIAL_SEGMENTS];
            let center = verts.iter().sum::<Vec3>() / RADIAL_SEGMENTS as f32;
            verts.iter().map(|v| (*v - center).length()).sum::<f32>() / RADIAL_SEGMENTS as f32
        };
        let base = ring_radius(0);
        let tip = ring_radius(TUBE_SEGMENTS);
        assert!((base - BASE_RADIUS).abs() < 1e-4);
        assert!((tip - BASE_RADIUS * (1.0 - TIP_TAPER)).abs() < 1e-4);
    }

    #[test]
    fn test_rebuild_deterministic_for_time() {
        let mut a = stalk();
        let mut b = stalk();
        a.rebuild(2.5);
        b.rebuild(2.5);
        assert_eq!(a.mesh.position_bytes(), b.mesh.position_bytes());
    }

    #[test]
    fn test_sway_moves_tip_not_root() {
        let mut s = stalk();
        let tip_before = s.mesh.positions[TUBE_SEGMENTS * RADIAL_SEGMENTS];
        let root_ring_before: Vec<Vec3> = s.mesh.positions[..RADIAL_SEGMENTS].to_vec();
        s.rebuild(4.0);
        let tip_after = s.mesh.positions[TUBE_SEGMENTS * RADIAL_SEGMENTS];
        let root_ring_after: Vec<Vec3> = s.mesh.positions[..RADIAL_SEGMENTS].to_vec();
        assert!((tip_after - tip_before).length() > 1e-4, "tip should sway");
        for (a, b) in root_ring_before.iter().zip(&root_ring_after) {
            assert!((*a - *b).length() < 1e-3, "root ring should stay planted");
        }
    }

    #[test]
    fn test_leaf_blade_width_profile() {
        let leaf = Leaf::new(0);
        // Ends narrow, middle wide.
        let width_at = |i: usize| (leaf.base[i * 2 + 1].z - leaf.base[i * 2].z).abs();
        assert!(width_at(0) < 1e-6);
        assert!(width_at(LEAF_SEGMENTS / 2) > 0.02);
        assert!(width_at(LEAF_SEGMENTS) < 0.02);
    }

    #[test]
    fn test_leaf_flap_is_relative_to_base() {
        let mut s = stalk();
        s.rebuild(1.0);
        let first = s.leaves[0].mesh.positions.clone();
        s.rebuild(5.0);
        s.rebuild(1.0);
        // Returning to the same time restores the same blade shape:
        // no cumulative drift.
        for (a, b) in first.iter().zip(&s.leaves[0].mesh.positions) {
            assert!((*a - *b).length() < 1e-6);
        }
    }

    #[test]
    fn test_leaves_alternate_sides() {
        let s = stalk();
        assert!(s.leaves[0].roll > 0.0);
        assert!(s.leaves[1].roll < 0.0);
        assert_ne!(s.leaves[0].yaw, s.leaves[1].yaw);
    }

    #[test]
    fn test_leaves_attached_along_curve() {
        let mut s = stalk();
        s.rebuild(0.7);
        for leaf in &s.leaves {
            let local = leaf.position - s.root;
            assert!(local.y > 0.0 && local.y < s.height);
        }
    }
}

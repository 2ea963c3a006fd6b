//! Starfish: radial shell mesh with arm undulation.

use crate::core::types::Vec3;
use crate::mesh::Mesh;

/// Stream offset for starfish placement draws.
pub const STARFISH_SEED_OFFSET: i32 = 5000;
/// Stream offset for per-starfish shade jitter draws.
pub const STARFISH_SHADE_SEED_OFFSET: i32 = 5100;

const ARMS: usize = 5;
const ARM_LENGTH: f32 = 1.0;
const CENTER_RADIUS: f32 = 0.25;
const VALLEY_RADIUS: f32 = CENTER_RADIUS * 0.6;
const THICKNESS: f32 = 0.08;
const ARM_SEGMENTS: usize = 4;

/// Radial outline: spine points marching out along each arm, with a
/// valley point tucked between neighboring arms.
fn profile_points() -> Vec<(f32, f32)> {
    let mut points = Vec::with_capacity(ARMS * (ARM_SEGMENTS + 2));
    for a in 0..ARMS {
        let arm_angle = a as f32 / ARMS as f32 * std::f32::consts::TAU;
        let next_angle = (a + 1) as f32 / ARMS as f32 * std::f32::consts::TAU;
        let mid_angle = (arm_angle + next_angle) / 2.0;

        for s in 0..=ARM_SEGMENTS {
            let t = s as f32 / ARM_SEGMENTS as f32;
            let dist = CENTER_RADIUS + t * (ARM_LENGTH - CENTER_RADIUS);
            points.push((arm_angle.cos() * dist, arm_angle.sin() * dist));
        }
        points.push((mid_angle.cos() * VALLEY_RADIUS, mid_angle.sin() * VALLEY_RADIUS));
    }
    points
}

/// Build the unit starfish shell: top and bottom fans from the center
/// plus side quads closing the rim. The bottom sits closer to the
/// ground than the top bulges up.
pub fn build_starfish() -> Mesh {
    let profile = profile_points();
    let n = profile.len();

    let mut mesh = Mesh::with_capacity(2 + 2 * n, 4 * n * 3 + 2 * n * 3);
    let top_center = mesh.add_vertex(Vec3::new(0.0, THICKNESS, 0.0));
    let bottom_center = mesh.add_vertex(Vec3::new(0.0, -THICKNESS * 0.5, 0.0));

    let top_start = mesh.vertex_count() as u32;
    for &(x, z) in &profile {
        mesh.add_vertex(Vec3::new(x, THICKNESS * 0.5, z));
    }
    let bottom_start = mesh.vertex_count() as u32;
    for &(x, z) in &profile {
        mesh.add_vertex(Vec3::new(x, -THICKNESS * 0.3, z));
    }

    for i in 0..n as u32 {
        let j = (i + 1) % n as u32;
        // Top fan, normals up; bottom fan reversed.
        mesh.push_triangle(top_center, top_start + j, top_start + i);
        mesh.push_triangle(bottom_center, bottom_start + i, bottom_start + j);
        // Side quads connect the rims.
        mesh.push_quad(
            top_start + i,
            top_start + j,
            bottom_start + j,
            bottom_start + i,
        );
    }

    mesh.compute_normals();
    mesh
}

/// A starfish with per-frame arm undulation.
///
/// The undisplaced base shape is snapshotted at construction and every
/// update displaces against it, so the animation cannot drift no
/// matter how updates are ordered or skipped.
pub struct Starfish {
    pub mesh: Mesh,
    base: Vec<Vec3>,
    pub phase: f32,
}

impl Starfish {
    pub fn new(phase: f32) -> Self {
        let mesh = build_starfish();
        Self {
            base: mesh.positions.clone(),
            mesh,
            phase,
        }
    }

    /// Undulate the arms: vertical wave whose amplitude grows with
    /// distance from the center, so the disc stays put while arm tips
    /// lift and fall.
    pub fn update(&mut self, time: f32) {
        for (p, base) in self.mesh.positions.iter_mut().zip(&self.base) {
            let dist = (base.x * base.x + base.z * base.z).sqrt();
            let wave = (time * 0.5 + self.phase + dist * 3.0).sin() * dist * 0.03;
            *p = Vec3::new(base.x, base.y + wave, base.z);
        }
        self.mesh.compute_normals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_alternates_arms_and_valleys() {
        let profile = profile_points();
        assert_eq!(profile.len(), ARMS * (ARM_SEGMENTS + 2));
        // Each arm group ends with a short valley point.
        for arm in profile.chunks(ARM_SEGMENTS + 2) {
            let tip = arm[ARM_SEGMENTS];
            let valley = arm[ARM_SEGMENTS + 1];
            let tip_r = (tip.0 * tip.0 + tip.1 * tip.1).sqrt();
            let valley_r = (valley.0 * valley.0 + valley.1 * valley.1).sqrt();
            assert!((tip_r - ARM_LENGTH).abs() < 1e-5);
            assert!((valley_r - VALLEY_RADIUS).abs() < 1e-5);
        }
    }

    #[test]
    fn test_shell_counts() {
        let mesh = build_starfish();
        let n = ARMS * (ARM_SEGMENTS + 2);
        assert_eq!(mesh.vertex_count(), 2 + 2 * n);
        // n top fan + n bottom fan + 2n side triangles.
        assert_eq!(mesh.triangle_count(), 4 * n);
    }

    #[test]
    fn test_center_normals_vertical() {
        let mesh = build_starfish();
        assert!(mesh.normals[0].y > 0.9, "top center {:?}", mesh.normals[0]);
        assert!(mesh.normals[1].y < -0.9, "bottom center {:?}", mesh.normals[1]);
    }

    #[test]
    fn test_update_is_relative_to_snapshot() {
        let mut a = Starfish::new(0.7);
        let mut b = Starfish::new(0.7);
        // Different update histories, same final time.
        a.update(1.0);
        a.update(9.0);
        a.update(4.2);
        b.update(4.2);
        assert_eq!(a.mesh.position_bytes(), b.mesh.position_bytes());
    }

    #[test]
    fn test_center_stays_put_tips_move() {
        let mut sf = Starfish::new(0.0);
        let tip_idx = 2 + ARM_SEGMENTS; // top-rim tip of the first arm
        let center_before = sf.mesh.positions[0];
        let tip_before = sf.mesh.positions[tip_idx];
        sf.update(2.0);
        assert_eq!(sf.mesh.positions[0], center_before);
        assert_ne!(sf.mesh.positions[tip_idx], tip_before);
    }

    #[test]
    fn test_wave_amplitude_grows_with_distance() {
        let mut sf = Starfish::new(0.0);
        sf.update(1.3);
        let max_lift = sf
            .mesh
            .positions
            .iter()
            .zip(&sf.base)
            .map(|(p, b)| (p.y - b.y).abs())
            .fold(0.0f32, f32::max);
        assert!(max_lift <= ARM_LENGTH * 0.03 + 1e-6);
        assert!(max_lift > 0.0);
    }

    #[test]
    fn test_phase_differentiates_instances() {
        let mut a = Starfish::new(0.0);
        let mut b = Starfish::new(2.0);
        a.update(1.0);
        b.update(1.0);
        assert_ne!(a.mesh.position_bytes(), b.mesh.position_bytes());
    }
}

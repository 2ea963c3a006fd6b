//! Catmull-Rom spline through a fixed set of control points.

use crate::core::types::Vec3;

/// Interpolating spline over `[0, 1]` with clamped endpoints.
///
/// Uniform parametrization; endpoint segments reuse the boundary point
/// as its own neighbor so the curve passes through the first and last
/// control points without overshoot.
#[derive(Clone, Debug)]
pub struct CatmullRom {
    points: Vec<Vec3>,
}

impl CatmullRom {
    /// Fit a spline through the given points. Fewer than two points are
    /// padded by repetition so sampling stays well defined.
    pub fn new(mut points: Vec<Vec3>) -> Self {
        while points.len() < 2 {
            let p = points.last().copied().unwrap_or(Vec3::ZERO);
            points.push(p);
        }
        Self { points }
    }

    /// Evaluate the curve at `t` in `[0, 1]` (clamped).
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let s = t.clamp(0.0, 1.0) * (n - 1) as f32;
        let i = (s.floor() as usize).min(n - 2);
        let u = s - i as f32;

        let p0 = self.points[i.saturating_sub(1)];
        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p3 = self.points[(i + 2).min(n - 1)];

        let u2 = u * u;
        let u3 = u2 * u;
        0.5 * ((2.0 * p1)
            + (p2 - p0) * u
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
    }

    /// Unit tangent at `t`, by central differences.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let eps = 1e-3;
        let ahead = self.point((t + eps).min(1.0));
        let behind = self.point((t - eps).max(0.0));
        (ahead - behind).normalize_or(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_endpoints() {
        let curve = CatmullRom::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 1.0),
        ]);
        assert!((curve.point(0.0) - Vec3::ZERO).length() < 1e-6);
        assert!((curve.point(1.0) - Vec3::new(2.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_interior_control_points_hit() {
        let mid = Vec3::new(0.3, 1.0, -0.2);
        let curve = CatmullRom::new(vec![Vec3::ZERO, mid, Vec3::new(0.0, 2.0, 0.0)]);
        assert!((curve.point(0.5) - mid).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_input_padded() {
        let curve = CatmullRom::new(vec![Vec3::ONE]);
        assert_eq!(curve.point(0.0), Vec3::ONE);
        assert_eq!(curve.point(0.7), Vec3::ONE);
    }

    #[test]
    fn test_tangent_points_along_curve() {
        let curve = CatmullRom::new(vec![
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ]);
        let tan = curve.tangent(0.5);
        assert!(tan.y > 0.99, "straight vertical curve should have vertical tangent, got {tan:?}");
    }
}

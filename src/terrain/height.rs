//! Noise-based seabed height field.

use noise::{NoiseFn, Perlin};

/// Deterministic terrain height function.
///
/// Every consumer of ground height for a given world seed must share a
/// `HeightField` built from that seed: the mesh builder, the
/// water-volume floor and the placement engine all sample this exact
/// two-octave weighting, or placed objects drift off the surface.
pub struct HeightField {
    noise: Perlin,
    floor_y: f32,
}

impl HeightField {
    /// Create a height field from a world seed and the base elevation
    /// of the undisturbed seabed plane.
    pub fn new(seed: i32, floor_y: f32) -> Self {
        Self {
            noise: Perlin::new(seed as u32),
            floor_y,
        }
    }

    /// Raw smooth noise in [-1, 1] at arbitrary coordinates.
    pub fn noise_at(&self, x: f32, z: f32) -> f32 {
        self.noise.get([x as f64, z as f64]) as f32
    }

    /// Two-octave terrain relief, excluding the floor plane:
    /// a broad dune layer plus finer surface detail.
    pub fn relief_at(&self, x: f32, z: f32) -> f32 {
        self.noise_at(x * 0.3, z * 0.3) * 0.15 + self.noise_at(x * 0.7, z * 0.7) * 0.05
    }

    /// World-space terrain height at (x, z).
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.floor_y + self.relief_at(x, z)
    }

    /// Base elevation of the undisturbed seabed plane.
    pub fn floor_y(&self) -> f32 {
        self.floor_y
    }
}

//! Traveling-wave approximation of the open water surface.

/// Stateless wave function: two crossed sine waves moving at different
/// speeds over a flat rest level. Ripples are added separately.
#[derive(Clone, Copy, Debug)]
pub struct WaveField {
    pub water_level: f32,
}

impl WaveField {
    pub fn new(water_level: f32) -> Self {
        Self { water_level }
    }

    /// Instantaneous surface height at (x, z), ripples excluded.
    pub fn height_at(&self, x: f32, z: f32, time: f32) -> f32 {
        self.water_level
            + (2.0 * x + time).sin() * 0.15
            + (1.5 * z + 0.8 * time).sin() * 0.12
    }
}

//! Deterministic seeded random stream.
//!
//! A mulberry32-step integer mixer: pure, fast, and reproducible, with
//! no external entropy. Every population in the scene owns its own
//! stream, seeded from the world seed plus a fixed per-feature offset,
//! so streams never collide yet the whole scene regenerates from one
//! root seed.

/// Seeded pseudo-random generator yielding `f32` values in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: i32) -> Self {
        Self { state: seed as u32 }
    }

    /// Next value in `[0, 1)`. Advances the stream.
    pub fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_add(0x6D2B79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        // Keep 24 bits so the f32 division cannot round up to 1.0.
        ((t ^ (t >> 14)) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform draw in `[min, max)`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform angle in `[0, 2π)`.
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * std::f32::consts::TAU
    }

    /// Uniform draw in `[-0.5, 0.5)`, handy for jitter around a center.
    pub fn signed(&mut self) -> f32 {
        self.next_f32() - 0.5
    }
}

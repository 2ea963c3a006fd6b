//! Rising bubble field that feeds surface ripples.
//!
//! Bubbles rise from the seabed, wobble laterally, and on breaking the
//! water surface push a ripple event and restart from the floor. Each
//! bubble owns its own rise state; nothing else mutates it.

use crate::core::types::Vec3;
use crate::rng::SeededRng;
use crate::terrain::HeightField;
use crate::water::{Ripples, WaveField};

/// Stream offset for bubble placement draws.
pub const BUBBLE_SEED_OFFSET: i32 = 3000;

/// Clamp on the per-frame timestep so a host hitch cannot teleport
/// every bubble through the surface at once.
const MAX_STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug)]
pub struct Bubble {
    pub position: Vec3,
    pub size: f32,
    base_x: f32,
    base_z: f32,
    speed: f32,
    wobble_phase: f32,
    wobble_freq: f32,
}

/// Bubble population inputs. Negative counts place nothing; inverted
/// ranges are swapped.
#[derive(Clone, Debug)]
pub struct BubbleParams {
    pub count: i32,
    /// Side length of the square footprint bubbles rise within.
    pub region: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for BubbleParams {
    fn default() -> Self {
        Self {
            count: 40,
            region: 4.0,
            min_size: 0.01,
            max_size: 0.04,
            min_speed: 0.1,
            max_speed: 0.3,
        }
    }
}

pub struct BubbleField {
    bubbles: Vec<Bubble>,
    last_time: f32,
}

impl BubbleField {
    /// Seed a bubble population, stratified over the four footprint
    /// quadrants so no corner of the scene goes without bubbles.
    /// `seed` is the already-derived bubble stream seed.
    pub fn new(seed: i32, params: &BubbleParams, height: &HeightField) -> Self {
        let count = params.count.max(0) as usize;
        let (min_size, max_size) = ordered(params.min_size, params.max_size);
        let (min_speed, max_speed) = ordered(params.min_speed, params.max_speed);

        let mut rng = SeededRng::new(seed);
        let mut bubbles = Vec::with_capacity(count);
        for i in 0..count {
            let quadrant = i % 4;
            let qx = if quadrant % 2 == 0 { -1.0 } else { 1.0 };
            let qz = if quadrant < 2 { -1.0 } else { 1.0 };
            let base_x = qx * rng.next_f32() * params.region * 0.5;
            let base_z = qz * rng.next_f32() * params.region * 0.5;
            // Stagger start heights so the column is filled from the
            // first frame.
            let start_y = height.floor_y() + rng.next_f32() * 1.5;
            let size = rng.range(min_size, max_size);
            let speed = rng.range(min_speed, max_speed);
            bubbles.push(Bubble {
                position: Vec3::new(base_x, start_y, base_z),
                size,
                base_x,
                base_z,
                speed,
                wobble_phase: rng.angle(),
                wobble_freq: 1.0 + rng.next_f32() * 2.0,
            });
        }

        Self {
            bubbles,
            last_time: 0.0,
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Advance the population to `time`. Bubbles reaching the wave
    /// surface push a ripple into `ripples` and restart from the
    /// terrain floor at their current (x, z).
    pub fn update(
        &mut self,
        time: f32,
        waves: &WaveField,
        height: &HeightField,
        ripples: &mut Ripples,
    ) {
        let dt = (time - self.last_time).clamp(0.0, MAX_STEP);
        self.last_time = time;

        for b in &mut self.bubbles {
            b.position.y += b.speed * dt;
            let wobble = (time * b.wobble_freq + b.wobble_phase).sin();
            b.position.x = b.base_x + wobble * 0.03;
            b.position.z =
                b.base_z + (time * b.wobble_freq * 0.7 + b.wobble_phase).cos() * 0.02;

            let surface = waves.height_at(b.position.x, b.position.z, time);
            if b.position.y > surface - b.size * 2.0 {
                ripples.add(b.position.x, b.position.z, b.size * 20.0, time);
                b.position.y = height.height_at(b.position.x, b.position.z) + b.size;
            }
        }
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

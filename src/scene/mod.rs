//! Scene facade: builds every population from one config and runs the
//! per-frame simulation pass.
//!
//! The facade owns the ripple log and all generated buffers. A host
//! renderer reads the meshes/instances after `update` and draws them;
//! nothing here knows about cameras, lights or materials beyond the
//! palette names carried in the config.

pub mod config;

pub use config::{PaletteColor, PaletteName, SceneConfig};

use crate::bubbles::{BubbleField, BubbleParams, BUBBLE_SEED_OFFSET};
use crate::mesh::Mesh;
use crate::organics::rock::{build_rock_set, ROCK_SEED_OFFSET, ROCK_TILT_SEED_OFFSET};
use crate::organics::seaweed::{Stalk, SEAWEED_SEED_OFFSET, SEAWEED_SWAY_SEED_OFFSET};
use crate::organics::starfish::{Starfish, STARFISH_SEED_OFFSET, STARFISH_SHADE_SEED_OFFSET};
use crate::rng::SeededRng;
use crate::scatter::{place_instances, Instance, ScatterParams, ScatterPolicy};
use crate::terrain::{build_terrain, HeightField, TerrainParams};
use crate::water::{Ripples, WaterParams, WaterSurface, WaterVolume};

/// A rock placement: the shared instance fields plus the extra tilt
/// axes rocks get and the index into the shape pool.
pub struct PlacedRock {
    pub instance: Instance,
    pub tilt_x: f32,
    pub tilt_z: f32,
    pub shape: usize,
}

/// A starfish placement with its animated body and a shade delta the
/// host applies to the configured palette color.
pub struct PlacedStarfish {
    pub instance: Instance,
    pub shade_jitter: i8,
    pub body: Starfish,
}

pub struct Scene {
    config: SceneConfig,
    height: HeightField,
    pub terrain: Mesh,
    pub water_surface: WaterSurface,
    pub water_volume: WaterVolume,
    pub rock_shapes: Vec<Mesh>,
    pub rocks: Vec<PlacedRock>,
    pub seaweed: Vec<Stalk>,
    pub starfish: Vec<PlacedStarfish>,
    pub bubbles: BubbleField,
    pub ripples: Ripples,
}

impl Scene {
    /// Build every mesh and population from the configuration.
    pub fn new(config: &SceneConfig) -> Self {
        let config = config.clone().clamped();
        let seed = config.world.seed;
        let size = config.terrain.size;

        let height = HeightField::new(seed, config.terrain.floor_y);

        let terrain = build_terrain(
            &height,
            &TerrainParams {
                size,
                segments: config.terrain.segments,
                floor_y: config.terrain.floor_y,
                thickness: config.terrain.thickness,
            },
        );

        let water_params = WaterParams {
            level: config.water.level,
            size,
            segments: config.water.segments,
        };
        let water_surface = WaterSurface::build(&water_params);
        let water_volume = WaterVolume::build(&height, &water_params);

        let rock_shapes = build_rock_set(seed, config.rocks.count as usize);
        let rock_instances = place_instances(
            ScatterPolicy::GridJitter,
            seed + ROCK_SEED_OFFSET,
            &ScatterParams {
                count: config.rocks.count,
                region: size * 0.9,
                scale_min: config.rocks.min_scale,
                scale_max: config.rocks.max_scale,
                // Lift centers by a third of scale: boulders sit half
                // buried in the sand.
                y_offset: 0.3,
                ..Default::default()
            },
            &height,
        );
        let mut tilt_rng = SeededRng::new(seed + ROCK_TILT_SEED_OFFSET);
        let shape_count = rock_shapes.len().max(1);
        let rocks = rock_instances
            .into_iter()
            .enumerate()
            .map(|(i, instance)| PlacedRock {
                instance,
                tilt_x: tilt_rng.angle(),
                // Full spin around X, mild tilt around Z.
                tilt_z: tilt_rng.next_f32() * std::f32::consts::PI * 0.3,
                shape: i % shape_count,
            })
            .collect();

        let seaweed_instances = place_instances(
            ScatterPolicy::ClusterJitter,
            seed + SEAWEED_SEED_OFFSET,
            &ScatterParams {
                count: config.seaweed.count,
                region: size * 0.8,
                scale_min: config.seaweed.min_height,
                scale_max: config.seaweed.max_height,
                y_offset: 0.0,
                cluster_radius: 0.25,
            },
            &height,
        );
        let mut sway_rng = SeededRng::new(seed + SEAWEED_SWAY_SEED_OFFSET);
        let seaweed = seaweed_instances
            .into_iter()
            .map(|inst| {
                let phase_x = sway_rng.angle();
                let phase_z = sway_rng.angle();
                Stalk::new(inst.position, inst.scale, inst.phase, phase_x, phase_z)
            })
            .collect();

        let starfish_instances = place_instances(
            ScatterPolicy::GridJitter,
            seed + STARFISH_SEED_OFFSET,
            &ScatterParams {
                count: config.creatures.starfish_count,
                region: size * 0.7,
                scale_min: 0.1,
                scale_max: 0.18,
                y_offset: 0.1,
                ..Default::default()
            },
            &height,
        );
        let mut shade_rng = SeededRng::new(seed + STARFISH_SHADE_SEED_OFFSET);
        let starfish = starfish_instances
            .into_iter()
            .map(|instance| PlacedStarfish {
                body: Starfish::new(instance.phase),
                shade_jitter: (shade_rng.next_f32() * 3.0).floor() as i8 - 1,
                instance,
            })
            .collect();

        let bubbles = BubbleField::new(
            seed + BUBBLE_SEED_OFFSET,
            &BubbleParams {
                count: config.bubbles.count,
                region: size,
                min_size: config.bubbles.min_size,
                max_size: config.bubbles.max_size,
                min_speed: config.bubbles.min_speed,
                max_speed: config.bubbles.max_speed,
            },
            &height,
        );

        let scene = Self {
            config,
            height,
            terrain,
            water_surface,
            water_volume,
            rock_shapes,
            rocks,
            seaweed,
            starfish,
            bubbles,
            ripples: Ripples::new(),
        };
        log::info!(
            "scene built: seed {}, terrain {} verts, {} rocks, {} seaweed, {} starfish, {} bubbles",
            seed,
            scene.terrain.vertex_count(),
            scene.rocks.len(),
            scene.seaweed.len(),
            scene.starfish.len(),
            scene.bubbles.bubbles().len(),
        );
        scene
    }

    /// One synchronous simulation pass for the frame at `time`
    /// (monotonic seconds since the scene started animating).
    pub fn update(&mut self, time: f32) {
        let time = if time.is_finite() { time } else { 0.0 };

        self.ripples.prune(time);
        self.bubbles.update(
            time,
            self.water_surface.waves(),
            &self.height,
            &mut self.ripples,
        );
        self.water_surface.update(time, &self.ripples);
        self.water_volume.update(time, &self.ripples);
        for stalk in &mut self.seaweed {
            stalk.rebuild(time);
        }
        for placed in &mut self.starfish {
            placed.body.update(time);
        }
    }

    /// Rebuild everything from a new configuration. The previous
    /// buffers are dropped wholesale as the new scene is installed;
    /// nothing is patched in place.
    pub fn regenerate(&mut self, config: &SceneConfig) {
        log::info!("regenerating scene (seed {})", config.world.seed);
        *self = Self::new(config);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The height field every placement and mesh in this scene shares.
    pub fn height_field(&self) -> &HeightField {
        &self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_scene() {
        let scene = Scene::new(&SceneConfig::default());
        assert_eq!(scene.rocks.len(), 12);
        assert_eq!(scene.seaweed.len(), 20);
        assert_eq!(scene.starfish.len(), 6);
        assert_eq!(scene.bubbles.bubbles().len(), 40);
        assert_eq!(scene.rock_shapes.len(), 5);
        assert!(scene.terrain.vertex_count() > 0);
    }

    #[test]
    fn test_same_config_same_scene() {
        let a = Scene::new(&SceneConfig::default());
        let b = Scene::new(&SceneConfig::default());
        assert_eq!(a.terrain.position_bytes(), b.terrain.position_bytes());
        for (ra, rb) in a.rocks.iter().zip(&b.rocks) {
            assert_eq!(ra.instance, rb.instance);
            assert_eq!((ra.tilt_x, ra.tilt_z, ra.shape), (rb.tilt_x, rb.tilt_z, rb.shape));
        }
        for (sa, sb) in a.seaweed.iter().zip(&b.seaweed) {
            assert_eq!(sa.root, sb.root);
            assert_eq!(sa.mesh.position_bytes(), sb.mesh.position_bytes());
        }
    }

    #[test]
    fn test_seed_changes_everything() {
        let mut config = SceneConfig::default();
        let a = Scene::new(&config);
        config.world.seed = 43;
        let b = Scene::new(&config);
        assert_ne!(a.terrain.position_bytes(), b.terrain.position_bytes());
        assert_ne!(a.rocks[0].instance, b.rocks[0].instance);
    }

    #[test]
    fn test_update_smoke() {
        let mut scene = Scene::new(&SceneConfig::default());
        for frame in 1..=10 {
            scene.update(frame as f32 * 0.016);
        }
        // Water followed the wave function.
        let waves = *scene.water_surface.waves();
        let t = 10.0 * 0.016;
        let moved = scene
            .water_surface
            .mesh()
            .positions
            .iter()
            .filter(|p| (p.y - waves.water_level).abs() > 1e-4)
            .count();
        assert!(moved > 0, "surface should be displaced at t={t}");
    }

    #[test]
    fn test_update_deterministic_across_scenes() {
        let mut a = Scene::new(&SceneConfig::default());
        let mut b = Scene::new(&SceneConfig::default());
        for frame in 1..=5 {
            a.update(frame as f32 * 0.02);
            b.update(frame as f32 * 0.02);
        }
        assert_eq!(
            a.water_surface.mesh().position_bytes(),
            b.water_surface.mesh().position_bytes()
        );
        assert_eq!(
            a.seaweed[0].mesh.position_bytes(),
            b.seaweed[0].mesh.position_bytes()
        );
    }

    #[test]
    fn test_instances_pinned_to_height_field() {
        let scene = Scene::new(&SceneConfig::default());
        let height = scene.height_field();
        for rock in &scene.rocks {
            let p = rock.instance.position;
            let expected = height.height_at(p.x, p.z) + rock.instance.scale * 0.3;
            assert!((p.y - expected).abs() < 1e-6);
        }
        for stalk in &scene.seaweed {
            let expected = height.height_at(stalk.root.x, stalk.root.z);
            assert!((stalk.root.y - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_non_finite_time_is_harmless() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.update(f32::NAN);
        for p in &scene.water_surface.mesh().positions {
            assert!(p.y.is_finite());
        }
    }

    #[test]
    fn test_regenerate_replaces_populations() {
        let mut scene = Scene::new(&SceneConfig::default());
        let mut config = SceneConfig::default();
        config.rocks.count = 3;
        config.seaweed.count = 0;
        scene.regenerate(&config);
        assert_eq!(scene.rocks.len(), 3);
        assert!(scene.seaweed.is_empty());
        assert_eq!(scene.config().rocks.count, 3);
    }

    #[test]
    fn test_zeroed_scene_still_updates() {
        let mut config = SceneConfig::default();
        config.rocks.count = 0;
        config.seaweed.count = 0;
        config.bubbles.count = 0;
        config.creatures.starfish_count = 0;
        let mut scene = Scene::new(&config);
        scene.update(1.0);
        assert!(scene.rock_shapes.is_empty());
        assert!(scene.ripples.is_empty());
    }

    #[test]
    fn test_shade_jitter_in_range() {
        let scene = Scene::new(&SceneConfig::default());
        for placed in &scene.starfish {
            assert!((-1..=1).contains(&placed.shade_jitter));
        }
    }
}

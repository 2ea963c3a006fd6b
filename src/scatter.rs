//! Seeded instance placement over the terrain surface.
//!
//! Two scatter policies cover the scene's populations: an evenly
//! spread jittered grid (creatures, rocks) and center-biased clusters
//! (seaweed tufts). Both read the shared height field so every
//! instance sits on the ground it was placed over, and both consume a
//! private seeded stream with a fixed per-instance draw order, so a
//! (seed, count, params) triple always reproduces the same set.

use crate::core::types::Vec3;
use crate::rng::SeededRng;
use crate::terrain::HeightField;

/// One placed copy of a decorative object.
///
/// `phase` only feeds animation; geometry identity comes from the
/// placement fields. Instance sets are regenerated wholesale on any
/// seed/count/parameter change, never patched in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub position: Vec3,
    /// Rotation around +Y, radians.
    pub yaw: f32,
    pub scale: f32,
    /// Animation phase offset, radians.
    pub phase: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScatterPolicy {
    /// One instance per cell of a jittered grid; even spread.
    GridJitter,
    /// Clustered tufts; members crowd toward their cluster center.
    ClusterJitter,
}

/// Placement inputs. Invalid values degrade gracefully: negative
/// counts place nothing and inverted scale ranges are swapped.
#[derive(Clone, Debug)]
pub struct ScatterParams {
    pub count: i32,
    /// Side length of the square footprint instances may occupy.
    pub region: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Vertical offset as a fraction of instance scale; positive lifts
    /// (or embeds, for partially buried shapes) relative to the ground.
    pub y_offset: f32,
    /// Spread radius around each cluster center (ClusterJitter only).
    pub cluster_radius: f32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            count: 8,
            region: 3.2,
            scale_min: 0.1,
            scale_max: 0.2,
            y_offset: 0.0,
            cluster_radius: 0.25,
        }
    }
}

/// Place `params.count` instances on the terrain under the given policy.
pub fn place_instances(
    policy: ScatterPolicy,
    seed: i32,
    params: &ScatterParams,
    height: &HeightField,
) -> Vec<Instance> {
    let count = params.count.max(0) as usize;
    if count == 0 {
        return Vec::new();
    }
    let (scale_min, scale_max) = if params.scale_min <= params.scale_max {
        (params.scale_min, params.scale_max)
    } else {
        (params.scale_max, params.scale_min)
    };

    let mut rng = SeededRng::new(seed);
    let mut instances = Vec::with_capacity(count);

    match policy {
        ScatterPolicy::GridJitter => {
            let cols = (count as f32).sqrt().ceil() as usize;
            let cell = params.region / cols as f32;
            for i in 0..count {
                let gx = (i % cols) as f32;
                let gz = (i / cols) as f32;
                let base_x = (gx - cols as f32 / 2.0 + 0.5) * cell;
                let base_z = (gz - cols as f32 / 2.0 + 0.5) * cell;
                let x = base_x + rng.signed() * cell * 0.8;
                let z = base_z + rng.signed() * cell * 0.8;
                instances.push(make_instance(
                    x, z, &mut rng, scale_min, scale_max, params.y_offset, height,
                ));
            }
        }
        ScatterPolicy::ClusterJitter => {
            let cluster_count = (count / 4).max(1);
            let per_cluster = count.div_ceil(cluster_count);
            for _ in 0..cluster_count {
                let cx = rng.signed() * params.region;
                let cz = rng.signed() * params.region;
                let in_cluster = per_cluster.min(count - instances.len());
                for _ in 0..in_cluster {
                    let angle = rng.angle();
                    // r1 * r2 skews members toward the cluster center.
                    let dist = rng.next_f32() * rng.next_f32() * params.cluster_radius;
                    let x = cx + angle.cos() * dist;
                    let z = cz + angle.sin() * dist;
                    instances.push(make_instance(
                        x, z, &mut rng, scale_min, scale_max, params.y_offset, height,
                    ));
                }
            }
        }
    }

    instances
}

/// Shared tail of both policies: draw scale, yaw, phase (in that fixed
/// order) and pin the instance to the terrain surface.
fn make_instance(
    x: f32,
    z: f32,
    rng: &mut SeededRng,
    scale_min: f32,
    scale_max: f32,
    y_offset: f32,
    height: &HeightField,
) -> Instance {
    let scale = rng.range(scale_min, scale_max);
    let yaw = rng.angle();
    let phase = rng.angle();
    Instance {
        position: Vec3::new(x, height.height_at(x, z) + scale * y_offset, z),
        yaw,
        scale,
        phase,
    }
}

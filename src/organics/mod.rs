//! Organic mesh builders: rocks, seaweed and starfish.
//!
//! Rocks are built once per shape seed. Seaweed stalks and starfish
//! carry per-frame animation: stalks rebuild their swept tube every
//! frame (the underlying curve changes continuously), starfish
//! displace against a base-shape snapshot taken at construction.

pub mod rock;
pub mod seaweed;
pub mod starfish;

pub use rock::{build_rock, build_rock_set, ROCK_SEED_OFFSET, ROCK_SHAPE_SEED_OFFSET};
pub use seaweed::{Leaf, Stalk, SEAWEED_SEED_OFFSET, SEAWEED_SWAY_SEED_OFFSET};
pub use starfish::{build_starfish, Starfish, STARFISH_SEED_OFFSET, STARFISH_SHADE_SEED_OFFSET};

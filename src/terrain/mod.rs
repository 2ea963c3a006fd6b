//! Seabed terrain: seeded height field and slab mesh builder.

pub mod height;
pub mod mesh;

pub use height::HeightField;
pub use mesh::{build_terrain, TerrainParams};

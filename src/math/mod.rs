//! Mathematical utilities and data structures

pub mod aabb;
pub mod curve;

pub use aabb::Aabb;
pub use curve::CatmullRom;

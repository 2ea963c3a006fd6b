//! Water: traveling waves, transient ripples, and the two water meshes.
//!
//! The surface grid and the volume shell are built once; each frame
//! only their exposed vertices are re-set to the combined wave + ripple
//! height and normals recomputed. The ripple log is the single piece of
//! cross-component mutable state in the engine: bubbles write to it,
//! both water meshes read it.

pub mod ripple;
pub mod surface;
pub mod volume;
pub mod waves;

pub use ripple::{RippleEvent, Ripples, RIPPLE_CAP, RIPPLE_DURATION};
pub use surface::{WaterParams, WaterSurface};
pub use volume::WaterVolume;
pub use waves::WaveField;

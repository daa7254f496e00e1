//! Renderable resource definitions
//!
//! Plain CPU-side data that actor templates are built from:
//! - [`Mesh`]: indexed triangle geometry shared between template and instances
//! - [`BoundingBox`]: axis-aligned bounds used for camera framing
//! - [`primitives`]: procedural meshes for tests and demos

pub mod geometry;
pub mod primitives;

pub use geometry::{BoundingBox, Mesh};

//! Off-screen rendering
//!
//! - [`RenderTarget`]: RGBA8 color plus depth, owned through a [`RenderSurface`]
//! - [`FrameBuffer`]: the non-owning handle a session hands to callers
//! - [`SoftwareRenderer`]: deterministic CPU rasterizer that draws an actor

pub mod rasterizer;
pub mod target;

pub use rasterizer::SoftwareRenderer;
pub use target::{BYTES_PER_PIXEL, FrameBuffer, RenderSurface, RenderTarget};

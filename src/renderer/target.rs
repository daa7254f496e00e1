use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::errors::{PreviewError, Result};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Off-screen RGBA8 color buffer with a matching depth buffer.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    width: u32,
    height: u32,
    color: Vec<u8>,
    depth: Vec<f32>,
    frame_index: u64,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PreviewError::SurfaceCreation(format!(
                "render target must be non-empty, got {width}x{height}"
            )));
        }
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .filter(|p| p.checked_mul(BYTES_PER_PIXEL).is_some())
            .ok_or_else(|| {
                PreviewError::SurfaceCreation(format!("render target {width}x{height} is too large"))
            })?;

        Ok(Self {
            width,
            height,
            color: vec![0; pixels * BYTES_PER_PIXEL],
            depth: vec![f32::INFINITY; pixels],
            frame_index: 0,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 rows, top row first.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.color
    }

    /// Number of frames rendered into this target so far.
    #[inline]
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.index(x, y) * BYTES_PER_PIXEL;
        let px = self.color.get(offset..offset + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Fills the color buffer with `rgba` and resets depth to "infinitely far".
    pub fn clear(&mut self, rgba: [u8; 4]) {
        for px in self.color.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
        self.depth.fill(f32::INFINITY);
    }

    /// Writes `rgba` at `(x, y)` if `depth` is nearer than what is stored.
    /// Returns whether the pixel was written.
    pub fn write_if_nearer(&mut self, x: u32, y: u32, depth: f32, rgba: [u8; 4]) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        if depth >= self.depth[idx] {
            return false;
        }
        self.depth[idx] = depth;
        let offset = idx * BYTES_PER_PIXEL;
        self.color[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        true
    }

    pub(crate) fn finish_frame(&mut self) {
        self.frame_index += 1;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Owning side of a session's render target.
///
/// Dropping the surface releases the target; every [`FrameBuffer`] handed out
/// before that stops resolving.
#[derive(Debug)]
pub struct RenderSurface {
    target: Arc<RwLock<RenderTarget>>,
}

impl RenderSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            target: Arc::new(RwLock::new(RenderTarget::new(width, height)?)),
        })
    }

    /// Non-owning handle to the target.
    #[must_use]
    pub fn handle(&self) -> FrameBuffer {
        FrameBuffer {
            target: Arc::downgrade(&self.target),
        }
    }

    pub(crate) fn target(&self) -> &Arc<RwLock<RenderTarget>> {
        &self.target
    }
}

/// Opaque handle to a session's off-screen render target.
///
/// The handle stays the same for the whole session while the contents change
/// with every rendered frame. After the session closes, the handle no longer
/// resolves to a target.
#[derive(Clone, Default)]
pub struct FrameBuffer {
    target: Weak<RwLock<RenderTarget>>,
}

impl FrameBuffer {
    /// A handle that never resolves.
    #[must_use]
    pub fn null() -> Self {
        Self::default()
    }

    /// `true` while the owning session still holds the target.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Whether both handles refer to the same render target.
    #[must_use]
    pub fn same_target(&self, other: &FrameBuffer) -> bool {
        self.is_valid() && Weak::ptr_eq(&self.target, &other.target)
    }

    pub(crate) fn upgrade(&self) -> Option<Arc<RwLock<RenderTarget>>> {
        self.target.upgrade()
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("valid", &self.is_valid())
            .finish()
    }
}

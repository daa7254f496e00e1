//! Error Types
//!
//! This module defines the error types used throughout the preview controller.
//!
//! # Overview
//!
//! The main error type [`PreviewError`] covers three families of failure:
//! - Precondition errors (calling an operation in the wrong session state)
//! - Resource errors (render target or actor creation failed while starting)
//! - Capture errors (no render target to read back, encoding or I/O failures)
//!
//! None of these are fatal to the process. A failed call leaves the session in
//! the state it was in before the call.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, PreviewError>`.
//!
//! ```rust,ignore
//! use motion_preview::errors::{PreviewError, Result};
//!
//! fn tick(session: &mut PreviewSession) -> Result<()> {
//!     session.advance(1.0 / 60.0)?;
//!     session.render_frame()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the preview controller.
#[derive(Error, Debug)]
pub enum PreviewError {
    // ========================================================================
    // Precondition Errors
    // ========================================================================
    /// The operation requires an open session.
    #[error("Preview session is not open: cannot {0}")]
    NotOpen(&'static str),

    /// The actor has no animator component to bind playback to.
    #[error("Actor '{0}' has no animator component attached")]
    MissingAnimator(String),

    /// A named state was requested that the controller graph does not contain.
    #[error("Animator state not found: {0}")]
    UnknownState(String),

    // ========================================================================
    // Resource Errors
    // ========================================================================
    /// The off-screen render target could not be created.
    #[error("Failed to create render surface: {0}")]
    SurfaceCreation(String),

    /// The actor template could not be instantiated.
    #[error("Failed to instantiate actor '{template}': {reason}")]
    ActorInstantiation {
        /// Name of the template being instantiated
        template: String,
        /// Why instantiation failed
        reason: String,
    },

    // ========================================================================
    // Capture Errors
    // ========================================================================
    /// The frame buffer handle does not refer to a live render target.
    #[error("No active render target to capture")]
    NoActiveRenderTarget,

    /// Pixel data could not be encoded into an image file.
    #[error("Image encode error: {0}")]
    ImageEncode(String),

    /// No directory was available to save a capture into.
    #[error("No save directory selected")]
    NoSaveDirectory,

    // ========================================================================
    // I/O & Parsing Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for PreviewError {
    fn from(err: image::ImageError) -> Self {
        PreviewError::ImageEncode(err.to_string())
    }
}

/// Alias for `Result<T, PreviewError>`.
pub type Result<T> = std::result::Result<T, PreviewError>;

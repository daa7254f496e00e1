//! Preview Session
//!
//! [`PreviewSession`] is the controller behind one preview viewport. It owns
//! an off-screen render target, one actor instantiated from a template, and
//! the animation binding driving that actor.
//!
//! # Lifecycle
//!
//! ```text
//!   Closed ──start()──▶ Open ──close()──▶ Closed
//!                        │ ▲
//!                        └─┘ start() again: implicit close, then open
//! ```
//!
//! The actor, the render surface and the binding are held together in one
//! value and released together. That happens on `close()`, on the implicit
//! close at the start of every `start()`, and when the session is dropped.
//!
//! # Per-tick usage
//!
//! ```rust,ignore
//! session.start(&template, &source)?;
//! loop {
//!     session.advance(clock.tick())?;
//!     let frame = session.render_frame()?;
//!     // present `frame`, or capture it:
//!     let still = FrameCapture::snapshot(&frame)?;
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::animation::{AnimationBinding, AnimationSource, AnimatorController};
use crate::capture::{CapturedImage, FrameCapture, ImageWriter};
use crate::catalog::MotionEntry;
use crate::errors::{PreviewError, Result};
use crate::preview::camera_state::CameraState;
use crate::preview::settings::PreviewSettings;
use crate::renderer::{FrameBuffer, RenderSurface, SoftwareRenderer};
use crate::scene::{Actor, ActorFactory, ActorPool, ActorTemplate, Camera};
use crate::utils::orbit_camera::{CameraPlacement, OrbitCamera};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
}

/// Which catalog entry is on screen, and at which revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShownEntry {
    id: Uuid,
    revision: u64,
}

/// Everything that exists only while the session is open.
struct ActivePreview {
    actor: Actor,
    surface: RenderSurface,
    binding: AnimationBinding,
    source: AnimationSource,
    camera: Camera,
    placement: Option<CameraPlacement>,
    shown_entry: Option<ShownEntry>,
    title: Option<String>,
}

/// Preview rendering and playback controller.
pub struct PreviewSession {
    settings: PreviewSettings,
    factory: Box<dyn ActorFactory>,
    renderer: SoftwareRenderer,
    camera_state: CameraState,
    active: Option<ActivePreview>,
}

impl PreviewSession {
    #[must_use]
    pub fn new(settings: PreviewSettings, factory: impl ActorFactory + 'static) -> Self {
        let renderer = SoftwareRenderer::new(settings.background_rgba8());
        let camera_state = CameraState::from_settings(&settings);
        Self {
            settings,
            factory: Box::new(factory),
            renderer,
            camera_state,
            active: None,
        }
    }

    /// A session with default settings and its own [`ActorPool`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PreviewSettings::default(), ActorPool::new())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Opens the session on a fresh instance of `template` playing `source`.
    ///
    /// An already open session is closed first. On failure the session is
    /// left closed and nothing it allocated is kept.
    pub fn start(&mut self, template: &ActorTemplate, source: &AnimationSource) -> Result<()> {
        self.close();

        let surface = RenderSurface::new(self.settings.width, self.settings.height)?;
        let mut actor = self.factory.instantiate(template)?;
        actor.transform.position = self.settings.actor_position;
        actor.add_animator();

        let mut binding = match AnimationBinding::bind(&mut actor, source) {
            Ok(binding) => binding,
            Err(err) => {
                self.factory.destroy(actor);
                return Err(err);
            }
        };

        self.camera_state = CameraState::from_settings(&self.settings);
        binding.set_speed(self.camera_state.speed());

        let camera = Camera::new_perspective(
            self.settings.fov_degrees,
            self.settings.aspect(),
            self.settings.near,
            self.settings.far,
        );

        log::info!(
            "Preview opened: actor '{}' playing '{}' ({:?})",
            actor.name,
            source.name(),
            source.kind()
        );

        self.active = Some(ActivePreview {
            actor,
            surface,
            binding,
            source: source.clone(),
            camera,
            placement: None,
            shown_entry: None,
            title: None,
        });
        Ok(())
    }

    /// Releases the actor and the render target. Does nothing when closed.
    pub fn close(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let ActivePreview { actor, surface, .. } = active;
        drop(surface);

        log::info!("Preview closed: releasing actor '{}'", actor.name);
        self.factory.destroy(actor);
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Open
        } else {
            SessionState::Closed
        }
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    // ========================================================================
    // Per-tick operations
    // ========================================================================

    /// Advances playback by `dt` seconds, scaled by the current speed.
    /// Does nothing while playback is stopped.
    pub fn advance(&mut self, dt: f32) -> Result<()> {
        let active = self.active.as_mut().ok_or(PreviewError::NotOpen("advance"))?;
        if self.camera_state.is_playing() {
            active.binding.advance(dt);
            active.binding.apply(&mut active.actor);
        }
        Ok(())
    }

    /// Frames the actor and renders it into the off-screen target.
    ///
    /// Returns the session's frame buffer handle, the same handle on every
    /// call while the session stays open.
    pub fn render_frame(&mut self) -> Result<FrameBuffer> {
        let active = self.active.as_mut().ok_or(PreviewError::NotOpen("render a frame"))?;

        let bounds = active.actor.world_bounds();
        let placement = OrbitCamera::compute_placement(&bounds, self.camera_state.yaw_degrees());
        active.camera.apply_placement(&placement);

        {
            let mut target = active.surface.target().write();
            self.renderer.render(&mut target, &active.camera, &active.actor);
        }

        active.placement = Some(placement);
        Ok(active.surface.handle())
    }

    /// Swaps the animation source in place and restarts playback from 0.
    pub fn rebind(&mut self, source: &AnimationSource) -> Result<()> {
        let active = self.active.as_mut().ok_or(PreviewError::NotOpen("rebind"))?;
        active.binding.rebind(&mut active.actor, source)?;
        active.source = source.clone();
        active.shown_entry = None;

        log::info!("Preview rebound to '{}' ({:?})", source.name(), source.kind());
        Ok(())
    }

    // ========================================================================
    // Camera state
    // ========================================================================

    pub fn set_playing(&mut self, playing: bool) {
        self.camera_state.set_playing(playing);
        if playing && let Some(active) = &mut self.active {
            active.binding.resume();
        }
    }

    /// Sets the playback rate, clamped to `[0, 2]`. Returns the stored value.
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        let speed = self.camera_state.set_speed(speed);
        if let Some(active) = &mut self.active {
            active.binding.set_speed(speed);
        }
        speed
    }

    /// Sets the orbit angle, wrapped into `[0, 360)`. Returns the stored value.
    pub fn set_yaw(&mut self, yaw_degrees: f32) -> f32 {
        self.camera_state.set_yaw(yaw_degrees)
    }

    #[inline]
    #[must_use]
    pub fn camera_state(&self) -> &CameraState {
        &self.camera_state
    }

    // ========================================================================
    // Capture
    // ========================================================================

    /// Handle to the render target, or the null handle while closed.
    #[must_use]
    pub fn frame_buffer(&self) -> FrameBuffer {
        self.active
            .as_ref()
            .map_or_else(FrameBuffer::null, |a| a.surface.handle())
    }

    /// Copies the most recently rendered frame.
    pub fn capture(&self) -> Result<CapturedImage> {
        FrameCapture::snapshot(&self.frame_buffer())
    }

    /// Captures the current frame and hands it to `writer` for `dir`.
    pub fn save_screenshot(&self, writer: &dyn ImageWriter, dir: &Path) -> Result<PathBuf> {
        let image = self.capture()?;
        writer.write(&image, dir)
    }

    // ========================================================================
    // Catalog integration
    // ========================================================================

    /// Shows `entry` on an instance of `template`.
    ///
    /// Rebinds in place when `template` is already on screen; otherwise
    /// (re)starts the session. An entry without an animation source shows the
    /// actor in its rest pose.
    pub fn show_entry(&mut self, template: &ActorTemplate, entry: &MotionEntry) -> Result<()> {
        let source = entry_source(entry);

        let same_actor = self
            .active
            .as_ref()
            .is_some_and(|a| a.actor.template_id() == template.uuid);
        if same_actor {
            self.rebind(&source)?;
        } else {
            self.start(template, &source)?;
        }

        if let Some(active) = &mut self.active {
            active.shown_entry = Some(ShownEntry {
                id: entry.id,
                revision: entry.revision(),
            });
            active.title = Some(entry.display_name.clone());
        }
        Ok(())
    }

    /// Rebinds if `entry` is the one on screen and its animation changed
    /// since it was shown. Returns whether a rebind happened.
    pub fn refresh_entry(&mut self, entry: &MotionEntry) -> Result<bool> {
        let stale = self
            .active
            .as_ref()
            .and_then(|a| a.shown_entry)
            .is_some_and(|shown| shown.id == entry.id && shown.revision != entry.revision());
        if !stale {
            return Ok(false);
        }

        self.rebind(&entry_source(entry))?;
        if let Some(active) = &mut self.active {
            active.shown_entry = Some(ShownEntry {
                id: entry.id,
                revision: entry.revision(),
            });
        }
        Ok(true)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn settings(&self) -> &PreviewSettings {
        &self.settings
    }

    #[must_use]
    pub fn actor(&self) -> Option<&Actor> {
        self.active.as_ref().map(|a| &a.actor)
    }

    #[must_use]
    pub fn binding(&self) -> Option<&AnimationBinding> {
        self.active.as_ref().map(|a| &a.binding)
    }

    #[must_use]
    pub fn source(&self) -> Option<&AnimationSource> {
        self.active.as_ref().map(|a| &a.source)
    }

    /// Playback time of the bound animation, `None` while closed.
    #[must_use]
    pub fn playback_time(&self) -> Option<f32> {
        self.binding().map(AnimationBinding::time)
    }

    /// Camera placement used by the last rendered frame.
    #[must_use]
    pub fn camera_placement(&self) -> Option<CameraPlacement> {
        self.active.as_ref().and_then(|a| a.placement)
    }

    /// Display name of the catalog entry on screen.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.active.as_ref().and_then(|a| a.title.as_deref())
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        self.close();
    }
}

fn entry_source(entry: &MotionEntry) -> AnimationSource {
    entry.animation_source().cloned().unwrap_or_else(|| {
        AnimationSource::ControllerGraph(Arc::new(AnimatorController::preview()))
    })
}

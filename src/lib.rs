#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod capture;
pub mod catalog;
pub mod errors;
pub mod preview;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{AnimationBinding, AnimationClip, AnimationSource, AnimatorController, SourceKind, Track};
pub use capture::{CapturedImage, FrameCapture, ImageWriter, PngImageWriter, StoredSavePath};
pub use catalog::{MotionCatalog, MotionEntry};
pub use errors::{PreviewError, Result};
pub use preview::{CameraState, PreviewSession, PreviewSettings, SessionState};
pub use renderer::{FrameBuffer, SoftwareRenderer};
pub use resources::primitives::*;
pub use resources::{BoundingBox, Mesh};
pub use scene::{Actor, ActorFactory, ActorPool, ActorTemplate, Camera, PartTemplate};
pub use utils::{CameraPlacement, FrameClock, OrbitCamera};

//! Animation playback
//!
//! - [`tracks`]: keyframe tracks with cursor-accelerated sampling
//! - [`clip`]: named clips whose tracks target actor parts
//! - [`action`]: per-clip playback time, rate and looping
//! - [`controller`]: minimal animator state graphs
//! - [`source`]: the clip-or-graph input a preview plays
//! - [`binding`]: the live, actor-attached playback object

mod values;
pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod controller;
pub mod source;
pub mod tracks;

pub use action::{AnimationAction, LoopMode, TrackValue};
pub use binder::{Binder, PropertyBinding};
pub use binding::AnimationBinding;
pub use clip::{AnimationClip, TargetPath, Track, TrackData, TrackMeta};
pub use controller::{AnimatorController, AnimatorLayer, AnimatorState, BASE_LAYER, PREVIEW_STATE};
pub use source::{AnimationSource, SourceKind};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;

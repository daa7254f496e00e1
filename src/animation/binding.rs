//! Live playback binding
//!
//! [`AnimationBinding`] attaches one [`AnimationSource`] to an actor's
//! [`Animator`](crate::scene::Animator) and gives both source kinds the same
//! surface: bind, swap motion, play from start, set speed, advance, apply.
//!
//! The two kinds differ only in how a rebind is carried out:
//!
//! - **SingleClip**: the binding is rebuilt from scratch on every rebind.
//! - **ControllerGraph**: a one-layer graph with a single `"Preview"` default
//!   state is built the first time it is needed and kept for the lifetime of
//!   the binding. A rebind only replaces that state's motion, so playing the
//!   `"Preview"` state by name always succeeds.

use std::sync::Arc;

use glam::Vec3;

use crate::animation::action::{AnimationAction, LoopMode, TrackValue};
use crate::animation::binder::{Binder, PropertyBinding};
use crate::animation::clip::{AnimationClip, TargetPath};
use crate::animation::controller::{AnimatorController, PREVIEW_STATE};
use crate::animation::source::{AnimationSource, SourceKind};
use crate::errors::{PreviewError, Result};
use crate::scene::Actor;

#[derive(Debug)]
enum BindingKind {
    Clip,
    /// `None` until the graph is first needed.
    Graph(Option<AnimatorController>),
}

#[derive(Debug)]
struct Playback {
    action: AnimationAction,
    bindings: Vec<PropertyBinding>,
}

/// The playback object bound to exactly one animation source at a time.
#[derive(Debug)]
pub struct AnimationBinding {
    kind: BindingKind,
    playback: Option<Playback>,
    speed: f32,
    playing: bool,
}

impl AnimationBinding {
    /// Binds `source` to `actor` and starts playing it from time 0.
    ///
    /// The actor must already carry an animator component.
    pub fn bind(actor: &mut Actor, source: &AnimationSource) -> Result<Self> {
        Self::bind_with_speed(actor, source, 1.0)
    }

    fn bind_with_speed(actor: &mut Actor, source: &AnimationSource, speed: f32) -> Result<Self> {
        ensure_animator(actor)?;

        let kind = match source.kind() {
            SourceKind::SingleClip => BindingKind::Clip,
            SourceKind::ControllerGraph => BindingKind::Graph(None),
        };
        let mut binding = Self {
            kind,
            playback: None,
            speed,
            playing: false,
        };
        binding.set_motion(actor, source.motion());
        binding.play_from_start();
        binding.apply(actor);
        Ok(binding)
    }

    /// Switches to `source` and restarts playback from time 0.
    ///
    /// A graph binding rebound to another graph keeps its graph and swaps the
    /// motion in place. Every other combination rebuilds the binding for the
    /// new kind, keeping the current speed.
    pub fn rebind(&mut self, actor: &mut Actor, source: &AnimationSource) -> Result<()> {
        ensure_animator(actor)?;

        let previous = self.kind();
        if previous == SourceKind::ControllerGraph && source.kind() == SourceKind::ControllerGraph {
            self.set_motion(actor, source.motion());
        } else {
            *self = Self::bind_with_speed(actor, source, self.speed)?;
            if previous != source.kind() {
                log::debug!("Binding kind switched {previous:?} -> {:?}", source.kind());
            }
        }

        self.play_from_start();
        self.apply(actor);
        Ok(())
    }

    /// Replaces the animated content without tearing the binding down.
    ///
    /// `None` returns the actor to its bind-time pose and disables playback.
    pub fn set_motion(&mut self, actor: &mut Actor, motion: Option<Arc<AnimationClip>>) {
        if let BindingKind::Graph(graph) = &mut self.kind {
            let graph = graph.get_or_insert_with(AnimatorController::preview);
            graph.set_state_motion(PREVIEW_STATE, motion.clone());
        }

        actor.restore_rest_pose();

        self.playback = motion.map(|clip| {
            let bindings = Binder::bind(actor, &clip);
            let mut action = AnimationAction::new(clip);
            action.time_scale = self.speed;
            action.loop_mode = LoopMode::Loop;
            Playback { action, bindings }
        });
        if self.playback.is_none() {
            self.playing = false;
        }
    }

    /// Plays `state` starting at `time` seconds.
    ///
    /// A graph binding only knows its `"Preview"` state; a clip binding has a
    /// single implicit state and accepts any name.
    pub fn play(&mut self, state: &str, time: f32) -> Result<()> {
        if let BindingKind::Graph(graph) = &self.kind {
            let known = graph
                .as_ref()
                .is_some_and(|g| g.find_state(state).is_some());
            if !known {
                return Err(PreviewError::UnknownState(state.to_string()));
            }
        }
        self.start_at(time);
        Ok(())
    }

    /// Resets playback time to 0 and starts advancing.
    pub fn play_from_start(&mut self) {
        self.start_at(0.0);
    }

    fn start_at(&mut self, time: f32) {
        match &mut self.playback {
            Some(playback) => {
                playback.action.reset_to(time);
                self.playing = true;
            }
            None => self.playing = false,
        }
    }

    /// Stops advancing without losing the current time.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Continues from the current time, if there is a motion to play.
    pub fn resume(&mut self) {
        self.playing = self.playback.is_some();
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        if let Some(playback) = &mut self.playback {
            playback.action.time_scale = speed;
        }
    }

    /// Advances playback time by `dt * speed`. No-op without a motion or
    /// while paused.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        if let Some(playback) = &mut self.playback {
            playback.action.update(dt);
        }
    }

    /// Writes the pose at the current time into the actor's parts.
    pub fn apply(&mut self, actor: &mut Actor) {
        let Some(Playback { action, bindings }) = &mut self.playback else {
            actor.restore_rest_pose();
            return;
        };

        for binding in bindings.iter() {
            let Some(value) = action.sample_track(binding.track_index) else {
                continue;
            };
            let Some(part) = actor.parts_mut().get_mut(binding.part_index) else {
                continue;
            };
            match (binding.target, value) {
                (TargetPath::Translation, TrackValue::Vector3(v)) => part.transform.position = v,
                (TargetPath::Rotation, TrackValue::Quaternion(q)) => part.transform.rotation = q,
                (TargetPath::Scale, TrackValue::Vector3(v)) => part.transform.scale = v,
                (TargetPath::UniformScale, TrackValue::Scalar(s)) => {
                    part.transform.scale = Vec3::splat(s);
                }
                (target, value) => {
                    log::warn!("Track value {value:?} does not fit target {target:?}");
                }
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self.kind {
            BindingKind::Clip => SourceKind::SingleClip,
            BindingKind::Graph(_) => SourceKind::ControllerGraph,
        }
    }

    /// Current playback time in seconds, `0.0` without a motion.
    ///
    /// This is clip-local time, not time since the last rebind: it wraps by
    /// the action's loop mode and stays at `0.0` for a zero-duration clip.
    /// See [`AnimationAction`](crate::animation::AnimationAction).
    #[must_use]
    pub fn time(&self) -> f32 {
        self.playback.as_ref().map_or(0.0, |p| p.action.time)
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The clip currently driving the actor.
    #[must_use]
    pub fn motion(&self) -> Option<&Arc<AnimationClip>> {
        self.playback.as_ref().map(|p| p.action.clip())
    }

    /// The preview graph of a graph binding.
    #[must_use]
    pub fn graph(&self) -> Option<&AnimatorController> {
        match &self.kind {
            BindingKind::Graph(graph) => graph.as_ref(),
            BindingKind::Clip => None,
        }
    }

    /// Mutable access to the playing action, for loop-mode changes.
    pub fn action_mut(&mut self) -> Option<&mut AnimationAction> {
        self.playback.as_mut().map(|p| &mut p.action)
    }
}

fn ensure_animator(actor: &Actor) -> Result<()> {
    if actor.has_animator() {
        Ok(())
    } else {
        Err(PreviewError::MissingAnimator(actor.name.clone()))
    }
}

//! Animator controller graphs
//!
//! A controller is a small state graph: layers of named states, each state
//! holding an optional motion, and one default (entry) state per layer.
//! The preview only ever plays layer 0.

use std::sync::Arc;

use uuid::Uuid;

use crate::animation::clip::AnimationClip;

/// Name of the single state in the graph a preview binding builds.
pub const PREVIEW_STATE: &str = "Preview";
/// Name of the single layer in the graph a preview binding builds.
pub const BASE_LAYER: &str = "Base Layer";

#[derive(Debug, Clone)]
pub struct AnimatorState {
    pub name: String,
    pub motion: Option<Arc<AnimationClip>>,
}

#[derive(Debug, Clone)]
pub struct AnimatorLayer {
    pub name: String,
    states: Vec<AnimatorState>,
    default_state: Option<usize>,
}

impl AnimatorLayer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            default_state: None,
        }
    }

    /// Adds an empty state and returns its index. The first state added
    /// becomes the default.
    pub fn add_state(&mut self, name: impl Into<String>) -> usize {
        self.states.push(AnimatorState {
            name: name.into(),
            motion: None,
        });
        let index = self.states.len() - 1;
        if self.default_state.is_none() {
            self.default_state = Some(index);
        }
        index
    }

    /// Marks state `index` as the entry state. Out-of-range indices are ignored.
    pub fn set_default_state(&mut self, index: usize) {
        if index < self.states.len() {
            self.default_state = Some(index);
        }
    }

    #[must_use]
    pub fn default_state(&self) -> Option<&AnimatorState> {
        self.default_state.and_then(|i| self.states.get(i))
    }

    #[must_use]
    pub fn states(&self) -> &[AnimatorState] {
        &self.states
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<&AnimatorState> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn state_mut(&mut self, name: &str) -> Option<&mut AnimatorState> {
        self.states.iter_mut().find(|s| s.name == name)
    }
}

/// A layered state graph that selects the motion to play.
#[derive(Debug, Clone)]
pub struct AnimatorController {
    pub uuid: Uuid,
    pub name: String,
    layers: Vec<AnimatorLayer>,
}

impl AnimatorController {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            layers: Vec::new(),
        }
    }

    /// The minimal preview graph: one `"Base Layer"` holding one `"Preview"`
    /// state that is also the default state, with no motion yet.
    #[must_use]
    pub fn preview() -> Self {
        let mut controller = Self::new("Preview Controller");
        let layer = controller.add_layer(BASE_LAYER);
        let state = layer.add_state(PREVIEW_STATE);
        layer.set_default_state(state);
        controller
    }

    /// A preview graph whose entry state already plays `clip`.
    #[must_use]
    pub fn with_entry_motion(clip: Arc<AnimationClip>) -> Self {
        let mut controller = Self::preview();
        controller.set_state_motion(PREVIEW_STATE, Some(clip));
        controller
    }

    pub fn add_layer(&mut self, name: impl Into<String>) -> &mut AnimatorLayer {
        self.layers.push(AnimatorLayer::new(name));
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    #[must_use]
    pub fn layers(&self) -> &[AnimatorLayer] {
        &self.layers
    }

    /// Default state of the base layer.
    #[must_use]
    pub fn entry_state(&self) -> Option<&AnimatorState> {
        self.layers.first().and_then(AnimatorLayer::default_state)
    }

    /// Motion of the entry state, if both exist.
    #[must_use]
    pub fn entry_motion(&self) -> Option<Arc<AnimationClip>> {
        self.entry_state().and_then(|s| s.motion.clone())
    }

    /// Looks up a state of the base layer by name.
    #[must_use]
    pub fn find_state(&self, name: &str) -> Option<&AnimatorState> {
        self.layers.first().and_then(|l| l.state(name))
    }

    /// Replaces the motion of a base-layer state. Returns `false` if no such
    /// state exists; the graph structure is never changed.
    pub fn set_state_motion(&mut self, name: &str, motion: Option<Arc<AnimationClip>>) -> bool {
        match self.layers.first_mut().and_then(|l| l.state_mut(name)) {
            Some(state) => {
                state.motion = motion;
                true
            }
            None => false,
        }
    }
}

use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::animation::controller::AnimatorController;

/// Which structural kind an [`AnimationSource`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    SingleClip,
    ControllerGraph,
}

/// Something that can be played on an actor: one clip, or a controller graph
/// whose entry state supplies the motion.
#[derive(Debug, Clone)]
pub enum AnimationSource {
    SingleClip(Arc<AnimationClip>),
    ControllerGraph(Arc<AnimatorController>),
}

impl AnimationSource {
    #[must_use]
    pub fn clip(clip: AnimationClip) -> Self {
        Self::SingleClip(Arc::new(clip))
    }

    /// Wraps `clip` in a one-state preview graph.
    #[must_use]
    pub fn graph_from_clip(clip: Arc<AnimationClip>) -> Self {
        Self::ControllerGraph(Arc::new(AnimatorController::with_entry_motion(clip)))
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::SingleClip(_) => SourceKind::SingleClip,
            Self::ControllerGraph(_) => SourceKind::ControllerGraph,
        }
    }

    /// The motion this source plays first.
    #[must_use]
    pub fn motion(&self) -> Option<Arc<AnimationClip>> {
        match self {
            Self::SingleClip(clip) => Some(Arc::clone(clip)),
            Self::ControllerGraph(graph) => graph.entry_motion(),
        }
    }

    /// Display name of the underlying clip or graph.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SingleClip(clip) => &clip.name,
            Self::ControllerGraph(graph) => &graph.name,
        }
    }
}

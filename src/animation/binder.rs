use crate::animation::clip::{AnimationClip, TargetPath};
use crate::scene::Actor;

/// Maps track `track_index` of a clip to a property of part `part_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub part_index: usize,
    pub target: TargetPath,
}

pub struct Binder;

impl Binder {
    /// Resolves the clip's tracks against the actor's parts by name.
    ///
    /// Tracks naming a part the actor does not have are skipped.
    #[must_use]
    pub fn bind(actor: &Actor, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_idx, track) in clip.tracks.iter().enumerate() {
            match actor.part_index(&track.meta.part_name) {
                Some(part_index) => bindings.push(PropertyBinding {
                    track_index: track_idx,
                    part_index,
                    target: track.meta.target,
                }),
                None => log::debug!(
                    "Clip '{}' track {} targets missing part '{}'",
                    clip.name,
                    track_idx,
                    track.meta.part_name
                ),
            }
        }

        bindings
    }
}

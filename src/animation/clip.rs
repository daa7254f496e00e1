use glam::{Quat, Vec3};

use crate::animation::tracks::KeyframeTrack;

/// The transform property a track drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    /// Scalar track applied to all three scale axes.
    UniformScale,
}

#[derive(Debug, Clone)]
pub struct TrackMeta {
    /// Name of the actor part this track animates.
    pub part_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
    Scalar(KeyframeTrack<f32>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(track) => track.end_time(),
            TrackData::Quaternion(track) => track.end_time(),
            TrackData::Scalar(track) => track.end_time(),
        }
    }
}

/// A track definition: what it animates and its keyframes.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    #[must_use]
    pub fn translation(part_name: impl Into<String>, track: KeyframeTrack<Vec3>) -> Self {
        Self::with_target(part_name, TargetPath::Translation, TrackData::Vector3(track))
    }

    #[must_use]
    pub fn rotation(part_name: impl Into<String>, track: KeyframeTrack<Quat>) -> Self {
        Self::with_target(part_name, TargetPath::Rotation, TrackData::Quaternion(track))
    }

    #[must_use]
    pub fn scale(part_name: impl Into<String>, track: KeyframeTrack<Vec3>) -> Self {
        Self::with_target(part_name, TargetPath::Scale, TrackData::Vector3(track))
    }

    #[must_use]
    pub fn uniform_scale(part_name: impl Into<String>, track: KeyframeTrack<f32>) -> Self {
        Self::with_target(part_name, TargetPath::UniformScale, TrackData::Scalar(track))
    }

    fn with_target(part_name: impl Into<String>, target: TargetPath, data: TrackData) -> Self {
        Self {
            meta: TrackMeta {
                part_name: part_name.into(),
                target,
            },
            data,
        }
    }
}

/// A named, playable motion.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Time of the last keyframe across all tracks, in seconds.
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }
}

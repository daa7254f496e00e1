//! Turntable Example
//!
//! Opens a headless preview of a small box figure, plays a two-clip motion
//! catalog while orbiting the camera, and saves one screenshot per entry.
//!
//! Usage:
//!   cargo run --example turntable -- [output-dir]
//!
//! Set `RUST_LOG=debug` to follow the session lifecycle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use glam::{Quat, Vec3};

use motion_preview::animation::{AnimationClip, AnimationSource, KeyframeTrack, Track};
use motion_preview::capture::{FixedSavePath, PngImageWriter, resolve_save_dir};
use motion_preview::catalog::{MotionCatalog, MotionEntry};
use motion_preview::preview::{PreviewSession, PreviewSettings};
use motion_preview::resources::primitives::create_box;
use motion_preview::scene::{ActorPool, ActorTemplate, PartTemplate, Transform};
use motion_preview::utils::FrameClock;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map_or_else(|| std::env::temp_dir().join("motion-preview"), PathBuf::from);
    let mut save_path = FixedSavePath(out_dir);
    let dir = resolve_save_dir(&mut save_path)?;

    let figure = build_figure();
    let catalog = build_catalog();

    let mut session = PreviewSession::new(PreviewSettings::default(), ActorPool::new());
    session.set_speed(1.0);

    for entry in catalog.list() {
        session.show_entry(&figure, entry)?;

        // About two seconds of playback at ~30 fps, one full turn.
        let mut clock = FrameClock::new();
        let mut played = 0.0;
        for frame in 0..60 {
            std::thread::sleep(FRAME_INTERVAL);
            let dt = clock.tick();
            played += dt;
            session.set_yaw(frame as f32 * 6.0);
            session.advance(dt)?;
            session.render_frame()?;
        }

        let path = session.save_screenshot(&PngImageWriter, &dir)?;
        println!(
            "{}: {} frames, {:.2} s played -> {}",
            entry.display_name,
            clock.frames(),
            played,
            path.display()
        );

        // Screenshot names have one-second resolution.
        std::thread::sleep(Duration::from_secs(1));
    }

    session.close();
    Ok(())
}

fn build_figure() -> ActorTemplate {
    let torso = Arc::new(create_box(0.6, 1.0, 0.3));
    let head = Arc::new(create_box(0.3, 0.3, 0.3));
    let arm = Arc::new(create_box(0.15, 0.7, 0.15));

    ActorTemplate::new("Box Figure")
        .with_part(PartTemplate::new("Torso", torso).with_color([90, 140, 220, 255]))
        .with_part(
            PartTemplate::new("Head", head)
                .with_color([240, 200, 160, 255])
                .with_transform(Transform::from_position(Vec3::new(0.0, 0.7, 0.0))),
        )
        .with_part(
            PartTemplate::new("ArmL", Arc::clone(&arm))
                .with_transform(Transform::from_position(Vec3::new(-0.4, 0.1, 0.0))),
        )
        .with_part(
            PartTemplate::new("ArmR", arm)
                .with_transform(Transform::from_position(Vec3::new(0.4, 0.1, 0.0))),
        )
}

fn build_catalog() -> MotionCatalog {
    let wave = AnimationClip::new(
        "Wave",
        vec![Track::rotation(
            "ArmR",
            KeyframeTrack::linear(
                vec![0.0, 0.5, 1.0],
                vec![
                    Quat::IDENTITY,
                    Quat::from_rotation_z(2.5),
                    Quat::IDENTITY,
                ],
            ),
        )],
    );
    let hop = AnimationClip::new(
        "Hop",
        vec![
            Track::translation(
                "Torso",
                KeyframeTrack::linear(
                    vec![0.0, 0.4, 0.8],
                    vec![Vec3::ZERO, Vec3::new(0.0, 0.3, 0.0), Vec3::ZERO],
                ),
            ),
            Track::uniform_scale("Head", KeyframeTrack::linear(vec![0.0, 0.4, 0.8], vec![1.0, 1.2, 1.0])),
        ],
    );

    let mut catalog = MotionCatalog::new("Demo Motions");
    catalog.add_entry(MotionEntry::new("Wave", "Right arm waves").with_source(AnimationSource::clip(wave)));
    catalog.add_entry(
        MotionEntry::new("Hop", "Small hop in place")
            .with_source(AnimationSource::graph_from_clip(Arc::new(hop))),
    );
    catalog
}

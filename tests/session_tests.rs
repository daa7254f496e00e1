//! Preview Session Tests
//!
//! Tests for:
//! - Closed/Open lifecycle, implicit close and idempotent close
//! - Failed starts leaving the session closed with nothing leaked
//! - Precondition errors on a closed session
//! - Playback advance, speed clamping, play toggle and yaw wrapping
//! - Rebinding in place and switching source kinds
//! - Frame rendering, framing and deterministic capture
//! - Catalog entry display and refresh
//! - PreviewSettings defaults and JSON loading

use std::sync::Arc;

use glam::Vec3;

use motion_preview::animation::{AnimationClip, AnimationSource, KeyframeTrack, SourceKind, Track};
use motion_preview::capture::FrameCapture;
use motion_preview::catalog::MotionEntry;
use motion_preview::errors::PreviewError;
use motion_preview::preview::{PreviewSession, PreviewSettings, SessionState};
use motion_preview::resources::primitives::create_box;
use motion_preview::scene::{ActorPool, ActorTemplate, PartTemplate};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn small_settings() -> PreviewSettings {
    PreviewSettings {
        width: 64,
        height: 64,
        ..PreviewSettings::default()
    }
}

fn session_with_pool() -> (PreviewSession, ActorPool) {
    let pool = ActorPool::new();
    (PreviewSession::new(small_settings(), pool.clone()), pool)
}

fn figure_template() -> ActorTemplate {
    ActorTemplate::new("Figure").with_part(
        PartTemplate::new("Body", Arc::new(create_box(1.0, 2.0, 1.0))).with_color([220, 120, 40, 255]),
    )
}

fn empty_template() -> ActorTemplate {
    ActorTemplate::new("Empty").with_part(PartTemplate::pivot("Root"))
}

fn bob_clip() -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "Bob",
        vec![Track::translation(
            "Body",
            KeyframeTrack::linear(vec![0.0, 2.0], vec![Vec3::ZERO, Vec3::Y]),
        )],
    ))
}

fn wave_clip() -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "Wave",
        vec![Track::uniform_scale(
            "Body",
            KeyframeTrack::linear(vec![0.0, 1.0], vec![1.0, 1.5]),
        )],
    ))
}

fn clip_source() -> AnimationSource {
    AnimationSource::SingleClip(bob_clip())
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn new_session_is_closed() {
    let (session, pool) = session_with_pool();
    assert_eq!(session.state(), SessionState::Closed);
    assert!(!session.frame_buffer().is_valid());
    assert!(session.actor().is_none());
    assert_eq!(pool.live_count(), 0);
}

#[test]
fn start_opens_with_one_actor() {
    let (mut session, pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();

    assert_eq!(session.state(), SessionState::Open);
    assert_eq!(pool.live_count(), 1);
    assert!(session.frame_buffer().is_valid());

    let actor = session.actor().unwrap();
    assert_eq!(actor.position(), Vec3::new(0.0, -0.5, 0.0));
    assert!(actor.has_animator());
    assert!(approx(session.playback_time().unwrap(), 0.0));
}

#[test]
fn close_twice_is_a_no_op() {
    let (mut session, pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    let handle = session.frame_buffer();

    session.close();
    session.close();

    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(pool.live_count(), 0);
    assert!(!handle.is_valid());
}

#[test]
fn start_while_open_replaces_everything() {
    let (mut session, pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    let first = session.frame_buffer();
    let first_key = session.actor().unwrap().key().unwrap();

    session.start(&figure_template(), &clip_source()).unwrap();

    assert_eq!(pool.live_count(), 1);
    assert!(!pool.is_live(first_key));
    assert!(!first.is_valid());
    assert!(session.frame_buffer().is_valid());
}

#[test]
fn dropping_session_releases_actor() {
    let (mut session, pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    let handle = session.frame_buffer();

    drop(session);

    assert_eq!(pool.live_count(), 0);
    assert!(!handle.is_valid());
}

#[test]
fn start_resets_camera_state() {
    let (mut session, _pool) = session_with_pool();
    session.set_yaw(90.0);
    session.set_speed(2.0);
    session.set_playing(false);

    session.start(&figure_template(), &clip_source()).unwrap();

    let state = session.camera_state();
    assert!(approx(state.yaw_degrees(), 0.0));
    assert!(approx(state.speed(), 0.5));
    assert!(state.is_playing());
}

// ============================================================================
// Failed Starts
// ============================================================================

#[test]
fn failed_instantiation_leaves_session_closed() {
    let pool = ActorPool::with_capacity_limit(0);
    let mut session = PreviewSession::new(small_settings(), pool.clone());

    let result = session.start(&figure_template(), &clip_source());

    assert!(matches!(result, Err(PreviewError::ActorInstantiation { .. })));
    assert_eq!(session.state(), SessionState::Closed);
    assert!(!session.frame_buffer().is_valid());
    assert_eq!(pool.live_count(), 0);
}

#[test]
fn failed_surface_creation_leaves_session_closed() {
    let pool = ActorPool::new();
    let settings = PreviewSettings {
        width: 0,
        ..small_settings()
    };
    let mut session = PreviewSession::new(settings, pool.clone());

    let result = session.start(&figure_template(), &clip_source());

    assert!(matches!(result, Err(PreviewError::SurfaceCreation(_))));
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(pool.live_count(), 0);
}

#[test]
fn failed_restart_closes_previous_preview() {
    let pool = ActorPool::with_capacity_limit(1);
    let mut session = PreviewSession::new(small_settings(), pool.clone());
    session.start(&figure_template(), &clip_source()).unwrap();

    // Implicit close frees the only slot, so the restart succeeds.
    session.start(&figure_template(), &clip_source()).unwrap();
    assert_eq!(pool.live_count(), 1);
}

// ============================================================================
// Precondition Errors
// ============================================================================

#[test]
fn closed_session_rejects_per_tick_operations() {
    let (mut session, _pool) = session_with_pool();

    assert!(matches!(session.render_frame(), Err(PreviewError::NotOpen(_))));
    assert!(matches!(session.advance(0.1), Err(PreviewError::NotOpen(_))));
    assert!(matches!(session.rebind(&clip_source()), Err(PreviewError::NotOpen(_))));
    assert!(matches!(session.capture(), Err(PreviewError::NoActiveRenderTarget)));
}

#[test]
fn setters_work_while_closed() {
    let (mut session, _pool) = session_with_pool();
    assert!(approx(session.set_speed(1.25), 1.25));
    assert!(approx(session.set_yaw(-30.0), 330.0));
    session.set_playing(false);
    assert!(!session.camera_state().is_playing());
}

// ============================================================================
// Playback
// ============================================================================

#[test]
fn advance_adds_dt_times_speed() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    session.set_speed(1.0);

    session.advance(0.5).unwrap();

    assert!(approx(session.playback_time().unwrap(), 0.5));
}

#[test]
fn default_speed_is_half() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();

    session.advance(1.0).unwrap();

    assert!(approx(session.playback_time().unwrap(), 0.5));
}

#[test]
fn stopped_playback_holds_time() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    session.advance(0.4).unwrap();

    session.set_playing(false);
    session.advance(1.0).unwrap();
    assert!(approx(session.playback_time().unwrap(), 0.2));

    session.set_playing(true);
    session.advance(0.2).unwrap();
    assert!(approx(session.playback_time().unwrap(), 0.3));
}

#[test]
fn speed_is_clamped() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();

    assert!(approx(session.set_speed(5.0), 2.0));
    assert!(approx(session.binding().unwrap().speed(), 2.0));
    assert!(approx(session.set_speed(-1.0), 0.0));
    assert!(approx(session.set_speed(f32::NAN), 0.0));

    session.advance(1.0).unwrap();
    assert!(approx(session.playback_time().unwrap(), 0.0));
}

#[test]
fn yaw_is_wrapped() {
    let (mut session, _pool) = session_with_pool();
    assert!(approx(session.set_yaw(370.0), 10.0));
    assert!(approx(session.set_yaw(-90.0), 270.0));
    assert!(approx(session.set_yaw(720.0), 0.0));
}

// ============================================================================
// Rebind
// ============================================================================

#[test]
fn rebind_resets_time() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    session.advance(1.0).unwrap();
    assert!(session.playback_time().unwrap() > 0.0);

    session.rebind(&AnimationSource::SingleClip(wave_clip())).unwrap();

    assert!(approx(session.playback_time().unwrap(), 0.0));
    assert_eq!(session.source().unwrap().name(), "Wave");
}

#[test]
fn rebind_keeps_actor_and_frame_buffer() {
    let (mut session, pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    let handle = session.frame_buffer();
    let key = session.actor().unwrap().key();

    session.rebind(&AnimationSource::SingleClip(wave_clip())).unwrap();

    assert_eq!(pool.live_count(), 1);
    assert_eq!(session.actor().unwrap().key(), key);
    assert!(handle.same_target(&session.frame_buffer()));
}

#[test]
fn rebind_switches_kind_both_ways() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    session.set_speed(1.5);

    session.rebind(&AnimationSource::graph_from_clip(wave_clip())).unwrap();
    let binding = session.binding().unwrap();
    assert_eq!(binding.kind(), SourceKind::ControllerGraph);
    assert!(approx(binding.speed(), 1.5));

    session.rebind(&AnimationSource::SingleClip(bob_clip())).unwrap();
    let binding = session.binding().unwrap();
    assert_eq!(binding.kind(), SourceKind::SingleClip);
    assert!(approx(binding.speed(), 1.5));
    assert!(approx(binding.time(), 0.0));
}

// ============================================================================
// Rendering & Capture
// ============================================================================

#[test]
fn render_frame_returns_stable_handle() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();

    let a = session.render_frame().unwrap();
    let b = session.render_frame().unwrap();
    assert!(a.same_target(&b));
}

#[test]
fn render_frames_actor_at_bounds_center() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    session.render_frame().unwrap();

    let bounds = session.actor().unwrap().world_bounds();
    let placement = session.camera_placement().unwrap();
    assert_eq!(placement.look_target, bounds.center());
    assert!(!placement.is_degenerate());

    let image = session.capture().unwrap();
    let pixel = |x: u32, y: u32| {
        let offset = ((y * image.width() + x) * 4) as usize;
        image.pixels()[offset..offset + 4].to_vec()
    };
    let background = session.settings().background_rgba8().to_vec();
    assert_eq!(pixel(0, 0), background);
    assert_ne!(pixel(32, 32), background);
}

#[test]
fn zero_bounds_actor_renders_background_only() {
    let (mut session, _pool) = session_with_pool();
    session.start(&empty_template(), &clip_source()).unwrap();

    session.render_frame().unwrap();

    let placement = session.camera_placement().unwrap();
    assert!(placement.is_degenerate());
    assert_eq!(placement.position, session.actor().unwrap().position());
    let image = session.capture().unwrap();
    let background = session.settings().background_rgba8();
    assert!(image.pixels().chunks_exact(4).all(|px| px == background));
}

#[test]
fn capture_is_deterministic_for_same_pose() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    session.set_playing(false);

    session.render_frame().unwrap();
    let first = session.capture().unwrap();
    session.advance(0.5).unwrap();
    session.render_frame().unwrap();
    let second = session.capture().unwrap();

    assert_eq!(first.pixels(), second.pixels());
}

#[test]
fn back_to_back_snapshots_are_identical() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    session.set_yaw(45.0);
    session.render_frame().unwrap();

    let first = FrameCapture::snapshot(&session.frame_buffer()).unwrap();
    let second = FrameCapture::snapshot(&session.frame_buffer()).unwrap();

    assert_eq!((first.width(), first.height()), (second.width(), second.height()));
    assert_eq!(first.pixels(), second.pixels());
}

#[test]
fn capture_is_a_copy() {
    let (mut session, _pool) = session_with_pool();
    session.start(&figure_template(), &clip_source()).unwrap();
    session.render_frame().unwrap();
    let before = session.capture().unwrap();

    session.set_yaw(45.0);
    session.render_frame().unwrap();
    let after = session.capture().unwrap();

    assert_eq!(before.width(), after.width());
    assert_ne!(before.pixels(), after.pixels());
}

// ============================================================================
// Catalog Entries
// ============================================================================

#[test]
fn show_entry_starts_then_rebinds_same_template() {
    let (mut session, pool) = session_with_pool();
    let template = figure_template();
    let bob = MotionEntry::new("Bob", "Up and down").with_source(clip_source());
    let wave = MotionEntry::new("Wave", "Grow").with_source(AnimationSource::SingleClip(wave_clip()));

    session.show_entry(&template, &bob).unwrap();
    let key = session.actor().unwrap().key();
    assert_eq!(session.title(), Some("Bob"));

    session.show_entry(&template, &wave).unwrap();
    assert_eq!(session.actor().unwrap().key(), key);
    assert_eq!(session.title(), Some("Wave"));
    assert_eq!(pool.live_count(), 1);
}

#[test]
fn show_entry_with_other_template_restarts() {
    let (mut session, pool) = session_with_pool();
    let entry = MotionEntry::new("Bob", "").with_source(clip_source());

    session.show_entry(&figure_template(), &entry).unwrap();
    let key = session.actor().unwrap().key().unwrap();
    session.show_entry(&figure_template(), &entry).unwrap();

    assert!(!pool.is_live(key));
    assert_eq!(pool.live_count(), 1);
}

#[test]
fn entry_without_source_shows_rest_pose() {
    let (mut session, _pool) = session_with_pool();
    let entry = MotionEntry::default();

    session.show_entry(&figure_template(), &entry).unwrap();

    let binding = session.binding().unwrap();
    assert_eq!(binding.kind(), SourceKind::ControllerGraph);
    assert!(binding.motion().is_none());
    session.advance(1.0).unwrap();
    assert!(approx(session.playback_time().unwrap(), 0.0));
}

#[test]
fn refresh_entry_rebinds_only_when_changed() {
    let (mut session, _pool) = session_with_pool();
    let mut entry = MotionEntry::new("Bob", "").with_source(clip_source());
    session.show_entry(&figure_template(), &entry).unwrap();
    session.advance(1.0).unwrap();

    assert!(!session.refresh_entry(&entry).unwrap());
    assert!(session.playback_time().unwrap() > 0.0);

    entry.set_animation_source(Some(AnimationSource::SingleClip(wave_clip())));
    assert!(session.refresh_entry(&entry).unwrap());
    assert!(approx(session.playback_time().unwrap(), 0.0));
    assert_eq!(session.source().unwrap().name(), "Wave");

    let other = MotionEntry::new("Other", "").with_source(clip_source());
    assert!(!session.refresh_entry(&other).unwrap());
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_defaults_match_preview_window() {
    let settings = PreviewSettings::default();
    assert_eq!((settings.width, settings.height), (640, 640));
    assert_eq!(settings.actor_position, Vec3::new(0.0, -0.5, 0.0));
    assert!(approx(settings.fov_degrees, 60.0));
    assert!(approx(settings.initial_speed, 0.5));
    assert!(settings.start_playing);
    assert_eq!(settings.background_rgba8(), [51, 51, 51, 255]);
}

#[test]
fn settings_json_fills_missing_fields() {
    let settings =
        PreviewSettings::from_json_str(r#"{ "width": 320, "height": 240, "initial_speed": 1.0 }"#).unwrap();
    assert_eq!((settings.width, settings.height), (320, 240));
    assert!(approx(settings.initial_speed, 1.0));
    assert!(approx(settings.far, 5000.0));
    assert!(approx(settings.aspect(), 320.0 / 240.0));
}

#[test]
fn settings_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preview.json");
    std::fs::write(&path, r#"{ "initial_yaw_degrees": 45.0, "start_playing": false }"#).unwrap();

    let settings = PreviewSettings::load(&path).unwrap();
    assert!(approx(settings.initial_yaw_degrees, 45.0));
    assert!(!settings.start_playing);

    assert!(matches!(
        PreviewSettings::load(dir.path().join("missing.json")),
        Err(PreviewError::Io(_))
    ));
    assert!(matches!(
        PreviewSettings::from_json_str("{ not json"),
        Err(PreviewError::Json(_))
    ));
}

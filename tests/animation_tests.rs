//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step interpolation and cursor sampling
//! - AnimationAction loop modes (Once, Loop, PingPong)
//! - AnimationClip duration auto-computation
//! - AnimatorController preview graphs
//! - AnimationBinding bind/rebind/play/advance across both source kinds

use std::sync::Arc;

use glam::{Quat, Vec3};

use motion_preview::animation::action::{AnimationAction, LoopMode};
use motion_preview::animation::binding::AnimationBinding;
use motion_preview::animation::clip::{AnimationClip, Track};
use motion_preview::animation::controller::{AnimatorController, BASE_LAYER, PREVIEW_STATE};
use motion_preview::animation::source::{AnimationSource, SourceKind};
use motion_preview::animation::tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
use motion_preview::errors::PreviewError;
use motion_preview::resources::primitives::create_box;
use motion_preview::scene::{Actor, ActorTemplate, PartTemplate};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn figure_template() -> ActorTemplate {
    ActorTemplate::new("Figure")
        .with_part(PartTemplate::new("Body", Arc::new(create_box(1.0, 2.0, 1.0))))
        .with_part(PartTemplate::pivot("Hip"))
        .with_animator()
}

/// Two-second clip raising "Body" by one unit.
fn bob_clip() -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "Bob",
        vec![Track::translation(
            "Body",
            KeyframeTrack::linear(vec![0.0, 2.0], vec![Vec3::ZERO, Vec3::Y]),
        )],
    ))
}

/// One-second clip turning "Hip" a quarter turn.
fn turn_clip() -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "Turn",
        vec![Track::rotation(
            "Hip",
            KeyframeTrack::linear(
                vec![0.0, 1.0],
                vec![Quat::IDENTITY, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)],
            ),
        )],
    ))
}

fn body_y(actor: &Actor) -> f32 {
    let index = actor.part_index("Body").unwrap();
    actor.parts()[index].transform.position.y
}

// ============================================================================
// KeyframeTrack
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::linear(vec![0.0, 1.0], vec![0.0_f32, 10.0]);
    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_clamps_beyond_range() {
    let track = KeyframeTrack::linear(vec![0.0, 1.0], vec![0.0_f32, 10.0]);
    assert!(approx(track.sample(-1.0).unwrap(), 0.0));
    assert!(approx(track.sample(5.0).unwrap(), 10.0));
}

#[test]
fn track_step_holds_previous_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![1.0_f32, 2.0, 3.0],
        InterpolationMode::Step,
    );
    assert!(approx(track.sample(0.9).unwrap(), 1.0));
    assert!(approx(track.sample(1.5).unwrap(), 2.0));
}

#[test]
fn track_cursor_matches_binary_search() {
    let times: Vec<f32> = (0..20).map(|i| i as f32 * 0.1).collect();
    let values: Vec<f32> = (0..20).map(|i| (i * i) as f32).collect();
    let track = KeyframeTrack::linear(times, values);

    let mut cursor = KeyframeCursor::default();
    for t in [0.05, 0.25, 1.73, 0.4, 1.9, 0.0] {
        let a = track.sample_with_cursor(t, &mut cursor).unwrap();
        let b = track.sample(t).unwrap();
        assert!(approx(a, b), "t={t}: cursor {a} vs search {b}");
    }
}

#[test]
fn empty_track_samples_nothing() {
    let track: KeyframeTrack<f32> = KeyframeTrack::linear(Vec::new(), Vec::new());
    assert!(track.is_empty());
    assert!(track.sample(0.0).is_none());
    assert!(track.sample_with_cursor(0.0, &mut KeyframeCursor::default()).is_none());
}

// ============================================================================
// AnimationClip / AnimationAction
// ============================================================================

#[test]
fn clip_duration_is_last_keyframe() {
    let clip = AnimationClip::new(
        "Mixed",
        vec![
            Track::uniform_scale("Body", KeyframeTrack::linear(vec![0.0, 0.75], vec![1.0, 2.0])),
            Track::translation("Body", KeyframeTrack::linear(vec![0.0, 3.0], vec![Vec3::ZERO, Vec3::X])),
        ],
    );
    assert!(approx(clip.duration, 3.0));
}

#[test]
fn action_loop_wraps() {
    let mut action = AnimationAction::new(bob_clip());
    action.update(2.5);
    assert!(approx(action.time, 0.5), "got {}", action.time);
}

#[test]
fn action_once_clamps_and_pauses() {
    let mut action = AnimationAction::new(bob_clip());
    action.loop_mode = LoopMode::Once;
    action.update(3.0);
    assert!(approx(action.time, 2.0));
    assert!(action.paused);
}

#[test]
fn action_advances_again_after_reset() {
    let mut action = AnimationAction::new(bob_clip());
    action.loop_mode = LoopMode::Once;
    action.update(3.0);
    assert!(action.paused);

    action.update(0.5);
    assert!(approx(action.time, 2.0));

    action.reset_to(0.0);
    action.update(0.5);
    assert!(!action.paused);
    assert!(approx(action.time, 0.5), "got {}", action.time);
}

#[test]
fn action_ping_pong_reflects() {
    let mut action = AnimationAction::new(bob_clip());
    action.loop_mode = LoopMode::PingPong;
    action.update(2.5);
    assert!(approx(action.time, 1.5), "got {}", action.time);
}

#[test]
fn action_time_scale_applies() {
    let mut action = AnimationAction::new(bob_clip());
    action.time_scale = 0.5;
    action.update(1.0);
    assert!(approx(action.time, 0.5));
}

// ============================================================================
// AnimatorController
// ============================================================================

#[test]
fn preview_graph_has_one_layer_and_default_state() {
    let graph = AnimatorController::preview();
    assert_eq!(graph.layers().len(), 1);
    assert_eq!(graph.layers()[0].name, BASE_LAYER);
    assert_eq!(graph.entry_state().unwrap().name, PREVIEW_STATE);
    assert!(graph.entry_motion().is_none());
}

#[test]
fn set_state_motion_updates_entry_motion() {
    let mut graph = AnimatorController::preview();
    assert!(graph.set_state_motion(PREVIEW_STATE, Some(bob_clip())));
    assert_eq!(graph.entry_motion().unwrap().name, "Bob");
    assert!(!graph.set_state_motion("Run", Some(bob_clip())));
}

// ============================================================================
// AnimationBinding: bind
// ============================================================================

#[test]
fn bind_requires_animator() {
    let template = ActorTemplate::new("Static")
        .with_part(PartTemplate::new("Body", Arc::new(create_box(1.0, 1.0, 1.0))));
    let mut actor = Actor::from_template(&template);

    let result = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(bob_clip()));
    assert!(matches!(result, Err(PreviewError::MissingAnimator(_))));
}

#[test]
fn bind_starts_at_zero_and_plays() {
    let mut actor = Actor::from_template(&figure_template());
    let binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(bob_clip())).unwrap();

    assert_eq!(binding.kind(), SourceKind::SingleClip);
    assert!(binding.is_playing());
    assert!(approx(binding.time(), 0.0));
    assert_eq!(binding.motion().unwrap().name, "Bob");
}

#[test]
fn advance_moves_time_and_apply_poses_actor() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(bob_clip())).unwrap();

    binding.advance(0.5);
    binding.apply(&mut actor);

    assert!(approx(binding.time(), 0.5));
    assert!(approx(body_y(&actor), 0.25), "got {}", body_y(&actor));
}

#[test]
fn advance_is_scaled_by_speed() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(bob_clip())).unwrap();

    binding.set_speed(2.0);
    binding.advance(0.25);
    assert!(approx(binding.time(), 0.5));
}

#[test]
fn time_is_clip_local_for_clips_shorter_than_a_step() {
    let short = Arc::new(AnimationClip::new(
        "Nod",
        vec![Track::translation(
            "Body",
            KeyframeTrack::linear(vec![0.0, 0.3], vec![Vec3::ZERO, Vec3::Y]),
        )],
    ));
    let mut actor = Actor::from_template(&figure_template());
    let mut binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(short)).unwrap();

    binding.advance(0.5);
    assert!(approx(binding.time(), 0.2), "got {}", binding.time());
}

#[test]
fn zero_duration_clip_holds_at_zero() {
    let pose = Arc::new(AnimationClip::new(
        "Pose",
        vec![Track::translation(
            "Body",
            KeyframeTrack::linear(vec![0.0], vec![Vec3::Y]),
        )],
    ));
    assert!(approx(pose.duration, 0.0));

    let mut actor = Actor::from_template(&figure_template());
    let mut binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(pose)).unwrap();

    binding.advance(0.5);
    binding.advance(1.25);
    binding.apply(&mut actor);

    assert!(approx(binding.time(), 0.0));
    assert!(approx(body_y(&actor), 1.0), "got {}", body_y(&actor));
}

#[test]
fn paused_binding_does_not_advance() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(bob_clip())).unwrap();

    binding.pause();
    binding.advance(1.0);
    assert!(approx(binding.time(), 0.0));

    binding.resume();
    binding.advance(1.0);
    assert!(approx(binding.time(), 1.0));
}

#[test]
fn graph_without_motion_holds_rest_pose() {
    let mut actor = Actor::from_template(&figure_template());
    let source = AnimationSource::ControllerGraph(Arc::new(AnimatorController::preview()));
    let mut binding = AnimationBinding::bind(&mut actor, &source).unwrap();

    assert!(binding.motion().is_none());
    assert!(!binding.is_playing());
    binding.advance(1.0);
    assert!(approx(binding.time(), 0.0));
    assert!(approx(body_y(&actor), 0.0));
}

// ============================================================================
// AnimationBinding: rebind
// ============================================================================

#[test]
fn rebind_resets_time_to_zero() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(bob_clip())).unwrap();
    binding.advance(1.2);

    binding.rebind(&mut actor, &AnimationSource::SingleClip(turn_clip())).unwrap();

    assert!(approx(binding.time(), 0.0));
    assert_eq!(binding.motion().unwrap().name, "Turn");
    // The body track of the previous clip no longer holds its pose.
    assert!(approx(body_y(&actor), 0.0));
}

#[test]
fn graph_rebind_keeps_the_same_graph() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding =
        AnimationBinding::bind(&mut actor, &AnimationSource::graph_from_clip(bob_clip())).unwrap();
    let graph_id = binding.graph().unwrap().uuid;

    binding.advance(0.7);
    binding
        .rebind(&mut actor, &AnimationSource::graph_from_clip(turn_clip()))
        .unwrap();

    let graph = binding.graph().unwrap();
    assert_eq!(graph.uuid, graph_id);
    assert_eq!(graph.entry_motion().unwrap().name, "Turn");
    assert!(approx(binding.time(), 0.0));
}

#[test]
fn rebind_switches_clip_to_graph() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(bob_clip())).unwrap();
    binding.set_speed(1.5);

    binding
        .rebind(&mut actor, &AnimationSource::graph_from_clip(turn_clip()))
        .unwrap();

    assert_eq!(binding.kind(), SourceKind::ControllerGraph);
    assert!(approx(binding.speed(), 1.5));
    assert!(binding.play(PREVIEW_STATE, 0.0).is_ok());
}

#[test]
fn rebind_switches_graph_to_clip() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding =
        AnimationBinding::bind(&mut actor, &AnimationSource::graph_from_clip(bob_clip())).unwrap();

    binding.rebind(&mut actor, &AnimationSource::SingleClip(turn_clip())).unwrap();

    assert_eq!(binding.kind(), SourceKind::SingleClip);
    assert!(binding.graph().is_none());
    assert!(binding.is_playing());
}

#[test]
fn play_unknown_state_on_graph_fails() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding =
        AnimationBinding::bind(&mut actor, &AnimationSource::graph_from_clip(bob_clip())).unwrap();

    let result = binding.play("Run", 0.0);
    assert!(matches!(result, Err(PreviewError::UnknownState(name)) if name == "Run"));
}

#[test]
fn play_at_time_seeks() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding =
        AnimationBinding::bind(&mut actor, &AnimationSource::graph_from_clip(bob_clip())).unwrap();

    binding.play(PREVIEW_STATE, 1.0).unwrap();
    binding.apply(&mut actor);
    assert!(approx(binding.time(), 1.0));
    assert!(approx(body_y(&actor), 0.5));
}

#[test]
fn clearing_motion_restores_rest_pose() {
    let mut actor = Actor::from_template(&figure_template());
    let mut binding = AnimationBinding::bind(&mut actor, &AnimationSource::SingleClip(bob_clip())).unwrap();
    binding.advance(1.0);
    binding.apply(&mut actor);
    assert!(body_y(&actor) > 0.0);

    binding.set_motion(&mut actor, None);

    assert!(!binding.is_playing());
    assert!(approx(body_y(&actor), 0.0));
}

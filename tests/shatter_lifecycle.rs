/*
 * Lifecycle tests for the glass effect: break, fall, settle, reset and
 * transition, driven the way a per-frame display callback drives it.
 */

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shatterglass::scene;
use shatterglass::{
    DrawShards, ShardFrame, ShardImage, ShardTransform, ShatterEffect, Transition, TransitionState,
};

#[derive(Default)]
struct FrameLog {
    frames: RefCell<Vec<Vec<ShardTransform>>>,
}

impl DrawShards for FrameLog {
    fn draw_shards(&self, frame: &ShardFrame<'_>) {
        assert_eq!(frame.transforms.len(), frame.geometry.len());
        self.frames.borrow_mut().push(frame.transforms.clone());
    }
}

fn effect(width: f32, height: f32) -> ShatterEffect<StdRng> {
    ShatterEffect::with_rng(width, height, 2.0, StdRng::seed_from_u64(2024))
}

fn snapshot() -> ShardImage {
    ShardImage::from_rgba(4, 4, vec![200; 64]).unwrap()
}

#[test]
fn idle_frames_render_the_unbroken_pane() {
    let mut effect = effect(64.0, 48.0);
    let log = FrameLog::default();

    for frame in 0..10 {
        effect.update(1.0 / 60.0, frame as f32 / 60.0);
        effect.render(&log);
    }

    let frames = log.frames.borrow();
    assert_eq!(frames.len(), 10);
    assert!(frames
        .iter()
        .all(|transforms| transforms.iter().all(|t| *t == ShardTransform::IDENTITY)));
}

#[test]
fn broken_pane_falls_and_keeps_falling() {
    let mut effect = effect(64.0, 48.0);
    let log = FrameLog::default();
    effect.begin();

    for frame in 0..120 {
        effect.update(1.0 / 60.0, frame as f32 / 60.0);
        effect.render(&log);
    }

    let frames = log.frames.borrow();
    let last = frames.last().unwrap();
    // Every shard has dropped and is below the bottom edge or on its way
    assert!(last.iter().all(|t| t.translation().1 < 0.0));
    assert!(effect.grid().states().iter().all(|s| s.y_speed >= -6.0 && s.y_speed < 0.0));

    // No self-termination: more frames keep moving the shards
    let before = effect.grid().states()[0].translate_y;
    effect.update(0.1, 2.1);
    assert!(effect.grid().states()[0].translate_y < before);
}

#[test]
fn edge_shards_settle_horizontally() {
    let mut effect = effect(20.0, 20.0);
    {
        let grid = effect.grid_mut();
        let states = grid.states_mut();
        // Launch the right-most shard of the bottom row into the edge
        let last_col = states.len() / 11 - 1;
        states[last_col].x_speed = 1.0;
    }
    effect.begin();

    for _ in 0..200 {
        effect.update(0.1, 0.0);
    }

    let state = effect.grid().states()[effect.grid().cols() - 1];
    assert_eq!(state.x_speed, 0.0);
}

#[test]
fn reset_restores_the_pane_and_stops_motion() {
    let mut effect = effect(32.0, 32.0);
    let origins: Vec<_> = effect.grid().states().iter().map(|s| s.origin()).collect();
    effect.begin();
    for _ in 0..30 {
        effect.update(0.05, 0.0);
    }

    effect.reset();
    let frozen: Vec<_> = effect.grid().states().to_vec();
    for _ in 0..30 {
        effect.update(0.05, 0.0);
    }

    assert!(!effect.is_animating());
    assert_eq!(effect.grid().states(), &frozen[..]);
    for (state, origin) in effect.grid().states().iter().zip(origins) {
        assert_eq!(state.origin(), origin);
        assert_eq!(state.transform(), ShardTransform::IDENTITY);
    }
}

#[test]
fn transition_runs_for_its_duration_then_reports_done() {
    let mut effect = effect(48.0, 32.0);
    let mut transition = Transition::default();
    transition.start(&mut effect, snapshot());
    assert!(effect.take_pending_texture().is_some());

    let dt = 1.0 / 60.0;
    let mut frames = 0;
    let mut elapsed = 0.0;
    while !transition.advance(dt) {
        effect.update(dt, elapsed);
        elapsed += dt;
        frames += 1;
        assert!(frames < 200, "transition never finished");
    }

    // 1.2 s at 60 fps, give or take float accumulation
    assert!((70..=73).contains(&frames), "finished after {} frames", frames);
    assert_eq!(transition.state(), TransitionState::Finished);
    assert!(effect.is_animating());
}

#[test]
fn resizing_mid_animation_replaces_the_grid() {
    let mut effect = effect(16.0, 16.0);
    effect.begin();
    effect.update(0.2, 0.2);

    effect.resize(8.0, 4.0);
    let log = FrameLog::default();
    effect.render(&log);

    assert_eq!(effect.grid().len(), 3 * 5);
    assert_eq!(log.frames.borrow()[0].len(), 15);
    assert!(log.frames.borrow()[0].iter().all(|t| *t == ShardTransform::IDENTITY));
}

#[test]
fn covering_a_screen_queues_that_screen_before_the_break() {
    let mut effect = effect(32.0, 32.0);
    let slot = effect.texture_slot();
    slot.post(scene::render_screen(0, 32, 32).unwrap());
    assert!(effect.take_pending_texture().is_some());

    // Screen 0 went away; the glass now covers screen 1
    effect.set_texture(scene::capture_screen(None, 1, 32, 32).unwrap());
    effect.begin();

    let queued = effect.take_pending_texture().expect("current screen should be queued");
    let (r, g, b) = scene::screen_color(1);
    assert_eq!(queued.as_rgba().get_pixel(0, 0).0, [r, g, b, 255]);
    assert!(effect.take_pending_texture().is_none());
}

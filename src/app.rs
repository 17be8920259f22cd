/*
 * Application Module
 *
 * This module defines the main application model and logic for the glass
 * demo. It plays the part of the host application: it shows one of several
 * screens, captures the outgoing screen into a snapshot, and runs the shard
 * effect over it while the incoming screen is revealed underneath.
 *
 * Frame order:
 * - UI actions (break, reset, transition, parameter changes)
 * - Effect update with the frame's delta and elapsed time
 * - Transition bookkeeping; a finished transition hides the glass
 * - Renderer sync, which uploads any new snapshot or grid to the GPU
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{debug, info, warn};

use crate::debug::DebugInfo;
use crate::effect::ShatterEffect;
use crate::input::{key_pressed, raw_window_event, resized};
use crate::params::EffectParams;
use crate::renderer::{view, ShardRenderer};
use crate::scene;
use crate::snapshot::ShardImage;
use crate::transition::Transition;
use crate::ui;

// Main model for the application
pub struct Model {
    pub effect: ShatterEffect,
    pub renderer: ShardRenderer,
    pub transition: Transition,
    pub params: EffectParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    // Screen currently shown under the glass
    pub screen_index: usize,
    // Whether the shard layer is drawn at all
    pub overlay_visible: bool,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = EffectParams::from_env();

    let window_id = app
        .new_window()
        .title("Shattering Glass")
        .size(960, 640)
        .view(view)
        .key_pressed(key_pressed)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to create window");

    let window = app.window(window_id).expect("window was just created");
    let egui = Egui::from_window(&window);
    let renderer = ShardRenderer::new(window.device(), Frame::TEXTURE_FORMAT, window.msaa_samples());

    let rect = window.rect();
    let effect = ShatterEffect::new(rect.w(), rect.h(), params.shard_size);
    let transition = Transition::new(params.transition_secs);

    info!(
        width = rect.w(),
        height = rect.h(),
        shards = effect.grid().len(),
        "glass ready"
    );

    // The glass starts out covering the first screen
    let (width, height) = window.inner_size_pixels();
    scene::post_snapshot(effect.texture_slot(), params.image_path.clone(), 0, width, height);

    Model {
        effect,
        renderer,
        transition,
        params,
        egui,
        debug_info: DebugInfo::default(),
        screen_index: 0,
        overlay_visible: true,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    model.egui.set_elapsed_time(update.since_start);
    let actions = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if actions.shard_size_changed {
        model.effect.set_shard_size(model.params.shard_size);
    }
    model.transition.set_duration(model.params.transition_secs);

    if actions.break_glass {
        break_glass(app, model);
    }
    if actions.reset {
        reset_glass(app, model);
    }
    if actions.transition {
        start_transition(app, model);
    }

    let dt = update.since_last.as_secs_f32();
    model.effect.update(dt, update.since_start.as_secs_f32());

    if model.transition.advance(dt) {
        // The incoming screen is fully revealed; discard the glass
        model.effect.reset();
        model.overlay_visible = false;
    }

    model.renderer.sync(app, &model.effect);
    model.debug_info.observe(&model.effect, &model.transition, &model.renderer);
}

// Break the glass over the current screen
pub fn break_glass(app: &App, model: &mut Model) {
    if !model.overlay_visible {
        cover_current_screen(app, model);
    }
    model.effect.begin();
}

// Put the glass back together over the current screen
pub fn reset_glass(app: &App, model: &mut Model) {
    model.effect.reset();
    if !model.overlay_visible {
        cover_current_screen(app, model);
    }
}

// Capture the current screen, switch to the next one and shatter the capture
pub fn start_transition(app: &App, model: &mut Model) {
    match capture_current_screen(app, model) {
        Ok(snapshot) => {
            model.transition.start(&mut model.effect, snapshot);
            model.screen_index += 1;
            model.overlay_visible = true;
            debug!(screen = model.screen_index + 1, "transitioning");
        }
        Err(e) => warn!("cannot start transition: {:#}", e),
    }
}

fn capture_current_screen(app: &App, model: &Model) -> anyhow::Result<ShardImage> {
    let (width, height) = app.main_window().inner_size_pixels();
    scene::capture_screen(model.params.image_path.as_deref(), model.screen_index, width, height)
}

// Queue a snapshot of the current screen before the glass shows, so this
// frame's sync uploads it ahead of the first draw
fn cover_current_screen(app: &App, model: &mut Model) {
    match capture_current_screen(app, model) {
        Ok(snapshot) => {
            model.effect.set_texture(snapshot);
            model.overlay_visible = true;
        }
        Err(e) => warn!("cannot cover screen {}: {:#}", model.screen_index + 1, e),
    }
}

/*
 * Input Module
 *
 * This module handles window events for the glass demo.
 *
 * Features:
 * - Space breaks the glass, R resets it, T runs a full screen transition
 * - Raw events are forwarded to egui
 * - Resizing rebuilds the shard grid for the new drawable size
 */

use nannou::prelude::*;
use tracing::debug;

use crate::app::{self, Model};

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    // Keys typed into the UI belong to the UI
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => app::break_glass(app, model),
        Key::R => app::reset_glass(app, model),
        Key::T => app::start_transition(app, model),
        _ => {}
    }
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    debug!(width = size.x, height = size.y, "window resized");
    model.effect.resize(size.x, size.y);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

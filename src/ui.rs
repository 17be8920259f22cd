/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides the Break / Reset / Transition controls and
 * sliders for the effect parameters.
 * Parameter change detection is handled by the EffectParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::EffectParams;

// What the user asked for this frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UiActions {
    pub break_glass: bool,
    pub reset: bool,
    pub transition: bool,
    pub shard_size_changed: bool,
}

// Update the UI and return the actions requested this frame
pub fn update_ui(egui: &mut Egui, params: &mut EffectParams, debug_info: &DebugInfo) -> UiActions {
    let mut actions = UiActions::default();

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Glass Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Break").clicked() {
                    actions.break_glass = true;
                }
                if ui.button("Reset").clicked() {
                    actions.reset = true;
                }
                if ui.button("Transition").clicked() {
                    actions.transition = true;
                }
            });

            ui.collapsing("Effect Parameters", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.shard_size, EffectParams::get_shard_size_range())
                        .text("Shard Size (px)"),
                );
                ui.add(
                    egui::Slider::new(&mut params.transition_secs, EffectParams::get_transition_secs_range())
                        .text("Transition (s)"),
                );
            });

            ui.collapsing("Performance", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Shards: {}", debug_info.shard_count));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.label("Space: break   R: reset   T: transition");
        });

    actions.shard_size_changed = params.shard_size_changed();
    actions
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    // Create a background panel in the bottom-left corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 240.0;
    let panel_height = line_height * 7.0 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    // Draw the background panel
    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Grid: {} x {} = {} shards", debug_info.grid_size.0, debug_info.grid_size.1, debug_info.shard_count),
        format!("Moving: {}  Settled: {}", debug_info.moving_shards, debug_info.settled_shards),
        format!("Animating: {}", debug_info.animating),
        format!("Transition: {:.0}%", debug_info.transition_progress * 100.0),
        format!("Snapshot: {}", if debug_info.texture_loaded { "loaded" } else { "pending" }),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 100.0, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}

/*
 * Scene Module
 *
 * Stand-ins for the application screens the glass transitions between.
 * Each screen has a palette color and a title. `draw_screen` shows a screen
 * live through nannou's Draw API; `render_screen` rasterizes the same screen
 * on the CPU, playing the part of the screen capture that feeds the shards.
 */

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use nannou::image::{Rgba, RgbaImage};
use nannou::prelude::*;
use tracing::{debug, warn};

use crate::effect::TextureSlot;
use crate::snapshot::ShardImage;

const PALETTE: [(u8, u8, u8); 4] = [
    (32, 86, 168),
    (196, 72, 52),
    (44, 140, 92),
    (136, 72, 160),
];

// Checker cell edge in pixels for the captured pattern
const CHECKER: u32 = 24;

pub fn screen_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

pub fn draw_screen(draw: &Draw, window_rect: Rect, index: usize) {
    let (r, g, b) = screen_color(index);
    draw.background().color(rgb(r, g, b));

    draw.text(&format!("Screen {}", index + 1))
        .xy(window_rect.xy())
        .color(WHITE)
        .font_size(48);
}

// CPU rendition of a screen: a vertical gradient in its color with a faint checker
pub fn render_screen(index: usize, width: u32, height: u32) -> Result<ShardImage> {
    let (r, g, b) = screen_color(index);

    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        // Darker towards the bottom of the image
        let shade = 1.0 - 0.45 * (y as f32 / height.max(1) as f32);
        let checker = if (x / CHECKER + y / CHECKER) % 2 == 0 { 1.0 } else { 0.85 };
        let scale = |c: u8| (c as f32 * shade * checker).min(255.0) as u8;
        Rgba([scale(r), scale(g), scale(b), 255])
    });

    ShardImage::from_image(pixels).context("rendered an empty screen")
}

pub fn load_snapshot(path: &Path) -> Result<ShardImage> {
    ShardImage::open(path).with_context(|| format!("failed to load snapshot {}", path.display()))
}

// Snapshot of screen `index`: the configured image if it loads, otherwise the rendered screen
pub fn capture_screen(image_path: Option<&Path>, index: usize, width: u32, height: u32) -> Result<ShardImage> {
    match image_path {
        Some(path) => load_snapshot(path).or_else(|e| {
            warn!("{:#}, falling back to the rendered screen", e);
            render_screen(index, width, height)
        }),
        None => render_screen(index, width, height),
    }
}

// Produce a snapshot off the render thread and post it to the slot when ready
pub fn post_snapshot(slot: TextureSlot, image_path: Option<PathBuf>, index: usize, width: u32, height: u32) {
    thread::spawn(move || {
        match capture_screen(image_path.as_deref(), index, width, height) {
            Ok(image) => {
                debug!(width = image.width(), height = image.height(), "snapshot ready");
                slot.post(image);
            }
            Err(e) => warn!("no snapshot for screen {}: {:#}", index + 1, e),
        }
    });
}

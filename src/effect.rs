/*
 * Effect Module
 *
 * This module defines ShatterEffect, the public face of the glass effect.
 * It owns the shard grid and the animating flag, and hands the renderer a
 * snapshot of the current shard state every frame.
 *
 * Per frame the driver calls `update(dt, elapsed)` and then `render(..)`.
 * Stepping only happens while animating; rendering always happens, so an
 * idle effect shows the unbroken snapshot.
 */

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::grid::ShardGrid;
use crate::shard::{ShardGeometry, ShardTransform, ShardUniforms};
use crate::snapshot::ShardImage;

// Everything the GPU needs to draw one frame of shards
pub struct ShardFrame<'a> {
    pub geometry: &'a [ShardGeometry],
    pub transforms: Vec<ShardTransform>,
    pub uniforms: ShardUniforms,
    pub generation: u64,
}

impl ShardFrame<'_> {
    pub fn len(&self) -> usize {
        self.geometry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }
}

// Anything that can draw a frame of shards: the GPU renderer, or a recorder in tests
pub trait DrawShards {
    fn draw_shards(&self, frame: &ShardFrame<'_>);
}

/// Hand-off point for snapshot textures.
///
/// Capture usually finishes off the render thread. Any thread may post an
/// image here; the renderer takes the newest one before its next draw.
#[derive(Clone, Default)]
pub struct TextureSlot {
    pending: Arc<Mutex<Option<ShardImage>>>,
}

impl TextureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    // Replace any image not yet picked up by the renderer
    pub fn post(&self, image: ShardImage) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending = Some(image);
    }

    pub fn take(&self) -> Option<ShardImage> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

pub struct ShatterEffect<R: Rng = StdRng> {
    grid: ShardGrid,
    width: f32,
    height: f32,
    shard_size: f32,
    // Bumped on every grid rebuild so GPU-side copies know to refresh
    generation: u64,
    animating: bool,
    textures: TextureSlot,
    rng: R,
}

impl ShatterEffect<StdRng> {
    pub fn new(width: f32, height: f32, shard_size: f32) -> Self {
        Self::with_rng(width, height, shard_size, StdRng::from_entropy())
    }
}

impl<R: Rng> ShatterEffect<R> {
    pub fn with_rng(width: f32, height: f32, shard_size: f32, mut rng: R) -> Self {
        let grid = ShardGrid::build(width, height, shard_size, &mut rng);

        Self {
            grid,
            width,
            height,
            shard_size,
            generation: 0,
            animating: false,
            textures: TextureSlot::new(),
            rng,
        }
    }

    // Queue a new shard texture; kinematic state is untouched
    pub fn set_texture(&self, image: ShardImage) {
        debug!(width = image.width(), height = image.height(), "shard texture queued");
        self.textures.post(image);
    }

    // A handle other threads can use to deliver textures
    pub fn texture_slot(&self) -> TextureSlot {
        self.textures.clone()
    }

    pub fn take_pending_texture(&self) -> Option<ShardImage> {
        self.textures.take()
    }

    pub fn begin(&mut self) {
        if !self.animating {
            debug!(shards = self.grid.len(), "shatter begins");
        }
        self.animating = true;
    }

    pub fn reset(&mut self) {
        self.grid.reset(&mut self.rng);
        self.animating = false;
        debug!(shards = self.grid.len(), "shatter reset");
    }

    pub fn update(&mut self, dt: f32, elapsed: f32) {
        if !self.animating {
            return;
        }
        trace!(dt, elapsed, "shatter update");
        self.grid.step(dt);
    }

    pub fn render<D: DrawShards + ?Sized>(&self, target: &D) {
        target.draw_shards(&self.shard_frame());
    }

    pub fn shard_frame(&self) -> ShardFrame<'_> {
        ShardFrame {
            geometry: self.grid.geometry(),
            transforms: self.grid.transforms(),
            uniforms: self.grid.uniforms(),
            generation: self.generation,
        }
    }

    // Rebuild the grid for a new drawable size, discarding all shard state
    pub fn resize(&mut self, width: f32, height: f32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.rebuild();
    }

    pub fn set_shard_size(&mut self, shard_size: f32) {
        if shard_size == self.shard_size {
            return;
        }
        self.shard_size = shard_size;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.grid = ShardGrid::build(self.width, self.height, self.shard_size, &mut self.rng);
        self.generation += 1;
        debug!(
            generation = self.generation,
            shards = self.grid.len(),
            "shard grid rebuilt"
        );
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn grid(&self) -> &ShardGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut ShardGrid {
        &mut self.grid
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn shard_size(&self) -> f32 {
        self.shard_size
    }
}

/*
 * Shard Grid Module
 *
 * This module builds the screen-filling grid of shards. Given a viewport
 * size in pixels and a shard size, it lays out one quad per cell in
 * row-major order (row 0 at the bottom of normalized device space) and
 * seeds one kinematic state per shard.
 *
 * The geometry, the kinematic states and the uniforms always belong to the
 * same build: a new viewport or shard size replaces all three together.
 */

use rand::Rng;
use tracing::{debug, warn};

use crate::physics;
use crate::shard::{KinematicState, ShardGeometry, ShardTransform, ShardUniforms};

// Shards smaller than a pixel sample nothing new from the texture
pub const MIN_SHARD_SIZE: f32 = 1.0;

// Upper bound on shards per grid; larger layouts collapse to an empty grid
pub const MAX_SHARDS: usize = 1 << 24;

pub struct ShardGrid {
    rows: usize,
    cols: usize,
    geometry: Vec<ShardGeometry>,
    states: Vec<KinematicState>,
    uniforms: ShardUniforms,
}

impl ShardGrid {
    // Lay out the grid for a viewport; degenerate sizes give an empty grid
    pub fn build<R: Rng + ?Sized>(width: f32, height: f32, shard_size: f32, rng: &mut R) -> Self {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) || !usable(shard_size) || shard_size < MIN_SHARD_SIZE {
            debug!(width, height, shard_size, "degenerate viewport, building empty shard grid");
            return Self::empty();
        }

        // Sized in f64 so a huge viewport cannot overflow before the cap applies
        let rows = (height as f64 / shard_size as f64).floor() + 1.0;
        let cols = (width as f64 / shard_size as f64).floor() + 1.0;
        if rows * cols > MAX_SHARDS as f64 {
            warn!(width, height, shard_size, max = MAX_SHARDS, "shard grid too large, building empty shard grid");
            return Self::empty();
        }
        let rows = rows as usize;
        let cols = cols as usize;

        // Shard extent in normalized device units
        let size_x = shard_size / width * 2.0;
        let size_y = shard_size / height * 2.0;

        let count = rows * cols;
        let mut geometry = Vec::with_capacity(count);
        let mut states = Vec::with_capacity(count);

        for row in 0..rows {
            let center_y = row as f32 * size_y + size_y / 2.0 - 1.0;
            let tex_v = row as f32 / rows as f32;

            for col in 0..cols {
                let center_x = col as f32 * size_x + size_x / 2.0 - 1.0;
                let tex_u = col as f32 / cols as f32;

                geometry.push(ShardGeometry::new(center_x, center_y, tex_u, tex_v));
                states.push(KinematicState::at_rest(center_x, center_y, rng));
            }
        }

        debug!(rows, cols, shards = count, width, height, shard_size, "built shard grid");

        Self {
            rows,
            cols,
            geometry,
            states,
            uniforms: ShardUniforms::new(size_x / 2.0, size_y / 2.0, shard_size),
        }
    }

    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            geometry: Vec::new(),
            states: Vec::new(),
            uniforms: ShardUniforms::default(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn geometry(&self) -> &[ShardGeometry] {
        &self.geometry
    }

    pub fn states(&self) -> &[KinematicState] {
        &self.states
    }

    // Mutable access for callers that need to place shards precisely (tests, benches)
    pub fn states_mut(&mut self) -> &mut [KinematicState] {
        &mut self.states
    }

    pub fn uniforms(&self) -> ShardUniforms {
        self.uniforms
    }

    // Index of the shard at (row, col), if it exists
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    // Put every shard back at rest with a fresh random launch
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for state in &mut self.states {
            state.reset(rng);
        }
    }

    pub fn step(&mut self, dt: f32) {
        physics::step_shards(&mut self.states, dt);
    }

    // Per-shard transforms derived from the current translations
    pub fn transforms(&self) -> Vec<ShardTransform> {
        self.states.iter().map(KinematicState::transform).collect()
    }

    pub fn moving_count(&self) -> usize {
        self.states.iter().filter(|state| state.is_moving()).count()
    }

    pub fn settled_count(&self) -> usize {
        self.states.iter().filter(|state| state.x_speed == 0.0).count()
    }
}

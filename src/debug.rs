/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and effect state to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Shard count and how many are still moving
 * - Animation and transition state
 * - Whether the GPU holds a snapshot texture yet
 */

use std::time::Duration;

use crate::effect::ShatterEffect;
use crate::renderer::ShardRenderer;
use crate::transition::Transition;

// Debug information to display
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub shard_count: usize,
    pub moving_shards: usize,
    pub settled_shards: usize,
    pub grid_size: (usize, usize),
    pub animating: bool,
    pub transition_progress: f32,
    pub texture_loaded: bool,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            shard_count: 0,
            moving_shards: 0,
            settled_shards: 0,
            grid_size: (0, 0),
            animating: false,
            transition_progress: 0.0,
            texture_loaded: false,
        }
    }
}

impl DebugInfo {
    // Refresh the effect-derived fields
    pub fn observe(&mut self, effect: &ShatterEffect, transition: &Transition, renderer: &ShardRenderer) {
        let grid = effect.grid();
        self.shard_count = grid.len();
        self.moving_shards = grid.moving_count();
        self.settled_shards = grid.settled_count();
        self.grid_size = (grid.rows(), grid.cols());
        self.animating = effect.is_animating();
        self.transition_progress = transition.progress();
        self.texture_loaded = renderer.has_texture();
    }
}

/*
 * Shattering Glass Effect - Module Definitions
 *
 * This file defines the module structure of the glass transition effect.
 * The core (shard, grid, physics, effect) is a self-contained simulation;
 * the renderer feeds it to the GPU, and the remaining modules are the
 * nannou application that drives it.
 */

// Re-export key components for easier access
pub use effect::{DrawShards, ShardFrame, ShatterEffect, TextureSlot};
pub use error::ShatterError;
pub use grid::ShardGrid;
pub use params::EffectParams;
pub use renderer::ShardRenderer;
pub use shard::{KinematicState, ShardGeometry, ShardTransform, ShardUniforms};
pub use snapshot::ShardImage;
pub use transition::{Transition, TransitionState};
pub use debug::DebugInfo;
pub use app::Model;

// Define modules
pub mod shard;
pub mod grid;
pub mod physics;
pub mod effect;
pub mod snapshot;
pub mod error;
pub mod transition;
pub mod params;
pub mod renderer;
pub mod debug;
pub mod scene;
pub mod app;
pub mod ui;
pub mod input;

// Constants
pub const DEFAULT_SHARD_SIZE: f32 = 2.0;

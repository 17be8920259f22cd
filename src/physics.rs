/*
 * Physics Module
 *
 * This module advances the shard simulation by one frame. Every shard is
 * independent: it reads and writes only its own kinematic state, so the
 * pass is a single ordered sweep with no neighbor lookups.
 *
 * Per shard and per frame:
 * 1. Integrate vertical speed from acceleration, clamped at terminal velocity
 * 2. Integrate the translation from the speeds
 * 3. Reflect and damp horizontal speed at the left and right screen edges,
 *    snapping tiny speeds to exactly zero
 */

use tracing::trace;

use crate::shard::KinematicState;

// Advance every shard by `dt` seconds. Negative or large steps are passed through untouched.
pub fn step_shards(states: &mut [KinematicState], dt: f32) {
    trace!(shards = states.len(), dt, "stepping shards");

    for state in states.iter_mut() {
        state.advance(dt);
    }
}

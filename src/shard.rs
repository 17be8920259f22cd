/*
 * Shard Module
 *
 * This module defines the per-shard data of the glass effect:
 * - ShardGeometry: the static quad center and texture origin uploaded to the GPU once
 * - KinematicState: the mutable motion state advanced every animating frame
 * - ShardTransform / ShardUniforms: the per-frame and per-grid GPU blocks
 *
 * A shard falls under a randomized downward acceleration with a capped
 * terminal speed, and bounces inelastically off the left and right screen edges.
 */

use nannou::prelude::*;
use rand::Rng;

// Most negative vertical speed a shard may reach
pub const MAX_Y_SPEED: f32 = -6.0;
// Fraction of horizontal speed kept (and reversed) after hitting a screen edge
pub const BOUNCE_DAMPING: f32 = 0.6;
// Horizontal speeds below this after a bounce are snapped to exactly zero
pub const SETTLE_EPSILON: f32 = 0.01;
// Initial horizontal speed is uniform in [-0.5, 0.5) scaled by this
pub const X_SPEED_SPREAD: f32 = 0.7;
// Vertical acceleration magnitude is BASE + uniform [0, 1) * SPREAD
pub const Y_ACCEL_BASE: f32 = 3.0;
pub const Y_ACCEL_SPREAD: f32 = 1.5;

// Static per-shard geometry, laid out exactly as the vertex stage reads it
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShardGeometry {
    /// Quad center in normalized device coordinates.
    pub center: [f32; 2],
    /// Origin of the shard's sub-rectangle in texture space.
    pub tex_origin: [f32; 2],
}

impl ShardGeometry {
    pub fn new(center_x: f32, center_y: f32, tex_u: f32, tex_v: f32) -> Self {
        Self {
            center: [center_x, center_y],
            tex_origin: [tex_u, tex_v],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    pub x_speed: f32,
    pub y_speed: f32,
    pub x_accel: f32,
    pub y_accel: f32,
    origin_center_x: f32,
    origin_center_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl KinematicState {
    // A shard at rest at the given center with a freshly randomized launch
    pub fn at_rest<R: Rng + ?Sized>(center_x: f32, center_y: f32, rng: &mut R) -> Self {
        let x_speed = (rng.gen::<f32>() - 0.5) * X_SPEED_SPREAD;
        let y_accel = -(rng.gen::<f32>() * Y_ACCEL_SPREAD + Y_ACCEL_BASE);

        Self::with_motion(center_x, center_y, x_speed, y_accel)
    }

    // A shard at rest with explicit launch values, used where the random draw must be fixed
    pub fn with_motion(center_x: f32, center_y: f32, x_speed: f32, y_accel: f32) -> Self {
        Self {
            x_speed,
            y_speed: 0.0,
            x_accel: 0.0,
            y_accel,
            origin_center_x: center_x,
            origin_center_y: center_y,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    // Reinitialize motion while keeping the rest position
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::at_rest(self.origin_center_x, self.origin_center_y, rng);
    }

    #[inline]
    pub fn origin(&self) -> (f32, f32) {
        (self.origin_center_x, self.origin_center_y)
    }

    // Absolute position in normalized device coordinates
    #[inline]
    pub fn position(&self) -> (f32, f32) {
        (
            self.translate_x + self.origin_center_x,
            self.translate_y + self.origin_center_y,
        )
    }

    // Advance this shard by one frame of `dt` seconds
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.y_speed += dt * self.y_accel;
        if self.y_speed < MAX_Y_SPEED {
            self.y_speed = MAX_Y_SPEED;
        }

        self.translate_x += dt * self.x_speed;
        self.translate_y += dt * self.y_speed;

        // No response at the bottom edge: shards fall off screen
        let (real_x, _real_y) = self.position();
        if real_x <= -1.0 || real_x >= 1.0 {
            self.x_speed = -self.x_speed * BOUNCE_DAMPING;
            if self.x_speed.abs() < SETTLE_EPSILON {
                self.x_speed = 0.0;
            }
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.x_speed != 0.0 || self.y_speed != 0.0
    }

    #[inline]
    pub fn transform(&self) -> ShardTransform {
        ShardTransform::from(Mat4::from_translation(vec3(self.translate_x, self.translate_y, 0.0)))
    }
}

// Column-major 4x4 matrix as consumed by the vertex stage (four vec4 attributes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShardTransform {
    pub columns: [[f32; 4]; 4],
}

impl ShardTransform {
    pub const IDENTITY: Self = Self {
        columns: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(&self) -> (f32, f32) {
        (self.columns[3][0], self.columns[3][1])
    }
}

impl From<Mat4> for ShardTransform {
    fn from(matrix: Mat4) -> Self {
        Self {
            columns: matrix.to_cols_array_2d(),
        }
    }
}

// Uniform block shared by every shard of one grid, padded to 16 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShardUniforms {
    /// Half extent of a shard in NDC, which is also its full extent in texture space.
    pub tex_scale: [f32; 2],
    pub pixel_size: f32,
    _padding: f32,
}

impl ShardUniforms {
    pub fn new(tex_scale_x: f32, tex_scale_y: f32, pixel_size: f32) -> Self {
        Self {
            tex_scale: [tex_scale_x, tex_scale_y],
            pixel_size,
            _padding: 0.0,
        }
    }
}

impl Default for ShardUniforms {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reset_draws_launch_values_within_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let state = KinematicState::at_rest(0.25, -0.5, &mut rng);
            assert!(state.x_speed >= -0.35 && state.x_speed < 0.35);
            assert!(state.y_accel <= -3.0 && state.y_accel >= -4.5);
            assert_eq!(state.y_speed, 0.0);
            assert_eq!(state.x_accel, 0.0);
            assert_eq!(state.translate_x, 0.0);
            assert_eq!(state.translate_y, 0.0);
            assert_eq!(state.origin(), (0.25, -0.5));
        }
    }

    #[test]
    fn one_second_step_integrates_speed_then_position() {
        let mut state = KinematicState::with_motion(0.0, 0.0, 0.7, -3.0);
        state.advance(1.0);

        assert_eq!(state.y_speed, -3.0);
        assert_eq!(state.translate_y, -3.0);
        assert!((state.translate_x - 0.7).abs() < 1e-6);
        assert_eq!(state.x_speed, 0.7);
    }

    #[test]
    fn vertical_speed_never_exceeds_terminal_velocity() {
        let mut state = KinematicState::with_motion(0.0, 0.0, 0.0, -4.0);
        for _ in 0..20 {
            state.advance(1.0);
            assert!(state.y_speed >= MAX_Y_SPEED);
        }
        assert_eq!(state.y_speed, MAX_Y_SPEED);
    }

    #[test]
    fn edge_bounce_decays_to_exact_rest() {
        let mut state = KinematicState::with_motion(0.99, 0.0, 1.0, -3.0);

        let mut settled_at = None;
        for step in 0..100 {
            state.advance(0.1);
            if state.x_speed == 0.0 {
                settled_at = Some(step);
                break;
            }
        }
        assert!(settled_at.is_some(), "horizontal speed never settled");

        for _ in 0..200 {
            state.advance(0.1);
            assert_eq!(state.x_speed, 0.0);
        }
    }

    #[test]
    fn first_edge_hit_reverses_and_damps() {
        let mut state = KinematicState::with_motion(0.99, 0.0, 1.0, -3.0);
        state.advance(0.1);
        assert!((state.x_speed + 0.6).abs() < 1e-6);
    }

    #[test]
    fn reset_keeps_rest_position() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = KinematicState::with_motion(-0.4, 0.8, 0.2, -3.5);
        for _ in 0..10 {
            state.advance(0.05);
        }
        state.reset(&mut rng);

        assert_eq!(state.origin(), (-0.4, 0.8));
        assert_eq!(state.transform(), ShardTransform::IDENTITY);
    }

    #[test]
    fn transform_is_pure_translation() {
        let mut state = KinematicState::with_motion(0.0, 0.0, 0.5, -3.0);
        state.advance(0.5);

        let transform = state.transform();
        assert_eq!(transform.translation(), (state.translate_x, state.translate_y));
        assert_eq!(transform.columns[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(transform.columns[1], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(transform.columns[2], [0.0, 0.0, 1.0, 0.0]);
    }
}

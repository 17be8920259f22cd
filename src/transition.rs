/*
 * Transition Module
 *
 * Drives one screen-to-screen transition: the outgoing screen's snapshot
 * becomes the shard texture, the glass breaks, and after a fixed duration
 * the transition reports itself finished so the caller can discard the
 * overlay and show the incoming screen.
 *
 * The transition only observes time. It never stops the simulation; the
 * effect keeps integrating until someone calls `reset()`.
 */

use rand::Rng;
use tracing::debug;

use crate::effect::ShatterEffect;
use crate::snapshot::ShardImage;

pub const DEFAULT_TRANSITION_SECS: f32 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionState {
    Idle,
    Running { elapsed: f32 },
    Finished,
}

pub struct Transition {
    duration: f32,
    state: TransitionState,
}

impl Transition {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            state: TransitionState::Idle,
        }
    }

    // Break the glass over `snapshot`; restarting mid-transition starts over
    pub fn start<R: Rng>(&mut self, effect: &mut ShatterEffect<R>, snapshot: ShardImage) {
        effect.reset();
        effect.set_texture(snapshot);
        effect.begin();
        self.state = TransitionState::Running { elapsed: 0.0 };
        debug!(duration = self.duration, "transition started");
    }

    // Accumulate frame time; true only on the frame the duration runs out
    pub fn advance(&mut self, dt: f32) -> bool {
        if let TransitionState::Running { elapsed } = self.state {
            let elapsed = elapsed + dt.max(0.0);
            if elapsed >= self.duration {
                self.state = TransitionState::Finished;
                debug!(elapsed, "transition finished");
                return true;
            }
            self.state = TransitionState::Running { elapsed };
        }
        false
    }

    pub fn progress(&self) -> f32 {
        match self.state {
            TransitionState::Idle => 0.0,
            TransitionState::Running { elapsed } if self.duration > 0.0 => {
                (elapsed / self.duration).clamp(0.0, 1.0)
            }
            TransitionState::Running { .. } | TransitionState::Finished => 1.0,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TransitionState::Running { .. })
    }

    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot() -> ShardImage {
        ShardImage::from_rgba(2, 2, vec![128; 16]).unwrap()
    }

    #[test]
    fn start_breaks_the_glass_with_the_snapshot() {
        let mut effect = ShatterEffect::with_rng(20.0, 20.0, 2.0, StdRng::seed_from_u64(5));
        let mut transition = Transition::default();

        transition.start(&mut effect, snapshot());

        assert!(effect.is_animating());
        assert!(transition.is_running());
        assert!(effect.take_pending_texture().is_some());
    }

    #[test]
    fn finishes_once_after_duration() {
        let mut effect = ShatterEffect::with_rng(20.0, 20.0, 2.0, StdRng::seed_from_u64(5));
        let mut transition = Transition::new(1.2);
        transition.start(&mut effect, snapshot());

        let mut finished_frames = 0;
        for frame in 0..120 {
            effect.update(0.1, frame as f32 * 0.1);
            if transition.advance(0.1) {
                finished_frames += 1;
            }
        }

        assert_eq!(finished_frames, 1);
        assert_eq!(transition.state(), TransitionState::Finished);
        assert_eq!(transition.progress(), 1.0);
        // Observation stops, the simulation does not
        assert!(effect.is_animating());
    }

    #[test]
    fn progress_tracks_elapsed_time() {
        let mut effect = ShatterEffect::with_rng(4.0, 4.0, 2.0, StdRng::seed_from_u64(1));
        let mut transition = Transition::new(2.0);
        assert_eq!(transition.progress(), 0.0);
        assert!(!transition.advance(1.0));

        transition.start(&mut effect, snapshot());
        assert!(!transition.advance(0.5));
        assert!((transition.progress() - 0.25).abs() < 1e-6);
        assert!(!transition.advance(-10.0));
        assert!((transition.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn restart_resets_shards() {
        let mut effect = ShatterEffect::with_rng(10.0, 10.0, 2.0, StdRng::seed_from_u64(9));
        let mut transition = Transition::default();
        transition.start(&mut effect, snapshot());
        effect.update(0.4, 0.4);

        transition.start(&mut effect, snapshot());
        assert!(effect
            .grid()
            .states()
            .iter()
            .all(|s| s.translate_x == 0.0 && s.translate_y == 0.0));
        assert_eq!(transition.progress(), 0.0);
    }

    #[test]
    fn zero_duration_finishes_on_first_advance() {
        let mut effect = ShatterEffect::with_rng(4.0, 4.0, 2.0, StdRng::seed_from_u64(2));
        let mut transition = Transition::new(0.0);
        transition.start(&mut effect, snapshot());
        assert!(transition.advance(0.0));
    }
}

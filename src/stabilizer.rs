//! Debouncing of the per-frame classification stream.

use crate::gesture::Gesture;

/// The tracker's candidate gesture and how many consecutive frames agreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StabilizationState {
    /// Gesture seen on the most recent frames.
    pub candidate: Gesture,
    /// Number of consecutive frames that classified as `candidate`.
    pub count: u32,
}

impl StabilizationState {
    /// The state after a reset: `{Unknown, 0}`.
    pub const IDLE: Self = Self {
        candidate: Gesture::Unknown,
        count: 0,
    };
}

/// Turns a noisy classification stream into confirmed gestures.
///
/// A gesture is confirmed once it has been observed on `threshold`
/// consecutive frames. `Unknown` takes part in the run comparison like any
/// other value but is never confirmed.
#[derive(Debug, Clone)]
pub struct Stabilizer {
    state: StabilizationState,
    threshold: u32,
}

impl Stabilizer {
    /// Creates an idle tracker that confirms after `threshold` frames.
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self {
            state: StabilizationState::IDLE,
            threshold,
        }
    }

    /// Feeds one frame's classification.
    ///
    /// Returns the confirmed gesture on the frame where the run reaches the
    /// threshold. Longer runs do not confirm again; the caller resets the
    /// tracker once a round has been triggered.
    ///
    /// # Example
    ///
    /// ```
    /// use rpsrs::{Gesture, Stabilizer};
    ///
    /// let mut tracker = Stabilizer::new(2);
    /// assert_eq!(tracker.observe(Gesture::Rock), None);
    /// assert_eq!(tracker.observe(Gesture::Rock), Some(Gesture::Rock));
    /// ```
    pub fn observe(&mut self, gesture: Gesture) -> Option<Gesture> {
        if gesture == self.state.candidate {
            self.state.count = self.state.count.saturating_add(1);
        } else {
            self.state = StabilizationState {
                candidate: gesture,
                count: 1,
            };
        }

        (gesture.is_playable() && self.state.count == self.threshold).then_some(gesture)
    }

    /// Returns to `{Unknown, 0}`.
    pub const fn reset(&mut self) {
        self.state = StabilizationState::IDLE;
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> StabilizationState {
        self.state
    }

    /// Returns the confirmation threshold in frames.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_runs_never_confirm() {
        let mut tracker = Stabilizer::new(3);
        for _ in 0..10 {
            assert_eq!(tracker.observe(Gesture::Unknown), None);
        }
        assert_eq!(tracker.state().candidate, Gesture::Unknown);
        assert_eq!(tracker.state().count, 10);
    }

    #[test]
    fn run_past_threshold_confirms_once() {
        let mut tracker = Stabilizer::new(2);
        let fired: usize = (0..6)
            .filter_map(|_| tracker.observe(Gesture::Paper))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn unknown_breaks_a_run() {
        let mut tracker = Stabilizer::new(3);
        tracker.observe(Gesture::Scissors);
        tracker.observe(Gesture::Scissors);
        tracker.observe(Gesture::Unknown);
        assert_eq!(tracker.state().count, 1);
        assert_eq!(tracker.observe(Gesture::Scissors), None);
        assert_eq!(tracker.state().count, 1);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut tracker = Stabilizer::new(3);
        tracker.observe(Gesture::Rock);
        tracker.reset();
        assert_eq!(tracker.state(), StabilizationState::IDLE);
    }
}

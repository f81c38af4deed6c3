//! Session engine and state management.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::debug;

use crate::opponent::SeededOpponent;
use crate::options::SessionOptions;
use crate::result::RoundOutcome;
use crate::score::ScoreTally;
use crate::stabilizer::{StabilizationState, Stabilizer};
use crate::sync::Mutex;

mod frame;
mod round;
pub mod state;

pub use state::{FrameReport, SessionPhase, Snapshot, Status};

/// A Rock-Paper-Scissors session driven by hand observations.
///
/// The session owns the stabilizer, the phase, the current round result, the
/// score and the opponent. All methods take `&self`, so a session can be
/// shared between the frame pump and a cooldown timer.
///
/// State is always locked in the order phase, opponent, stabilizer, current
/// result, score.
pub struct Session<O = SeededOpponent> {
    /// Session options.
    pub options: SessionOptions,
    phase: Mutex<SessionPhase>,
    stabilizer: Mutex<Stabilizer>,
    current: Mutex<Option<RoundOutcome>>,
    score: Mutex<ScoreTally>,
    /// Rounds played so far; the next round number is this plus one.
    rounds: AtomicU64,
    /// Set while a frame is being classified.
    in_flight: AtomicBool,
    opponent: Mutex<O>,
}

impl Session {
    /// Creates a session whose opponent is seeded with `seed`.
    ///
    /// `options` must pass [`SessionOptions::validate`]; see
    /// [`Session::with_opponent`].
    ///
    /// # Example
    ///
    /// ```
    /// use rpsrs::{Session, SessionOptions};
    ///
    /// let session = Session::new(SessionOptions::default(), 42);
    /// assert!(!session.is_locked());
    /// ```
    #[must_use]
    pub fn new(options: SessionOptions, seed: u64) -> Self {
        Self::with_opponent(options, SeededOpponent::new(seed))
    }
}

impl<O> Session<O> {
    /// Creates a session with a custom opponent.
    ///
    /// `options` must pass [`SessionOptions::validate`]. A zero threshold
    /// never confirms a gesture and a zero cooldown ends before the round is
    /// shown.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `options` are invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use rpsrs::{Gesture, Session, SessionOptions};
    ///
    /// let session = Session::with_opponent(SessionOptions::default(), || Gesture::Rock);
    /// let outcome = session.trigger_round(Gesture::Paper).unwrap();
    /// assert_eq!(outcome.cpu, Gesture::Rock);
    /// ```
    #[must_use]
    pub fn with_opponent(options: SessionOptions, opponent: O) -> Self {
        debug_assert!(
            options.validate().is_ok(),
            "invalid session options: {options:?}"
        );
        Self {
            phase: Mutex::new(SessionPhase::Detecting),
            stabilizer: Mutex::new(Stabilizer::new(options.threshold)),
            current: Mutex::new(None),
            score: Mutex::new(ScoreTally::new()),
            rounds: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
            opponent: Mutex::new(opponent),
            options,
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        *self.phase.lock()
    }

    /// Returns whether a cooldown is active.
    pub fn is_locked(&self) -> bool {
        self.phase().is_locked()
    }

    /// Returns the stabilizer state.
    pub fn tracking(&self) -> StabilizationState {
        self.stabilizer.lock().state()
    }

    /// Returns the most recent round result, unless it has been cleared.
    pub fn current_outcome(&self) -> Option<RoundOutcome> {
        *self.current.lock()
    }

    /// Returns the score tally.
    pub fn score(&self) -> ScoreTally {
        *self.score.lock()
    }

    /// Returns how many rounds have been played, including before resets.
    pub fn rounds_played(&self) -> u64 {
        self.rounds.load(Ordering::SeqCst)
    }

    /// Returns the status the display should show.
    pub fn status(&self) -> Status {
        self.snapshot().status()
    }

    /// Returns a consistent view of the session.
    #[expect(
        clippy::significant_drop_tightening,
        reason = "phase lock is held so no round lands mid-read"
    )]
    pub fn snapshot(&self) -> Snapshot {
        let phase = self.phase.lock();
        Snapshot {
            phase: *phase,
            tracking: self.stabilizer.lock().state(),
            threshold: self.options.threshold,
            current: *self.current.lock(),
            score: *self.score.lock(),
            rounds_played: self.rounds.load(Ordering::SeqCst),
        }
    }

    /// Clears the round result, the score and the stabilizer.
    ///
    /// An active cooldown is left to run to completion.
    #[expect(
        clippy::significant_drop_tightening,
        reason = "phase lock is held so no round lands mid-reset"
    )]
    pub fn reset(&self) {
        let phase = self.phase.lock();
        self.stabilizer.lock().reset();
        *self.current.lock() = None;
        self.score.lock().reset();
        debug!(phase = ?*phase, "session reset");
    }

    /// Clears the stabilizer and the round result, keeping the score.
    ///
    /// Used when the capture source is toggled. An active cooldown is left
    /// to run to completion.
    #[expect(
        clippy::significant_drop_tightening,
        reason = "phase lock is held so no round lands mid-interrupt"
    )]
    pub fn interrupt(&self) {
        let phase = self.phase.lock();
        self.stabilizer.lock().reset();
        *self.current.lock() = None;
        debug!(phase = ?*phase, "session interrupted");
    }
}

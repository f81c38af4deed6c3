//! Session phase, status, and per-frame report types.

use core::fmt;

use crate::gesture::Gesture;
use crate::result::RoundOutcome;
use crate::score::ScoreTally;
use crate::stabilizer::StabilizationState;

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    /// Frames are classified and fed to the stabilizer.
    #[default]
    Detecting,
    /// A round result is on display; frames are consumed unclassified.
    Locked {
        /// The round holding the lock.
        round: u64,
    },
}

impl SessionPhase {
    /// Returns whether a cooldown is active.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked { .. })
    }
}

/// What the display should show while no round result is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// No hand in view.
    Idle,
    /// A hand is in view and a candidate gesture is accumulating frames.
    Tracking {
        /// Candidate gesture.
        gesture: Gesture,
        /// Consecutive frames seen so far.
        count: u32,
        /// Frames needed to confirm.
        threshold: u32,
    },
    /// A round result is on display.
    Cooldown {
        /// The round being shown.
        round: u64,
    },
}

impl Status {
    /// Derives the status from the phase and the stabilizer.
    #[must_use]
    pub const fn from_parts(
        phase: SessionPhase,
        tracking: StabilizationState,
        threshold: u32,
    ) -> Self {
        match phase {
            SessionPhase::Locked { round } => Self::Cooldown { round },
            SessionPhase::Detecting if tracking.count == 0 => Self::Idle,
            SessionPhase::Detecting => Self::Tracking {
                gesture: tracking.candidate,
                count: tracking.count,
                threshold,
            },
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("No hand detected"),
            Self::Tracking {
                gesture: Gesture::Unknown,
                ..
            } => f.write_str("Detecting..."),
            Self::Tracking {
                gesture,
                count,
                threshold,
            } => write!(f, "Detecting {gesture} ({count}/{threshold})"),
            Self::Cooldown { round } => write!(f, "Round {round}"),
        }
    }
}

/// Result of pushing one frame through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameReport {
    /// No hand was in view; the stabilizer was reset.
    NoHand,
    /// Inference failed; handled exactly like [`FrameReport::NoHand`].
    SourceFailed,
    /// The frame was classified and the stabilizer advanced.
    Tracking(StabilizationState),
    /// The frame confirmed a gesture and a round was played.
    Round(RoundOutcome),
}

impl FrameReport {
    /// Status the display should show after this frame.
    #[must_use]
    pub const fn status(&self, threshold: u32) -> Status {
        match self {
            Self::NoHand | Self::SourceFailed => Status::Idle,
            Self::Tracking(tracking) => Status::from_parts(SessionPhase::Detecting, *tracking, threshold),
            Self::Round(outcome) => Status::Cooldown {
                round: outcome.round,
            },
        }
    }
}

/// A consistent view of the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Current phase.
    pub phase: SessionPhase,
    /// Stabilizer state.
    pub tracking: StabilizationState,
    /// Confirmation threshold in frames.
    pub threshold: u32,
    /// Most recent round result, unless cleared.
    pub current: Option<RoundOutcome>,
    /// Score tally.
    pub score: ScoreTally,
    /// Rounds played since the session started, including before resets.
    pub rounds_played: u64,
}

impl Snapshot {
    /// Status derived from this snapshot.
    #[must_use]
    pub const fn status(&self) -> Status {
        Status::from_parts(self.phase, self.tracking, self.threshold)
    }
}

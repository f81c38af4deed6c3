//! Error types for session operations.

use thiserror::Error;

/// Errors that can occur when triggering a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// A round is already being displayed.
    #[error("session is locked by round {round}")]
    Locked {
        /// The round holding the lock.
        round: u64,
    },
    /// The gesture cannot be played.
    #[error("gesture is not playable")]
    NotPlayable,
}

/// Errors that can occur when ending a cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CooldownError {
    /// The session is not in a cooldown.
    #[error("session is not locked")]
    NotLocked,
    /// The cooldown belongs to a different round.
    #[error("cooldown for round {requested} expired but round {locked} holds the lock")]
    StaleRound {
        /// Round whose timer fired.
        requested: u64,
        /// Round currently holding the lock.
        locked: u64,
    },
}

/// Reasons a frame was consumed without being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Another frame is still being classified.
    #[error("another frame is in flight")]
    Busy,
    /// A round result is being displayed.
    #[error("session is locked by round {round}")]
    Locked {
        /// The round holding the lock.
        round: u64,
    },
}

/// Errors returned by [`SessionOptions::validate`](crate::SessionOptions::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Threshold of zero frames.
    #[error("stabilization threshold must be at least one frame")]
    ZeroThreshold,
    /// Cooldown of zero length.
    #[error("cooldown must be longer than zero")]
    ZeroCooldown,
}

/// Errors from the threaded frame pump.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PumpError {
    /// The worker thread has stopped.
    #[error("frame pump worker has stopped")]
    Disconnected,
}

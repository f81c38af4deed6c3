//! A hand-gesture Rock-Paper-Scissors round engine with optional `no_std` support.
//!
//! The crate turns a stream of per-frame hand landmark observations into
//! discrete game rounds. A [`Session`] owns the whole decision pipeline:
//! gesture classification, stabilization of the noisy classification stream,
//! round resolution against an independent opponent, the cooldown that
//! follows each round, and the score tally.
//!
//! Camera capture and landmark inference are external. Callers feed
//! [`Landmark`] slices (or whole [`Observation`] frames) one at a time and
//! receive a [`FrameReport`] per frame.
//!
//! # Example
//!
//! ```
//! use rpsrs::{Session, SessionOptions};
//!
//! let session = Session::new(SessionOptions::default(), 42);
//! let report = session.process_landmarks(None).unwrap();
//! assert_eq!(report, rpsrs::FrameReport::NoHand);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod display;
pub mod error;
pub mod gesture;
pub mod landmark;
pub mod opponent;
pub mod options;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod pump;
pub mod result;
pub mod score;
pub mod session;
pub mod source;
pub mod stabilizer;
mod sync;

// Re-export main types
pub use display::{DisplaySink, DisplayUpdate, Publisher};
pub use error::{CooldownError, FrameError, OptionsError, RoundError};
#[cfg(feature = "std")]
pub use error::PumpError;
pub use gesture::{Gesture, classify};
pub use landmark::{Finger, LANDMARK_COUNT, Landmark};
pub use opponent::{Opponent, SeededOpponent};
pub use options::SessionOptions;
#[cfg(feature = "std")]
pub use pump::{FramePump, PumpCounts};
pub use result::{Outcome, RoundOutcome};
pub use score::ScoreTally;
pub use session::{FrameReport, Session, SessionPhase, Snapshot, Status};
pub use source::{Observation, ObservationSource};
pub use stabilizer::{StabilizationState, Stabilizer};

//! Seams to the external capture and inference collaborators.
//!
//! A frame is whatever the capture device hands out per tick: a video frame,
//! a GPU texture, a pooled buffer. It is owned by the pipeline for the
//! duration of one processing step and released by `Drop` on every exit
//! path, including inference failure and cooldown skips.

use core::fmt;

use crate::landmark::Landmark;

/// A single captured frame that can be run through hand-landmark inference.
pub trait Observation {
    /// Error reported by the inference backend.
    type Error: fmt::Display;

    /// Runs inference and returns the detected hand, if any.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when inference fails. The session treats
    /// that as a frame with no hand in view.
    fn landmarks(&mut self) -> Result<Option<&[Landmark]>, Self::Error>;
}

/// Delivers frames from a capture device, one per call.
pub trait ObservationSource {
    /// Frame type handed to the pipeline.
    type Frame: Observation;

    /// Waits for the next frame. Returns `None` once the source has stopped.
    fn next_frame(&mut self) -> Option<Self::Frame>;
}

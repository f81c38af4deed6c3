use core::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::error::{FrameError, RoundError};
use crate::gesture::classify;
use crate::landmark::Landmark;
use crate::opponent::Opponent;
use crate::source::Observation;

use super::{FrameReport, Session, SessionPhase};

/// Marks a frame as in flight until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, FrameError> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| Self(flag))
            .map_err(|_| FrameError::Busy)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<O: Opponent> Session<O> {
    /// Processes one frame's landmark observation.
    ///
    /// `None` means no hand was detected and resets the stabilizer. A
    /// confirmed gesture plays a round immediately.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Locked`] during a cooldown and
    /// [`FrameError::Busy`] if another frame is still being processed. In
    /// both cases the observation is discarded and no state changes.
    ///
    /// # Example
    ///
    /// ```
    /// use rpsrs::{FrameReport, Session, SessionOptions, StabilizationState};
    ///
    /// let session = Session::new(SessionOptions::default(), 1);
    /// let report = session.process_landmarks(Some(&[][..])).unwrap();
    /// assert!(matches!(report, FrameReport::Tracking(StabilizationState { count: 1, .. })));
    /// ```
    pub fn process_landmarks(
        &self,
        landmarks: Option<&[Landmark]>,
    ) -> Result<FrameReport, FrameError> {
        let _in_flight = InFlight::acquire(&self.in_flight)?;
        self.step(landmarks)
    }

    /// Processes one captured frame.
    ///
    /// The frame is consumed: it is dropped, releasing whatever resource it
    /// holds, before this returns on every path. Inference runs only while
    /// detecting; a failed inference is logged and handled as a frame with
    /// no hand.
    ///
    /// # Errors
    ///
    /// Same as [`Session::process_landmarks`].
    pub fn process_frame<F: Observation>(&self, mut frame: F) -> Result<FrameReport, FrameError> {
        let _in_flight = InFlight::acquire(&self.in_flight)?;

        if let SessionPhase::Locked { round } = self.phase() {
            trace!(round, "frame skipped during cooldown");
            return Err(FrameError::Locked { round });
        }

        match frame.landmarks() {
            Ok(landmarks) => self.step(landmarks),
            Err(err) => {
                warn!(%err, "hand inference failed, treating frame as empty");
                self.step(None).map(|_| FrameReport::SourceFailed)
            }
        }
    }

    #[expect(
        clippy::significant_drop_tightening,
        reason = "phase lock is held until the round, if any, is applied"
    )]
    fn step(&self, landmarks: Option<&[Landmark]>) -> Result<FrameReport, FrameError> {
        let mut phase = self.phase.lock();
        if let SessionPhase::Locked { round } = *phase {
            return Err(FrameError::Locked { round });
        }

        if landmarks.is_none() {
            self.stabilizer.lock().reset();
            return Ok(FrameReport::NoHand);
        }

        let gesture = classify(landmarks);
        let (confirmed, tracking) = self
            .stabilizer
            .with(|stabilizer| (stabilizer.observe(gesture), stabilizer.state()));
        let Some(gesture) = confirmed else {
            trace!(%gesture, count = tracking.count, "frame classified");
            return Ok(FrameReport::Tracking(tracking));
        };

        debug!(%gesture, frames = tracking.count, "gesture confirmed");
        match self.start_round(&mut phase, gesture) {
            Ok(outcome) => Ok(FrameReport::Round(outcome)),
            Err(RoundError::Locked { round }) => Err(FrameError::Locked { round }),
            Err(RoundError::NotPlayable) => Ok(FrameReport::Tracking(tracking)),
        }
    }
}

//! Pushing session changes to a display.

use crate::result::RoundOutcome;
use crate::score::ScoreTally;
use crate::session::{FrameReport, Snapshot, Status};

/// A change the display should reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayUpdate {
    /// New status line.
    Status(Status),
    /// A round was played.
    Round(RoundOutcome),
    /// New score tally.
    Score(ScoreTally),
    /// The round result on display was cleared.
    Cleared,
}

/// Receives display updates.
///
/// Closures taking a [`DisplayUpdate`] implement this trait.
pub trait DisplaySink {
    /// Handles one update.
    fn update(&mut self, update: DisplayUpdate);
}

impl<F> DisplaySink for F
where
    F: FnMut(DisplayUpdate),
{
    fn update(&mut self, update: DisplayUpdate) {
        self(update);
    }
}

/// Translates frame reports into display updates, pushing only changes.
#[derive(Debug)]
pub struct Publisher<S> {
    sink: S,
    last_status: Option<Status>,
}

impl<S: DisplaySink> Publisher<S> {
    /// Wraps a sink.
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            last_status: None,
        }
    }

    /// Publishes the effect of one processed frame.
    ///
    /// A played round pushes the result, then the score, then the status.
    pub fn frame(&mut self, report: &FrameReport, score: ScoreTally, threshold: u32) {
        if let FrameReport::Round(outcome) = report {
            self.sink.update(DisplayUpdate::Round(*outcome));
            self.sink.update(DisplayUpdate::Score(score));
        }
        self.status(report.status(threshold));
    }

    /// Publishes a status, unless it is already on display.
    pub fn status(&mut self, status: Status) {
        if self.last_status != Some(status) {
            self.last_status = Some(status);
            self.sink.update(DisplayUpdate::Status(status));
        }
    }

    /// Publishes the state after a reset or interrupt.
    pub fn cleared(&mut self, snapshot: &Snapshot) {
        self.sink.update(DisplayUpdate::Cleared);
        self.sink.update(DisplayUpdate::Score(snapshot.score));
        self.last_status = None;
        self.status(snapshot.status());
    }

    /// Returns the wrapped sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Unwraps the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::gesture::Gesture;
    use crate::stabilizer::StabilizationState;

    #[test]
    fn repeated_status_is_pushed_once() {
        let mut seen = Vec::new();
        let mut publisher = Publisher::new(|update: DisplayUpdate| seen.push(update));
        publisher.frame(&FrameReport::NoHand, ScoreTally::new(), 6);
        publisher.frame(&FrameReport::SourceFailed, ScoreTally::new(), 6);
        publisher.frame(
            &FrameReport::Tracking(StabilizationState {
                candidate: Gesture::Rock,
                count: 1,
            }),
            ScoreTally::new(),
            6,
        );
        drop(publisher);

        assert_eq!(
            seen,
            [
                DisplayUpdate::Status(Status::Idle),
                DisplayUpdate::Status(Status::Tracking {
                    gesture: Gesture::Rock,
                    count: 1,
                    threshold: 6,
                }),
            ]
        );
    }

    #[test]
    fn round_pushes_result_score_then_status() {
        let mut seen = Vec::new();
        let mut publisher = Publisher::new(|update: DisplayUpdate| seen.push(update));
        let outcome = RoundOutcome::new(1, Gesture::Paper, Gesture::Rock);
        let mut score = ScoreTally::new();
        score.record(outcome.outcome);
        publisher.frame(&FrameReport::Round(outcome), score, 6);
        drop(publisher);

        assert_eq!(
            seen,
            [
                DisplayUpdate::Round(outcome),
                DisplayUpdate::Score(score),
                DisplayUpdate::Status(Status::Cooldown { round: 1 }),
            ]
        );
    }
}

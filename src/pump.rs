//! Threaded frame pump and cooldown timer.
//!
//! [`FramePump`] accepts frames from a capture callback without blocking it.
//! At most one frame is in flight: a frame offered while the previous one is
//! still being classified is dropped, never queued. [`run`] drives a pull-based
//! [`ObservationSource`] on the calling thread instead.
//!
//! Both schedule a timer thread per round that ends the cooldown.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace, warn};

use crate::display::{DisplaySink, Publisher};
use crate::error::{FrameError, PumpError};
use crate::opponent::Opponent;
use crate::session::{FrameReport, Session};
use crate::source::{Observation, ObservationSource};
use crate::sync::Mutex;

/// Frame counters for a pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PumpCounts {
    /// Frames classified, including those whose inference failed.
    pub processed: u64,
    /// Frames consumed unclassified during a cooldown.
    pub skipped: u64,
    /// Frames dropped because another frame was in flight.
    pub dropped: u64,
    /// Frames whose inference failed.
    pub failed: u64,
}

#[derive(Default)]
struct Counters {
    processed: AtomicU64,
    skipped: AtomicU64,
    dropped: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> PumpCounts {
        PumpCounts {
            processed: self.processed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

struct Shared<O, S> {
    session: Arc<Session<O>>,
    publisher: Mutex<Publisher<S>>,
    counters: Counters,
    busy: AtomicBool,
}

impl<O, S> Shared<O, S>
where
    O: Opponent + Send + 'static,
    S: DisplaySink + Send + 'static,
{
    fn new(session: Arc<Session<O>>, sink: S) -> Self {
        Self {
            session,
            publisher: Mutex::new(Publisher::new(sink)),
            counters: Counters::default(),
            busy: AtomicBool::new(false),
        }
    }

    fn handle<F: Observation>(self: &Arc<Self>, frame: F) {
        match self.session.process_frame(frame) {
            Ok(report) => {
                Counters::bump(&self.counters.processed);
                if report == FrameReport::SourceFailed {
                    Counters::bump(&self.counters.failed);
                }
                let score = self.session.score();
                self.publisher
                    .lock()
                    .frame(&report, score, self.session.threshold());
                if let FrameReport::Round(outcome) = report {
                    self.schedule_cooldown(outcome.round);
                }
            }
            Err(FrameError::Locked { .. }) => Counters::bump(&self.counters.skipped),
            Err(FrameError::Busy) => Counters::bump(&self.counters.dropped),
        }
    }

    fn schedule_cooldown(self: &Arc<Self>, round: u64) {
        let shared = Arc::clone(self);
        let cooldown = self.session.cooldown();
        thread::spawn(move || {
            thread::sleep(cooldown);
            match shared.session.finish_cooldown(round) {
                // Status is read under the publisher lock, after any frame
                // the worker has already published.
                Ok(()) => shared
                    .publisher
                    .lock()
                    .status(shared.session.status()),
                Err(err) => debug!(%err, "cooldown timer had nothing to end"),
            }
        });
    }

    fn cleared(&self) {
        self.publisher.lock().cleared(&self.session.snapshot());
    }
}

/// Clears the pump's busy flag when dropped, including on unwind.
struct Idle<'a>(&'a AtomicBool);

impl Drop for Idle<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Push-based frame pump with a single in-flight slot.
///
/// Frames are classified on a worker thread in the order they are accepted.
/// Dropping the pump stops the worker after the in-flight frame.
pub struct FramePump<F, O, S> {
    shared: Arc<Shared<O, S>>,
    slot: Option<SyncSender<F>>,
    worker: Option<JoinHandle<()>>,
}

impl<F, O, S> FramePump<F, O, S>
where
    F: Observation + Send + 'static,
    O: Opponent + Send + 'static,
    S: DisplaySink + Send + 'static,
{
    /// Starts the worker thread for `session`, publishing to `sink`.
    #[must_use]
    pub fn spawn(session: Arc<Session<O>>, sink: S) -> Self {
        let (slot, frames) = mpsc::sync_channel::<F>(1);
        let shared = Arc::new(Shared::new(session, sink));
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || {
            for frame in frames {
                let _idle = Idle(&worker_shared.busy);
                worker_shared.handle(frame);
            }
            trace!("frame pump worker exiting");
        });

        Self {
            shared,
            slot: Some(slot),
            worker: Some(worker),
        }
    }

    /// Offers a frame without blocking.
    ///
    /// Returns `Ok(true)` if the frame was accepted and `Ok(false)` if it was
    /// dropped because another frame is in flight. A dropped frame is
    /// released immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has stopped, including after a panic
    /// in the display sink or an observation.
    pub fn offer(&self, frame: F) -> Result<bool, PumpError> {
        let slot = self.slot.as_ref().ok_or(PumpError::Disconnected)?;
        if self.worker.as_ref().is_none_or(JoinHandle::is_finished) {
            return Err(PumpError::Disconnected);
        }

        if self
            .shared
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            Counters::bump(&self.shared.counters.dropped);
            trace!("frame dropped, previous frame in flight");
            return Ok(false);
        }

        match slot.try_send(frame) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => {
                self.shared.busy.store(false, Ordering::Release);
                Counters::bump(&self.shared.counters.dropped);
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => {
                self.shared.busy.store(false, Ordering::Release);
                Err(PumpError::Disconnected)
            }
        }
    }

    /// Clears the round result, score and stabilizer, and tells the display.
    pub fn reset(&self) {
        self.shared.session.reset();
        self.shared.cleared();
    }

    /// Stops the worker, then clears the stabilizer and round result.
    ///
    /// The score is kept. A running cooldown still ends on its own.
    pub fn stop(mut self) -> PumpCounts {
        self.shutdown();
        self.shared.session.interrupt();
        self.shared.cleared();
        self.counts()
    }
}

impl<F, O, S> FramePump<F, O, S> {
    /// Returns the frame counters.
    pub fn counts(&self) -> PumpCounts {
        self.shared.counters.snapshot()
    }

    /// Returns the session being driven.
    pub fn session(&self) -> &Arc<Session<O>> {
        &self.shared.session
    }

    /// Returns whether a frame is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.shared.busy.load(Ordering::Acquire)
    }

    fn shutdown(&mut self) {
        drop(self.slot.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("frame pump worker panicked");
            }
        }
    }
}

impl<F, O, S> Drop for FramePump<F, O, S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Pulls frames from `source` until it stops, on the calling thread.
///
/// Each frame is fully processed before the next is requested, so no frame
/// is ever dropped for being in flight.
pub fn run<Src, O, S>(session: &Arc<Session<O>>, source: &mut Src, sink: S) -> PumpCounts
where
    Src: ObservationSource,
    O: Opponent + Send + 'static,
    S: DisplaySink + Send + 'static,
{
    let shared = Arc::new(Shared::new(Arc::clone(session), sink));
    while let Some(frame) = source.next_frame() {
        shared.handle(frame);
    }
    debug!("observation source stopped");
    shared.counters.snapshot()
}

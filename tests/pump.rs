//! Frame pump integration tests.

use core::time::Duration;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use rpsrs::pump::run;
use rpsrs::{
    DisplayUpdate, Finger, FramePump, Gesture, LANDMARK_COUNT, Landmark, Observation,
    ObservationSource, Outcome, PumpCounts, PumpError, Session, SessionOptions, SessionPhase,
    StabilizationState, Status,
};

type Updates = Arc<Mutex<Vec<DisplayUpdate>>>;

fn hand(extended: &[Finger]) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(0.5, 0.8, 0.0); LANDMARK_COUNT];
    for finger in Finger::TRACKED {
        let tip_y = if extended.contains(&finger) { 0.1 } else { 0.6 };
        points[finger.pip()] = Landmark::new(0.5, 0.4, 0.0);
        points[finger.tip()] = Landmark::new(0.5, tip_y, 0.0);
    }
    points
}

fn recorder() -> (Updates, impl FnMut(DisplayUpdate) + Send + 'static) {
    let updates: Updates = Arc::default();
    let sink_updates = Arc::clone(&updates);
    (updates, move |update: DisplayUpdate| {
        sink_updates.lock().unwrap().push(update);
    })
}

fn session(cooldown: Duration) -> Arc<Session<fn() -> Gesture>> {
    let options = SessionOptions::default()
        .with_threshold(6)
        .with_cooldown(cooldown);
    Arc::new(Session::with_opponent(options, (|| Gesture::Scissors) as fn() -> Gesture))
}

fn broken_display(_: DisplayUpdate) {
    panic!("display went away");
}

fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    done()
}

struct Frame {
    points: Option<Vec<Landmark>>,
    gate: Option<Receiver<()>>,
    released: Arc<AtomicUsize>,
}

impl Frame {
    fn new(points: Option<Vec<Landmark>>, released: &Arc<AtomicUsize>) -> Self {
        Self {
            points,
            gate: None,
            released: Arc::clone(released),
        }
    }
}

impl Observation for Frame {
    type Error = &'static str;

    fn landmarks(&mut self) -> Result<Option<&[Landmark]>, Self::Error> {
        if let Some(gate) = &self.gate {
            gate.recv().map_err(|_| "gate closed")?;
        }
        Ok(self.points.as_deref())
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

struct Script {
    frames: std::vec::IntoIter<Frame>,
}

impl ObservationSource for Script {
    type Frame = Frame;

    fn next_frame(&mut self) -> Option<Frame> {
        self.frames.next()
    }
}

#[test]
fn run_plays_once_and_skips_during_cooldown() {
    let session = session(Duration::from_secs(30));
    let released = Arc::new(AtomicUsize::new(0));
    let frames: Vec<Frame> = (0..16)
        .map(|_| Frame::new(Some(hand(&[])), &released))
        .collect();
    let (updates, sink) = recorder();

    let counts = run(&session, &mut Script { frames: frames.into_iter() }, sink);

    assert_eq!(
        counts,
        PumpCounts {
            processed: 6,
            skipped: 10,
            dropped: 0,
            failed: 0,
        }
    );
    assert_eq!(released.load(Ordering::SeqCst), 16);
    assert_eq!(session.phase(), SessionPhase::Locked { round: 1 });

    let updates = updates.lock().unwrap();
    let rounds: Vec<_> = updates
        .iter()
        .filter_map(|update| match update {
            DisplayUpdate::Round(outcome) => Some(*outcome),
            _ => None,
        })
        .collect();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].player, Gesture::Rock);
    assert_eq!(rounds[0].outcome, Outcome::Win);
    assert_eq!(
        updates.last(),
        Some(&DisplayUpdate::Status(Status::Cooldown { round: 1 }))
    );
}

#[test]
fn cooldown_timer_resumes_detection() {
    let session = session(Duration::from_millis(20));
    let released = Arc::new(AtomicUsize::new(0));
    let frames: Vec<Frame> = (0..6)
        .map(|_| Frame::new(Some(hand(&Finger::TRACKED)), &released))
        .collect();
    let (updates, sink) = recorder();

    run(&session, &mut Script { frames: frames.into_iter() }, sink);
    assert!(session.is_locked());

    assert!(wait_until(Duration::from_secs(2), || !session.is_locked()));
    assert_eq!(session.tracking(), StabilizationState::IDLE);
    assert!(wait_until(Duration::from_secs(2), || {
        updates.lock().unwrap().last() == Some(&DisplayUpdate::Status(Status::Idle))
    }));
    assert_eq!(session.score().losses(), 1);
}

#[test]
fn pump_drops_frames_while_one_is_in_flight() {
    let session = session(Duration::from_secs(30));
    let released = Arc::new(AtomicUsize::new(0));
    let (updates, sink) = recorder();
    let pump = FramePump::spawn(Arc::clone(&session), sink);

    let (open, gate) = mpsc::channel();
    let mut slow = Frame::new(Some(hand(&[Finger::Index, Finger::Middle])), &released);
    slow.gate = Some(gate);

    assert_eq!(pump.offer(slow), Ok(true));
    assert!(pump.is_busy());
    for _ in 0..3 {
        let extra = Frame::new(Some(hand(&[])), &released);
        assert_eq!(pump.offer(extra), Ok(false));
    }
    assert_eq!(released.load(Ordering::SeqCst), 3, "dropped frames are released at once");

    open.send(()).unwrap();
    assert!(wait_until(Duration::from_secs(2), || !pump.is_busy()));
    assert_eq!(released.load(Ordering::SeqCst), 4);
    assert_eq!(
        session.tracking(),
        StabilizationState {
            candidate: Gesture::Scissors,
            count: 1,
        }
    );

    let counts = pump.counts();
    assert_eq!(counts.processed, 1);
    assert_eq!(counts.dropped, 3);
    assert_eq!(
        updates.lock().unwrap().as_slice(),
        [DisplayUpdate::Status(Status::Tracking {
            gesture: Gesture::Scissors,
            count: 1,
            threshold: 6,
        })]
    );
}

#[test]
fn stop_keeps_score_and_clears_display() {
    let session = session(Duration::from_secs(30));
    let released = Arc::new(AtomicUsize::new(0));
    let (updates, sink) = recorder();
    let pump = FramePump::spawn(Arc::clone(&session), sink);

    for _ in 0..6 {
        let frame = Frame::new(Some(hand(&[])), &released);
        assert!(wait_until(Duration::from_secs(2), || !pump.is_busy()));
        assert_eq!(pump.offer(frame), Ok(true));
    }
    assert!(wait_until(Duration::from_secs(2), || session.is_locked()));

    let counts = pump.stop();
    assert_eq!(counts.processed, 6);
    assert_eq!(released.load(Ordering::SeqCst), 6);
    assert_eq!(session.current_outcome(), None);
    assert_eq!(session.score().wins(), 1);
    assert!(session.is_locked(), "cooldown runs to completion");

    let updates = updates.lock().unwrap();
    let cleared = updates
        .iter()
        .position(|update| *update == DisplayUpdate::Cleared)
        .unwrap();
    assert_eq!(
        updates[cleared + 1],
        DisplayUpdate::Score(session.score())
    );
}

#[test]
fn reset_through_pump_zeroes_score() {
    let session = session(Duration::from_secs(30));
    let (updates, sink) = recorder();
    let pump: FramePump<Frame, _, _> = FramePump::spawn(Arc::clone(&session), sink);

    session.trigger_round(Gesture::Paper).unwrap();
    pump.reset();

    assert_eq!(session.score().total(), 0);
    assert_eq!(
        updates.lock().unwrap().as_slice(),
        [
            DisplayUpdate::Cleared,
            DisplayUpdate::Score(session.score()),
            DisplayUpdate::Status(Status::Cooldown { round: 1 }),
        ]
    );
}

#[test]
fn pump_reports_disconnect_after_worker_panic() {
    let session = session(Duration::from_secs(30));
    let released = Arc::new(AtomicUsize::new(0));
    let pump = FramePump::spawn(Arc::clone(&session), broken_display);

    assert_eq!(pump.offer(Frame::new(None, &released)), Ok(true));
    assert!(wait_until(Duration::from_secs(2), || !pump.is_busy()));
    assert!(wait_until(Duration::from_secs(2), || {
        pump.offer(Frame::new(Some(hand(&[])), &released)) == Err(PumpError::Disconnected)
    }));
    assert_eq!(
        pump.offer(Frame::new(None, &released)),
        Err(PumpError::Disconnected)
    );
}

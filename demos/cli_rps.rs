//! CLI Rock-Paper-Scissors example driven by typed "frames".
//!
//! Each character of an input line is one camera frame: `r`, `p` and `s`
//! show a rock, paper or scissors hand, `n` shows no hand and anything else
//! an unrecognizable hand. Frames are delivered at ten per second, so a line
//! like `rrrrrr` confirms a rock. `reset` clears the score, `q` quits.
//!
//! Set `RUST_LOG=rpsrs=debug` to watch the pipeline.

#![allow(clippy::missing_docs_in_private_items)]

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rpsrs::landmark::{Finger, LANDMARK_COUNT};
use rpsrs::pump::run;
use rpsrs::{
    DisplayUpdate, Landmark, Observation, ObservationSource, Publisher, Session, SessionOptions,
};
use tracing_subscriber::EnvFilter;

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

struct TypedFrame(Option<Vec<Landmark>>);

impl Observation for TypedFrame {
    type Error = &'static str;

    fn landmarks(&mut self) -> Result<Option<&[Landmark]>, Self::Error> {
        Ok(self.0.as_deref())
    }
}

fn hand(extended: &[Finger]) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(0.5, 0.9, 0.0); LANDMARK_COUNT];
    for finger in Finger::TRACKED {
        let tip_y = if extended.contains(&finger) { 0.2 } else { 0.7 };
        points[finger.pip()] = Landmark::new(0.5, 0.5, 0.0);
        points[finger.tip()] = Landmark::new(0.5, tip_y, 0.0);
    }
    points
}

fn frame_for(key: char) -> TypedFrame {
    TypedFrame(match key {
        'r' => Some(hand(&[])),
        'p' => Some(hand(&Finger::TRACKED)),
        's' => Some(hand(&[Finger::Index, Finger::Middle])),
        'n' => None,
        _ => Some(hand(&[Finger::Index])),
    })
}

struct StdinSource<'a> {
    session: &'a Session,
    pending: VecDeque<char>,
}

impl ObservationSource for StdinSource<'_> {
    type Frame = TypedFrame;

    fn next_frame(&mut self) -> Option<TypedFrame> {
        loop {
            if let Some(key) = self.pending.pop_front() {
                thread::sleep(FRAME_INTERVAL);
                return Some(frame_for(key));
            }

            print!("> ");
            let _ = io::stdout().flush();
            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line).ok()? == 0 {
                return None;
            }

            match line.trim().to_lowercase().as_str() {
                "q" | "quit" => return None,
                "reset" => {
                    self.session.reset();
                    Publisher::new(print_update).cleared(&self.session.snapshot());
                }
                keys => self.pending.extend(keys.chars()),
            }
        }
    }
}

fn print_update(update: DisplayUpdate) {
    match update {
        DisplayUpdate::Status(status) => println!("  [{status}]"),
        DisplayUpdate::Round(outcome) => println!(
            "  You: {} | CPU: {} | {}",
            outcome.player,
            outcome.cpu,
            outcome.outcome.as_str().to_uppercase()
        ),
        DisplayUpdate::Score(score) => println!(
            "  Score: {} win / {} draw / {} loss",
            score.wins(),
            score.draws(),
            score.losses()
        ),
        DisplayUpdate::Cleared => println!("  (cleared)"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("Rock-Paper-Scissors CLI example (type 'q' to quit)");
    println!("Type frames: r = rock, p = paper, s = scissors, n = no hand.");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let session = Arc::new(Session::new(SessionOptions::default(), seed));
    let mut source = StdinSource {
        session: &session,
        pending: VecDeque::new(),
    };

    let counts = run(&session, &mut source, print_update);

    let score = session.score();
    println!(
        "Final score: {} win / {} draw / {} loss ({} frames, {} during cooldown)",
        score.wins(),
        score.draws(),
        score.losses(),
        counts.processed,
        counts.skipped
    );
}

use core::time::Duration;

use rpsrs::{
    FrameError, FrameReport, Gesture, Landmark, Outcome, RoundOutcome, ScoreTally, Session,
    SessionOptions, SessionPhase, Snapshot,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Session handle for the browser.
///
/// JavaScript owns the camera and the landmark model. It calls `process` once
/// per video frame with the flattened `[x, y, z, ...]` landmarks of the first
/// detected hand (or `null`), and when a frame reports a round it schedules
/// `finishCooldown(round)` after `cooldownMs()` milliseconds.
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, threshold: Option<u32>, cooldown_ms: Option<u32>) -> Result<WasmSession, JsValue> {
        let options = build_options(threshold, cooldown_ms);
        options.validate().map_err(js_err)?;
        Ok(Self {
            session: Session::new(options, u64::from(seed)),
        })
    }

    pub fn process(&self, landmarks: Option<Vec<f32>>) -> Result<JsValue, JsValue> {
        let points: Option<Vec<Landmark>> = landmarks.map(|flat| {
            flat.chunks_exact(3)
                .map(|xyz| Landmark::new(xyz[0], xyz[1], xyz[2]))
                .collect()
        });

        let frame = match self.session.process_landmarks(points.as_deref()) {
            Ok(report) => JsFrame::from_report(&report, self.session.threshold()),
            Err(FrameError::Locked { round }) => JsFrame::skipped("locked", Some(round)),
            Err(FrameError::Busy) => JsFrame::skipped("busy", None),
        };
        to_js_value(&frame)
    }

    #[wasm_bindgen(js_name = finishCooldown)]
    pub fn finish_cooldown(&self, round: u32) -> Result<(), JsValue> {
        self.session
            .finish_cooldown(u64::from(round))
            .map_err(js_err)
    }

    #[wasm_bindgen(js_name = cooldownMs)]
    pub fn cooldown_ms(&self) -> u32 {
        self.session.cooldown().as_millis() as u32
    }

    pub fn reset(&self) {
        self.session.reset();
    }

    pub fn interrupt(&self) {
        self.session.interrupt();
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js_value(&JsSnapshot::from(self.session.snapshot()))
    }
}

fn build_options(threshold: Option<u32>, cooldown_ms: Option<u32>) -> SessionOptions {
    let mut options = SessionOptions::default();
    if let Some(threshold) = threshold {
        options = options.with_threshold(threshold);
    }
    if let Some(cooldown_ms) = cooldown_ms {
        options = options.with_cooldown(Duration::from_millis(u64::from(cooldown_ms)));
    }
    options
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsFrame {
    kind: &'static str,
    status: String,
    gesture: Option<&'static str>,
    count: u32,
    locked_round: Option<u32>,
    round: Option<JsRound>,
}

impl JsFrame {
    fn from_report(report: &FrameReport, threshold: u32) -> Self {
        let status = report.status(threshold).to_string();
        match report {
            FrameReport::NoHand | FrameReport::SourceFailed => Self {
                kind: "noHand",
                status,
                gesture: None,
                count: 0,
                locked_round: None,
                round: None,
            },
            FrameReport::Tracking(tracking) => Self {
                kind: "tracking",
                status,
                gesture: Some(gesture_to_str(tracking.candidate)),
                count: tracking.count,
                locked_round: None,
                round: None,
            },
            FrameReport::Round(outcome) => Self {
                kind: "round",
                status,
                gesture: Some(gesture_to_str(outcome.player)),
                count: threshold,
                locked_round: Some(outcome.round as u32),
                round: Some(JsRound::from(*outcome)),
            },
        }
    }

    fn skipped(kind: &'static str, round: Option<u64>) -> Self {
        Self {
            kind,
            status: String::new(),
            gesture: None,
            count: 0,
            locked_round: round.map(|round| round as u32),
            round: None,
        }
    }
}

#[derive(Serialize)]
struct JsRound {
    round: u32,
    player: &'static str,
    cpu: &'static str,
    outcome: &'static str,
}

impl From<RoundOutcome> for JsRound {
    fn from(outcome: RoundOutcome) -> Self {
        Self {
            round: outcome.round as u32,
            player: gesture_to_str(outcome.player),
            cpu: gesture_to_str(outcome.cpu),
            outcome: outcome_to_str(outcome.outcome),
        }
    }
}

#[derive(Serialize)]
struct JsScore {
    wins: u32,
    draws: u32,
    losses: u32,
}

impl From<ScoreTally> for JsScore {
    fn from(score: ScoreTally) -> Self {
        Self {
            wins: score.wins(),
            draws: score.draws(),
            losses: score.losses(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsSnapshot {
    phase: &'static str,
    locked_round: Option<u32>,
    status: String,
    candidate: &'static str,
    count: u32,
    threshold: u32,
    current: Option<JsRound>,
    score: JsScore,
    rounds_played: u32,
}

impl From<Snapshot> for JsSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        let (phase, locked_round) = match snapshot.phase {
            SessionPhase::Detecting => ("Detecting", None),
            SessionPhase::Locked { round } => ("Locked", Some(round as u32)),
        };

        Self {
            phase,
            locked_round,
            status: snapshot.status().to_string(),
            candidate: gesture_to_str(snapshot.tracking.candidate),
            count: snapshot.tracking.count,
            threshold: snapshot.threshold,
            current: snapshot.current.map(JsRound::from),
            score: JsScore::from(snapshot.score),
            rounds_played: snapshot.rounds_played as u32,
        }
    }
}

fn gesture_to_str(gesture: Gesture) -> &'static str {
    match gesture {
        Gesture::Rock => "Rock",
        Gesture::Paper => "Paper",
        Gesture::Scissors => "Scissors",
        Gesture::Unknown => "Unknown",
    }
}

fn outcome_to_str(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "Win",
        Outcome::Draw => "Draw",
        Outcome::Loss => "Loss",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

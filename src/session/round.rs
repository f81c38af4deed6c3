use core::sync::atomic::Ordering;
use core::time::Duration;

use tracing::{debug, info};

use crate::error::{CooldownError, RoundError};
use crate::gesture::Gesture;
use crate::opponent::Opponent;
use crate::result::RoundOutcome;

use super::{Session, SessionPhase};

impl<O: Opponent> Session<O> {
    /// Plays a round with the player's confirmed gesture.
    ///
    /// The opponent picks its move, the outcome is resolved and recorded in
    /// the score, the stabilizer is reset, and the session locks until
    /// [`Session::finish_cooldown`] is called for this round.
    ///
    /// # Errors
    ///
    /// Returns an error without touching any state if the session is already
    /// locked or the gesture is [`Gesture::Unknown`].
    pub fn trigger_round(&self, player: Gesture) -> Result<RoundOutcome, RoundError> {
        let mut phase = self.phase.lock();
        self.start_round(&mut phase, player)
    }

    /// Applies a round while the caller holds the phase lock.
    pub(super) fn start_round(
        &self,
        phase: &mut SessionPhase,
        player: Gesture,
    ) -> Result<RoundOutcome, RoundError> {
        if let SessionPhase::Locked { round } = *phase {
            debug!(round, %player, "round rejected during cooldown");
            return Err(RoundError::Locked { round });
        }
        if !player.is_playable() {
            return Err(RoundError::NotPlayable);
        }

        let cpu = self.opponent.with(|opponent| opponent.choose());
        debug_assert!(cpu.is_playable(), "opponent chose {cpu}");

        let round = self.rounds.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = RoundOutcome::new(round, player, cpu);

        *phase = SessionPhase::Locked { round };
        self.stabilizer.lock().reset();
        *self.current.lock() = Some(outcome);
        self.score.lock().record(outcome.outcome);

        info!(round, %player, %cpu, outcome = %outcome.outcome, "round played");
        Ok(outcome)
    }
}

impl<O> Session<O> {
    /// Ends the cooldown started by `round` and resumes detection.
    ///
    /// The stabilizer is reset so the next round needs a fresh run of frames.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not locked, or if a different round
    /// holds the lock (a timer from an earlier round fired late).
    pub fn finish_cooldown(&self, round: u64) -> Result<(), CooldownError> {
        let mut phase = self.phase.lock();
        let current = *phase;
        match current {
            SessionPhase::Detecting => Err(CooldownError::NotLocked),
            SessionPhase::Locked { round: locked } if locked != round => {
                debug!(requested = round, locked, "stale cooldown ignored");
                Err(CooldownError::StaleRound {
                    requested: round,
                    locked,
                })
            }
            SessionPhase::Locked { .. } => {
                *phase = SessionPhase::Detecting;
                self.stabilizer.lock().reset();
                drop(phase);
                info!(round, "cooldown finished");
                Ok(())
            }
        }
    }

    /// Returns the configured cooldown duration.
    pub const fn cooldown(&self) -> Duration {
        self.options.cooldown
    }

    /// Returns the configured confirmation threshold.
    pub const fn threshold(&self) -> u32 {
        self.options.threshold
    }
}

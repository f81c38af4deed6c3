//! Round outcome types.

use core::fmt;

use crate::gesture::Gesture;

/// Result of a round from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Player's move beats the opponent's.
    Win,
    /// Both played the same move.
    Draw,
    /// Opponent's move beats the player's.
    Loss,
}

impl Outcome {
    /// Resolves a round between `player` and `cpu`.
    ///
    /// # Example
    ///
    /// ```
    /// use rpsrs::{Gesture, Outcome};
    ///
    /// assert_eq!(Outcome::resolve(Gesture::Rock, Gesture::Scissors), Outcome::Win);
    /// assert_eq!(Outcome::resolve(Gesture::Rock, Gesture::Paper), Outcome::Loss);
    /// assert_eq!(Outcome::resolve(Gesture::Paper, Gesture::Paper), Outcome::Draw);
    /// ```
    #[must_use]
    pub const fn resolve(player: Gesture, cpu: Gesture) -> Self {
        if player as u8 == cpu as u8 {
            Self::Draw
        } else if player.beats(cpu) {
            Self::Win
        } else {
            Self::Loss
        }
    }

    /// Lowercase name of the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Draw => "draw",
            Self::Loss => "loss",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundOutcome {
    /// Round number, starting at 1 for the first round of a session.
    pub round: u64,
    /// The player's confirmed gesture.
    pub player: Gesture,
    /// The opponent's move.
    pub cpu: Gesture,
    /// The resolved outcome.
    pub outcome: Outcome,
}

impl RoundOutcome {
    /// Resolves and records a round.
    #[must_use]
    pub const fn new(round: u64, player: Gesture, cpu: Gesture) -> Self {
        Self {
            round,
            player,
            cpu,
            outcome: Outcome::resolve(player, cpu),
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {}: {} vs {} ({})",
            self.round, self.player, self.cpu, self.outcome
        )
    }
}

//! Win/draw/loss accounting.

use crate::result::Outcome;

/// Running tally of round outcomes for a session.
///
/// Counters only grow through [`ScoreTally::record`] and only shrink through
/// [`ScoreTally::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScoreTally {
    wins: u32,
    draws: u32,
    losses: u32,
}

impl ScoreTally {
    /// Creates an empty tally.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    /// Counts one outcome.
    pub const fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Win => &mut self.wins,
            Outcome::Draw => &mut self.draws,
            Outcome::Loss => &mut self.losses,
        };
        *counter = counter.saturating_add(1);
    }

    /// Zeroes all counters.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Rounds won.
    #[must_use]
    pub const fn wins(&self) -> u32 {
        self.wins
    }

    /// Rounds drawn.
    #[must_use]
    pub const fn draws(&self) -> u32 {
        self.draws
    }

    /// Rounds lost.
    #[must_use]
    pub const fn losses(&self) -> u32 {
        self.losses
    }

    /// Total rounds counted since the last reset.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.wins
            .saturating_add(self.draws)
            .saturating_add(self.losses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_reset() {
        let mut tally = ScoreTally::new();
        for outcome in [Outcome::Win, Outcome::Draw, Outcome::Loss, Outcome::Win] {
            tally.record(outcome);
        }
        assert_eq!(
            (tally.wins(), tally.draws(), tally.losses()),
            (2, 1, 1)
        );
        assert_eq!(tally.total(), 4);

        tally.reset();
        assert_eq!(tally, ScoreTally::default());
        assert_eq!(tally.total(), 0);
    }
}

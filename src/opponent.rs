//! Opponent move selection.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::gesture::Gesture;

/// Source of the opponent's move for each round.
///
/// Implementations must return a playable gesture. Closures returning a
/// [`Gesture`] implement this trait, which makes scripted opponents easy to
/// write in tests:
///
/// ```
/// use rpsrs::{Gesture, Opponent};
///
/// let mut always_paper = || Gesture::Paper;
/// assert_eq!(always_paper.choose(), Gesture::Paper);
/// ```
pub trait Opponent {
    /// Picks the move for the next round.
    fn choose(&mut self) -> Gesture;
}

impl<F> Opponent for F
where
    F: FnMut() -> Gesture,
{
    fn choose(&mut self) -> Gesture {
        self()
    }
}

/// Uniformly random opponent backed by a seeded ChaCha8 generator.
///
/// Each draw is independent of the player's move and of earlier rounds.
#[derive(Debug, Clone)]
pub struct SeededOpponent {
    rng: ChaCha8Rng,
}

impl SeededOpponent {
    /// Creates an opponent from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Opponent for SeededOpponent {
    fn choose(&mut self) -> Gesture {
        Gesture::PLAYABLE[self.rng.random_range(0..Gesture::PLAYABLE.len())]
    }
}

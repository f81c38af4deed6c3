//! Gesture labels and landmark classification.

use core::fmt;

use crate::landmark::{Finger, LANDMARK_COUNT, Landmark};

const ALL_EXTENDED: u8 = 0b1111;
const SCISSORS_MASK: u8 = 0b0011;

/// A classified hand shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gesture {
    /// Closed fist.
    Rock,
    /// Open hand.
    Paper,
    /// Index and middle fingers extended.
    Scissors,
    /// No confident classification. Never playable.
    #[default]
    Unknown,
}

impl Gesture {
    /// The gestures that can be played in a round.
    pub const PLAYABLE: [Self; 3] = [Self::Rock, Self::Paper, Self::Scissors];

    /// Returns whether this gesture can be played.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns whether this gesture beats `other`.
    ///
    /// `Unknown` neither beats nor is beaten by anything.
    #[must_use]
    pub const fn beats(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors) | (Self::Paper, Self::Rock) | (Self::Scissors, Self::Paper)
        )
    }

    /// Lowercase name of the gesture.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns whether `finger` is extended: its tip sits above its PIP joint.
///
/// The caller must pass a complete observation; out-of-range indices report
/// the finger as curled.
#[must_use]
pub fn is_extended(landmarks: &[Landmark], finger: Finger) -> bool {
    match (landmarks.get(finger.tip()), landmarks.get(finger.pip())) {
        (Some(tip), Some(pip)) => tip.is_above(pip),
        _ => false,
    }
}

/// Returns the extension mask of the four tracked fingers.
///
/// Bit layout follows [`Finger::bit`]. The thumb is never consulted.
#[must_use]
pub fn extension_mask(landmarks: &[Landmark]) -> u8 {
    Finger::TRACKED
        .iter()
        .filter(|&&finger| is_extended(landmarks, finger))
        .fold(0, |mask, finger| mask | finger.bit())
}

/// Classifies a single hand observation.
///
/// Absent observations and observations with fewer than
/// [`LANDMARK_COUNT`] points classify as [`Gesture::Unknown`].
///
/// # Example
///
/// ```
/// use rpsrs::{Gesture, classify};
///
/// assert_eq!(classify(None), Gesture::Unknown);
/// assert_eq!(classify(Some(&[][..])), Gesture::Unknown);
/// ```
#[must_use]
pub fn classify(landmarks: Option<&[Landmark]>) -> Gesture {
    let Some(landmarks) = landmarks.filter(|points| points.len() >= LANDMARK_COUNT) else {
        return Gesture::Unknown;
    };

    match extension_mask(landmarks) {
        ALL_EXTENDED => Gesture::Paper,
        0 => Gesture::Rock,
        SCISSORS_MASK => Gesture::Scissors,
        _ => Gesture::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(extended: &[Finger]) -> [Landmark; LANDMARK_COUNT] {
        let mut points = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        for finger in Finger::TRACKED {
            let tip_y = if extended.contains(&finger) { 0.2 } else { 0.7 };
            points[finger.pip()] = Landmark::new(0.5, 0.5, 0.0);
            points[finger.tip()] = Landmark::new(0.5, tip_y, 0.0);
        }
        points
    }

    #[test]
    fn beats_is_a_cycle() {
        for gesture in Gesture::PLAYABLE {
            let beaten = Gesture::PLAYABLE
                .iter()
                .filter(|&&other| gesture.beats(other))
                .count();
            assert_eq!(beaten, 1, "{gesture} should beat exactly one move");
            assert!(!gesture.beats(gesture));
            assert!(!gesture.beats(Gesture::Unknown));
            assert!(!Gesture::Unknown.beats(gesture));
        }
    }

    #[test]
    fn mask_ignores_thumb() {
        let mut points = hand(&[]);
        points[crate::landmark::THUMB_TIP] = Landmark::new(0.1, 0.0, 0.0);
        assert_eq!(extension_mask(&points), 0);
        assert_eq!(classify(Some(&points[..])), Gesture::Rock);
    }

    #[test]
    fn equal_heights_count_as_curled() {
        let points = [Landmark::new(0.3, 0.4, 0.0); LANDMARK_COUNT];
        assert_eq!(classify(Some(&points[..])), Gesture::Rock);
    }

    #[test]
    fn nan_tip_counts_as_curled() {
        let mut points = hand(&Finger::TRACKED);
        points[Finger::Pinky.tip()].y = f32::NAN;
        assert_eq!(classify(Some(&points[..])), Gesture::Unknown);
    }

    #[test]
    fn extra_landmarks_are_ignored() {
        let mut points = hand(&[Finger::Index, Finger::Middle]).to_vec();
        points.push(Landmark::new(0.0, 0.0, 0.0));
        assert_eq!(classify(Some(&points[..])), Gesture::Scissors);
    }
}

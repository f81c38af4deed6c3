//! Hand landmark types and anatomical indices.

/// Number of landmarks in a complete hand observation.
pub const LANDMARK_COUNT: usize = 21;

/// Wrist landmark index.
pub const WRIST: usize = 0;
/// Thumb tip landmark index.
pub const THUMB_TIP: usize = 4;
/// Index finger proximal interphalangeal joint.
pub const INDEX_PIP: usize = 6;
/// Index finger tip.
pub const INDEX_TIP: usize = 8;
/// Middle finger proximal interphalangeal joint.
pub const MIDDLE_PIP: usize = 10;
/// Middle finger tip.
pub const MIDDLE_TIP: usize = 12;
/// Ring finger proximal interphalangeal joint.
pub const RING_PIP: usize = 14;
/// Ring finger tip.
pub const RING_TIP: usize = 16;
/// Pinky proximal interphalangeal joint.
pub const PINKY_PIP: usize = 18;
/// Pinky tip.
pub const PINKY_TIP: usize = 20;

/// A single tracked point on a hand, in image coordinates.
///
/// The origin is the top-left corner of the frame, so `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate (smaller is higher in the frame).
    pub y: f32,
    /// Depth relative to the wrist.
    pub z: f32,
}

impl Landmark {
    /// Creates a new landmark.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns whether this landmark sits strictly above `other` in the frame.
    ///
    /// `NaN` coordinates never compare as above.
    #[must_use]
    pub fn is_above(&self, other: &Self) -> bool {
        self.y < other.y
    }
}

/// A non-thumb finger tracked by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Pinky.
    Pinky,
}

impl Finger {
    /// The fingers consulted for classification, in anatomical order.
    pub const TRACKED: [Self; 4] = [Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    /// Landmark index of the fingertip.
    #[must_use]
    pub const fn tip(self) -> usize {
        match self {
            Self::Index => INDEX_TIP,
            Self::Middle => MIDDLE_TIP,
            Self::Ring => RING_TIP,
            Self::Pinky => PINKY_TIP,
        }
    }

    /// Landmark index of the proximal interphalangeal joint.
    #[must_use]
    pub const fn pip(self) -> usize {
        match self {
            Self::Index => INDEX_PIP,
            Self::Middle => MIDDLE_PIP,
            Self::Ring => RING_PIP,
            Self::Pinky => PINKY_PIP,
        }
    }

    /// Bit used for this finger in an extension mask.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Index => 0b0001,
            Self::Middle => 0b0010,
            Self::Ring => 0b0100,
            Self::Pinky => 0b1000,
        }
    }
}

//! Session configuration options.

use core::time::Duration;

use crate::error::OptionsError;

/// Default number of identical consecutive frames needed to confirm a gesture.
///
/// At roughly ten delivered frames per second this is about 600 ms.
pub const DEFAULT_THRESHOLD: u32 = 6;

/// Default time a round result stays on screen before detection resumes.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1500);

/// Configuration options for a session.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
/// use rpsrs::SessionOptions;
///
/// let options = SessionOptions::default()
///     .with_threshold(8)
///     .with_cooldown(Duration::from_secs(2));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionOptions {
    /// Consecutive identical frames needed to confirm a gesture.
    pub threshold: u32,
    /// How long the session stays locked after a round.
    pub cooldown: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl SessionOptions {
    /// Sets the confirmation threshold in frames.
    ///
    /// # Example
    ///
    /// ```
    /// use rpsrs::SessionOptions;
    ///
    /// let options = SessionOptions::default().with_threshold(4);
    /// assert_eq!(options.threshold, 4);
    /// ```
    #[must_use]
    pub const fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the cooldown duration.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use rpsrs::SessionOptions;
    ///
    /// let options = SessionOptions::default().with_cooldown(Duration::from_millis(500));
    /// assert_eq!(options.cooldown, Duration::from_millis(500));
    /// ```
    #[must_use]
    pub const fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Derives the threshold from a debounce window and the expected interval
    /// between delivered frames, rounding up.
    ///
    /// The threshold is still a frame count: a slower source takes longer to
    /// confirm. A zero `frame_interval` leaves the threshold unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use rpsrs::SessionOptions;
    ///
    /// let options = SessionOptions::default()
    ///     .with_debounce_window(Duration::from_millis(600), Duration::from_millis(33));
    /// assert_eq!(options.threshold, 19);
    /// ```
    #[must_use]
    pub fn with_debounce_window(mut self, window: Duration, frame_interval: Duration) -> Self {
        if frame_interval.is_zero() {
            return self;
        }
        let frames = window.as_nanos().div_ceil(frame_interval.as_nanos());
        self.threshold = u32::try_from(frames).unwrap_or(u32::MAX);
        self
    }

    /// Checks that the options describe a playable session.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is zero (no gesture could ever be
    /// confirmed) or the cooldown is zero.
    pub const fn validate(&self) -> Result<(), OptionsError> {
        if self.threshold == 0 {
            return Err(OptionsError::ZeroThreshold);
        }
        if self.cooldown.is_zero() {
            return Err(OptionsError::ZeroCooldown);
        }
        Ok(())
    }
}

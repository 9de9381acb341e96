//! Playback time display helpers.
//!
//! Media engines report positions as floating point seconds which may be
//! `NaN` or infinite until a track's metadata has loaded. Everything shown to
//! the user goes through [`format_time`] so those states collapse to a single
//! placeholder.

use std::time::Duration;

/// Display value for an unknown or invalid time.
pub const ZERO_TIME: &str = "00:00";

/// Format a number of seconds as `MM:SS`.
///
/// Seconds are floored, never rounded. Minutes keep growing past 59 rather
/// than wrapping into hours. Non-finite or negative input yields
/// [`ZERO_TIME`].
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return ZERO_TIME.to_string();
    }

    // Float to int casts saturate, so absurdly long inputs clamp to u64::MAX.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.floor() as u64;
    let mins = total / 60;
    let secs = total % 60;

    format!("{mins:02}:{secs:02}")
}

/// Extension trait for config durations expressed in milliseconds.
pub trait MillisExt {
    /// Convert a millisecond count to a [`Duration`].
    fn as_millis_duration(&self) -> Duration;
}

impl MillisExt for u64 {
    fn as_millis_duration(&self) -> Duration {
        Duration::from_millis(*self)
    }
}

//! Pointer-to-value mapping for horizontal track controls.
//!
//! The same mapping backs seek preview, hard seek and volume scrubbing; only
//! the range maximum differs (track duration or `1.0`).

/// A pointer position inside a horizontal control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    /// Pixels from the control's left edge (may be negative or past the width)
    pub offset_x: f64,
    /// Rendered width of the control in pixels
    pub width: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(offset_x: f64, width: f64) -> Self {
        Self { offset_x, width }
    }
}

/// Result of mapping a pointer onto a scalar range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPosition {
    /// Position along the control, clamped to `[0, 1]`
    pub fraction: f64,
    /// `fraction * max`
    pub value: f64,
}

impl MappedPosition {
    /// Fraction as a whole percentage, rounded.
    #[must_use]
    pub fn percent(&self) -> u8 {
        to_percent(self.fraction)
    }
}

/// Map a pointer offset onto `[0, max]`.
///
/// A degenerate control (zero, negative or non-finite width) or a
/// non-finite offset maps to the start of the range.
#[must_use]
pub fn map_pointer(pointer: PointerPosition, max: f64) -> MappedPosition {
    let PointerPosition { offset_x, width } = pointer;

    let fraction = if width > 0.0 && width.is_finite() && offset_x.is_finite() {
        (offset_x / width).clamp(0.0, 1.0)
    } else {
        0.0
    };

    MappedPosition {
        fraction,
        value: fraction * max,
    }
}

/// Percentage of `duration` reached by `current`, rounded and clamped to 0..=100.
///
/// Returns 0 while the duration is unknown.
#[must_use]
pub fn playback_percent(current: f64, duration: f64) -> u8 {
    if !current.is_finite() || !duration.is_finite() || duration <= 0.0 {
        return 0;
    }
    to_percent(current / duration)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(fraction: f64) -> u8 {
    // Clamped to 0..=100 first, so the cast cannot truncate.
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_pointer_inside_control() {
        let mapped = map_pointer(PointerPosition::new(50.0, 200.0), 180.0);
        assert!((mapped.fraction - 0.25).abs() < f64::EPSILON);
        assert!((mapped.value - 45.0).abs() < f64::EPSILON);
        assert_eq!(mapped.percent(), 25);
    }

    #[test]
    fn test_map_pointer_clamps_outside_bounds() {
        let before = map_pointer(PointerPosition::new(-30.0, 200.0), 180.0);
        assert!(before.fraction.abs() < f64::EPSILON);
        assert!(before.value.abs() < f64::EPSILON);

        let after = map_pointer(PointerPosition::new(450.0, 200.0), 180.0);
        assert!((after.fraction - 1.0).abs() < f64::EPSILON);
        assert!((after.value - 180.0).abs() < f64::EPSILON);
        assert_eq!(after.percent(), 100);
    }

    #[test]
    fn test_map_pointer_fraction_always_in_range() {
        for offset in [-1000.0, -1.0, 0.0, 1.0, 99.5, 100.0, 101.0, 1e9] {
            let mapped = map_pointer(PointerPosition::new(offset, 100.0), 1.0);
            assert!((0.0..=1.0).contains(&mapped.fraction), "offset {offset}");
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_map_pointer_value_is_fraction_times_max() {
        for (offset, width, max) in [(13.0, 77.0, 212.4), (1.0, 3.0, 1.0), (250.0, 250.0, 9.5)] {
            let mapped = map_pointer(PointerPosition::new(offset, width), max);
            assert_eq!(mapped.value, mapped.fraction * max);
        }
    }

    #[test]
    fn test_map_pointer_degenerate_width() {
        for width in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let mapped = map_pointer(PointerPosition::new(20.0, width), 100.0);
            assert!(mapped.fraction.abs() < f64::EPSILON, "width {width}");
        }
    }

    #[test]
    fn test_map_pointer_with_unknown_max() {
        let mapped = map_pointer(PointerPosition::new(50.0, 100.0), f64::NAN);
        assert!((mapped.fraction - 0.5).abs() < f64::EPSILON);
        assert!(mapped.value.is_nan());
    }

    #[test]
    fn test_playback_percent() {
        assert_eq!(playback_percent(0.0, 200.0), 0);
        assert_eq!(playback_percent(50.0, 200.0), 25);
        assert_eq!(playback_percent(1.0, 3.0), 33);
        assert_eq!(playback_percent(200.0, 200.0), 100);
        assert_eq!(playback_percent(250.0, 200.0), 100);
    }

    #[test]
    fn test_playback_percent_unknown_duration() {
        assert_eq!(playback_percent(10.0, f64::NAN), 0);
        assert_eq!(playback_percent(10.0, f64::INFINITY), 0);
        assert_eq!(playback_percent(10.0, 0.0), 0);
    }
}

use crate::error::{CoreError, Result};
use crate::palette::AccentColor;
use crate::time::MillisExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Seconds jumped by the skip forward / backward buttons
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,
    /// Delay after a skip before playback resumes
    #[serde(default = "default_seek_settle_ms")]
    pub seek_settle_ms: u64,
    /// Volume restored when unmuting from zero
    #[serde(default = "default_unmute_volume")]
    pub unmute_volume: f64,
    /// Volume applied to the media engine at startup
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,
    /// Minimum interval between cosmetic artwork updates while scrolling
    #[serde(default = "default_scroll_throttle_ms")]
    pub scroll_throttle_ms: u64,
    /// Scroll distance over which the CD artwork shrinks and fades out
    #[serde(default = "default_artwork_collapse_px")]
    pub artwork_collapse_px: f64,
    /// Accent color selected at startup
    #[serde(default)]
    pub default_accent: AccentColor,
    /// Log filter directive (e.g. "info", "discplay_core=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

const fn default_skip_seconds() -> f64 {
    10.0
}

const fn default_seek_settle_ms() -> u64 {
    300
}

const fn default_unmute_volume() -> f64 {
    0.5
}

const fn default_initial_volume() -> f64 {
    1.0
}

const fn default_scroll_throttle_ms() -> u64 {
    16
}

const fn default_artwork_collapse_px() -> f64 {
    320.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            skip_seconds: default_skip_seconds(),
            seek_settle_ms: default_seek_settle_ms(),
            unmute_volume: default_unmute_volume(),
            initial_volume: default_initial_volume(),
            scroll_throttle_ms: default_scroll_throttle_ms(),
            artwork_collapse_px: default_artwork_collapse_px(),
            default_accent: AccentColor::default(),
            log_level: default_log_level(),
        }
    }
}

impl PlayerConfig {
    /// Parse and validate a TOML config document
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the controller
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigInvalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.skip_seconds.is_finite() && self.skip_seconds > 0.0) {
            return Err(invalid("skip_seconds must be a positive number"));
        }
        if self.seek_settle_ms == 0 {
            return Err(invalid("seek_settle_ms must be greater than zero"));
        }
        if !(0.0..=1.0).contains(&self.unmute_volume) || self.unmute_volume <= 0.0 {
            return Err(invalid("unmute_volume must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(invalid("initial_volume must be in [0, 1]"));
        }
        if !(self.artwork_collapse_px.is_finite() && self.artwork_collapse_px > 0.0) {
            return Err(invalid("artwork_collapse_px must be a positive number"));
        }
        Ok(())
    }

    #[must_use]
    pub fn seek_settle_delay(&self) -> Duration {
        self.seek_settle_ms.as_millis_duration()
    }

    #[must_use]
    pub fn scroll_throttle_interval(&self) -> Duration {
        self.scroll_throttle_ms.as_millis_duration()
    }
}

fn invalid(message: &str) -> CoreError {
    CoreError::ConfigInvalid {
        message: message.to_string(),
    }
}

/// Commented config template; every value shown is the default.
pub const CONFIG_TEMPLATE: &str = r##"# Discplay Configuration

# Seconds jumped by the skip forward / backward buttons
skip_seconds = 10.0

# Delay (ms) after a skip before playback resumes
seek_settle_ms = 300

# Volume restored when unmuting (0.0 - 1.0, must be above zero)
unmute_volume = 0.5

# Volume applied at startup (0.0 - 1.0)
initial_volume = 1.0

# Minimum interval (ms) between CD artwork updates while scrolling
scroll_throttle_ms = 16

# Scroll distance (px) over which the CD artwork shrinks and fades out
artwork_collapse_px = 320.0

# Accent color: "rose", "red", "orange", "amber", "yellow", "lime", "green",
# "teal", "cyan", "sky", "blue", "indigo", "violet"
default_accent = "rose"

# Log filter directive, e.g. "info" or "discplay_core=debug"
log_level = "info"
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = PlayerConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PlayerConfig::from_toml_str("").unwrap();
        assert_eq!(config.seek_settle_delay(), Duration::from_millis(300));
        assert_eq!(config.scroll_throttle_interval(), Duration::from_millis(16));
        assert_eq!(config.default_accent, AccentColor::Rose);
    }

    #[test]
    fn test_partial_override() {
        let config =
            PlayerConfig::from_toml_str("skip_seconds = 5.0\ndefault_accent = \"teal\"").unwrap();
        assert!((config.skip_seconds - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.default_accent, AccentColor::Teal);
        assert_eq!(config.seek_settle_ms, 300);
    }

    #[test]
    fn test_unknown_accent_is_parse_error() {
        let result = PlayerConfig::from_toml_str("default_accent = \"magenta\"");
        assert!(matches!(result, Err(CoreError::ConfigParseError(_))));
    }

    #[test]
    fn test_validation_rejects_out_of_range_values() {
        for doc in [
            "skip_seconds = 0.0",
            "skip_seconds = -3.0",
            "seek_settle_ms = 0",
            "unmute_volume = 0.0",
            "unmute_volume = 1.5",
            "initial_volume = -0.1",
            "artwork_collapse_px = 0.0",
        ] {
            let result = PlayerConfig::from_toml_str(doc);
            assert!(
                matches!(result, Err(CoreError::ConfigInvalid { .. })),
                "accepted {doc}"
            );
        }
    }
}

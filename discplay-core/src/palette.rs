//! Theme modes and the accent color palette.
//!
//! The palette is static data: every [`AccentColor`] resolves, per
//! [`ThemeMode`], to a primary color and a translucent secondary color used
//! for subtle backgrounds. Lookups never allocate or mutate.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Light or dark presentation of the whole player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Resolve the initial mode from the host's `prefers-color-scheme` signal.
    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value of the root `data-theme` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Value of the theme switch's `data-state` attribute.
    #[must_use]
    pub const fn switch_state(self) -> &'static str {
        match self {
            Self::Light => "unchecked",
            Self::Dark => "checked",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary and secondary display colors for one hue in one theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentPair {
    pub primary: &'static str,
    /// Primary hue with reduced opacity
    pub secondary: &'static str,
}

const fn pair(primary: &'static str, secondary: &'static str) -> AccentPair {
    AccentPair { primary, secondary }
}

/// The fixed set of selectable accent hues.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AccentColor {
    #[default]
    Rose,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
}

impl AccentColor {
    /// Every hue, in swatch order.
    pub const ALL: [Self; 13] = [
        Self::Rose,
        Self::Red,
        Self::Orange,
        Self::Amber,
        Self::Yellow,
        Self::Lime,
        Self::Green,
        Self::Teal,
        Self::Cyan,
        Self::Sky,
        Self::Blue,
        Self::Indigo,
        Self::Violet,
    ];

    /// Stable identifier used in markup (`data-color`) and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rose => "rose",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Lime => "lime",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
            Self::Sky => "sky",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Violet => "violet",
        }
    }

    /// Resolve this hue's display colors for a theme mode.
    #[must_use]
    pub const fn colors(self, mode: ThemeMode) -> AccentPair {
        match mode {
            ThemeMode::Light => self.light(),
            ThemeMode::Dark => self.dark(),
        }
    }

    const fn light(self) -> AccentPair {
        match self {
            Self::Rose => pair(
                "oklch(64.5% 0.246 16.439)",
                "oklch(62.598% 0.24129 16.767 / 0.128)",
            ),
            Self::Red => pair("oklch(63% 0.25 25)", "oklch(61% 0.245 25 / 0.128)"),
            Self::Orange => pair("oklch(70% 0.19 50)", "oklch(68% 0.185 50 / 0.128)"),
            Self::Amber => pair("oklch(75% 0.17 80)", "oklch(73% 0.165 80 / 0.128)"),
            Self::Yellow => pair("oklch(85% 0.13 100)", "oklch(83% 0.125 100 / 0.128)"),
            Self::Lime => pair("oklch(80% 0.18 130)", "oklch(78% 0.175 130 / 0.128)"),
            Self::Green => pair("oklch(72% 0.16 145)", "oklch(70% 0.155 145 / 0.128)"),
            Self::Teal => pair("oklch(72% 0.14 180)", "oklch(70% 0.135 180 / 0.128)"),
            Self::Cyan => pair("oklch(75% 0.12 200)", "oklch(73% 0.115 200 / 0.128)"),
            Self::Sky => pair("oklch(75% 0.13 225)", "oklch(73% 0.125 225 / 0.128)"),
            Self::Blue => pair("oklch(65% 0.18 250)", "oklch(63% 0.175 250 / 0.128)"),
            Self::Indigo => pair("oklch(60% 0.2 275)", "oklch(58% 0.195 275 / 0.128)"),
            Self::Violet => pair("oklch(62% 0.22 300)", "oklch(60% 0.215 300 / 0.128)"),
        }
    }

    const fn dark(self) -> AccentPair {
        match self {
            Self::Rose => pair("oklch(72% 0.23 16.4)", "oklch(72% 0.23 16.4 / 0.18)"),
            Self::Red => pair("oklch(71% 0.23 25)", "oklch(71% 0.23 25 / 0.18)"),
            Self::Orange => pair("oklch(78% 0.17 50)", "oklch(78% 0.17 50 / 0.18)"),
            Self::Amber => pair("oklch(82% 0.15 80)", "oklch(82% 0.15 80 / 0.18)"),
            Self::Yellow => pair("oklch(90% 0.11 100)", "oklch(90% 0.11 100 / 0.18)"),
            Self::Lime => pair("oklch(86% 0.16 130)", "oklch(86% 0.16 130 / 0.18)"),
            Self::Green => pair("oklch(80% 0.14 145)", "oklch(80% 0.14 145 / 0.18)"),
            Self::Teal => pair("oklch(80% 0.12 180)", "oklch(80% 0.12 180 / 0.18)"),
            Self::Cyan => pair("oklch(82% 0.1 200)", "oklch(82% 0.1 200 / 0.18)"),
            Self::Sky => pair("oklch(82% 0.11 225)", "oklch(82% 0.11 225 / 0.18)"),
            Self::Blue => pair("oklch(73% 0.16 250)", "oklch(73% 0.16 250 / 0.18)"),
            Self::Indigo => pair("oklch(68% 0.18 275)", "oklch(68% 0.18 275 / 0.18)"),
            Self::Violet => pair("oklch(70% 0.2 300)", "oklch(70% 0.2 300 / 0.18)"),
        }
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccentColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownColor { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_theme_toggle_round_trip() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_theme_from_preference() {
        assert_eq!(ThemeMode::from_prefers_dark(true), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_prefers_dark(false), ThemeMode::Light);
    }

    #[test]
    fn test_theme_attributes() {
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
        assert_eq!(ThemeMode::Dark.switch_state(), "checked");
        assert_eq!(ThemeMode::Light.switch_state(), "unchecked");
    }

    #[test]
    fn test_palette_has_thirteen_distinct_hues() {
        let names: HashSet<_> = AccentColor::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_every_hue_differs_between_modes() {
        for color in AccentColor::ALL {
            let light = color.colors(ThemeMode::Light);
            let dark = color.colors(ThemeMode::Dark);
            assert_ne!(light, dark, "{color} resolves identically in both modes");
        }
    }

    #[test]
    fn test_secondary_colors_are_translucent() {
        for color in AccentColor::ALL {
            for mode in [ThemeMode::Light, ThemeMode::Dark] {
                let colors = color.colors(mode);
                assert!(colors.secondary.contains(" / "), "{color} {mode}");
                assert!(!colors.primary.contains(" / "), "{color} {mode}");
            }
        }
    }

    #[test]
    fn test_rose_lookup() {
        let colors = AccentColor::Rose.colors(ThemeMode::Dark);
        assert_eq!(colors.primary, "oklch(72% 0.23 16.4)");
        assert_eq!(colors.secondary, "oklch(72% 0.23 16.4 / 0.18)");
    }

    #[test]
    fn test_parse_accent_color() {
        assert_eq!("teal".parse::<AccentColor>().ok(), Some(AccentColor::Teal));
        assert_eq!(" Violet ".parse::<AccentColor>().ok(), Some(AccentColor::Violet));
        assert!(matches!(
            "magenta".parse::<AccentColor>(),
            Err(CoreError::UnknownColor { name }) if name == "magenta"
        ));
    }

    #[test]
    fn test_accent_serde_names_match_markup_ids() {
        for color in AccentColor::ALL {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.as_str()));
        }
    }
}

//! View synchronization sink.
//!
//! The controller computes every display value (percentages, formatted
//! times, resolved colors, flags) and pushes it through [`ViewSink`]. Sinks
//! only apply values; they never derive them.

use crate::palette::{AccentColor, AccentPair, ThemeMode};
use crate::playlist::Track;
use std::collections::BTreeMap;

/// Scale and opacity of the CD artwork for a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtworkTransform {
    pub scale: f64,
    pub opacity: f64,
}

impl ArtworkTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        opacity: 1.0,
    };

    /// Shrink and fade linearly, reaching zero after `collapse_px` of scrolling.
    #[must_use]
    pub fn for_scroll(offset_y: f64, collapse_px: f64) -> Self {
        if !offset_y.is_finite() || collapse_px <= 0.0 {
            return Self::IDENTITY;
        }
        let scale = (1.0 - offset_y / collapse_px).clamp(0.0, 1.0);
        Self {
            scale,
            opacity: scale,
        }
    }
}

impl Default for ArtworkTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Display surface updated by the playback controller.
pub trait ViewSink {
    /// Artwork, artwork alt text and name of the now-playing track
    fn show_track(&mut self, track: &Track);

    /// Move the active highlight in the track list
    fn highlight_track(&mut self, track_id: u32);

    /// Play/pause icon and the CD's paused flag
    fn show_playing(&mut self, playing: bool);

    /// Progress on both the CD ring and the progress track
    fn show_progress(&mut self, percent: u8);

    fn show_elapsed(&mut self, text: &str);

    fn show_duration(&mut self, text: &str);

    /// Hover tooltip over the progress track
    fn show_seek_preview(&mut self, percent: u8, text: &str);

    /// Muted / unmuted volume icon
    fn show_muted(&mut self, muted: bool);

    /// Volume slider fill
    fn show_volume_level(&mut self, percent: u8);

    fn show_favorite(&mut self, active: bool);

    /// Root theme attribute and theme switch state
    fn show_theme(&mut self, mode: ThemeMode);

    /// Background of one color picker swatch
    fn show_swatch(&mut self, color: AccentColor, primary: &'static str);

    fn highlight_swatch(&mut self, color: AccentColor);

    /// Shared accent style variables
    fn show_accent(&mut self, colors: AccentPair);

    fn show_artwork_transform(&mut self, transform: ArtworkTransform);
}

/// In-memory view that records the last value applied to each property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    pub track_name: String,
    pub artwork_url: String,
    pub active_track_id: Option<u32>,
    pub playing: bool,
    pub progress_percent: u8,
    pub elapsed: String,
    pub duration: String,
    pub seek_preview: Option<(u8, String)>,
    pub muted: bool,
    pub volume_percent: u8,
    pub favorite: bool,
    pub theme: ThemeMode,
    pub swatches: BTreeMap<AccentColor, &'static str>,
    pub active_swatch: Option<AccentColor>,
    pub accent: Option<AccentPair>,
    pub artwork: ArtworkTransform,
}

impl ViewSink for ViewModel {
    fn show_track(&mut self, track: &Track) {
        self.track_name.clone_from(&track.name);
        self.artwork_url.clone_from(&track.artwork_url);
    }

    fn highlight_track(&mut self, track_id: u32) {
        self.active_track_id = Some(track_id);
    }

    fn show_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn show_progress(&mut self, percent: u8) {
        self.progress_percent = percent;
    }

    fn show_elapsed(&mut self, text: &str) {
        text.clone_into(&mut self.elapsed);
    }

    fn show_duration(&mut self, text: &str) {
        text.clone_into(&mut self.duration);
    }

    fn show_seek_preview(&mut self, percent: u8, text: &str) {
        self.seek_preview = Some((percent, text.to_string()));
    }

    fn show_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn show_volume_level(&mut self, percent: u8) {
        self.volume_percent = percent;
    }

    fn show_favorite(&mut self, active: bool) {
        self.favorite = active;
    }

    fn show_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
    }

    fn show_swatch(&mut self, color: AccentColor, primary: &'static str) {
        self.swatches.insert(color, primary);
    }

    fn highlight_swatch(&mut self, color: AccentColor) {
        self.active_swatch = Some(color);
    }

    fn show_accent(&mut self, colors: AccentPair) {
        self.accent = Some(colors);
    }

    fn show_artwork_transform(&mut self, transform: ArtworkTransform) {
        self.artwork = transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_transform_shrinks_with_scroll() {
        let top = ArtworkTransform::for_scroll(0.0, 320.0);
        assert_eq!(top, ArtworkTransform::IDENTITY);

        let half = ArtworkTransform::for_scroll(160.0, 320.0);
        assert!((half.scale - 0.5).abs() < f64::EPSILON);
        assert!((half.opacity - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_artwork_transform_clamps() {
        let gone = ArtworkTransform::for_scroll(1000.0, 320.0);
        assert!(gone.scale.abs() < f64::EPSILON);

        // Overscroll above the page top
        let bounce = ArtworkTransform::for_scroll(-40.0, 320.0);
        assert!((bounce.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_view_model_records_values() {
        let mut view = ViewModel::default();
        let track = Track::new(3, "Night Drive", "Band", "/img/3.jpg", "/audio/3.mp3");

        view.show_track(&track);
        view.highlight_track(track.id);
        view.show_elapsed("01:05");
        view.show_swatch(AccentColor::Sky, "oklch(1 2 3)");

        assert_eq!(view.track_name, "Night Drive");
        assert_eq!(view.artwork_url, "/img/3.jpg");
        assert_eq!(view.active_track_id, Some(3));
        assert_eq!(view.elapsed, "01:05");
        assert_eq!(view.swatches.get(&AccentColor::Sky), Some(&"oklch(1 2 3)"));
    }
}

//! Input routing: UI regions and events to controller commands.

use crate::config::PlayerConfig;
use crate::media::MediaEvent;
use crate::palette::{AccentColor, ThemeMode};
use crate::playlist::Playlist;
use crate::progress::PointerPosition;
use crate::settle::SettleTicket;
use crate::view::ArtworkTransform;
use std::time::Duration;
use tracing::debug;

const LOG_TARGET: &str = "discplay::input";

/// Interactive regions of the player UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiRegion {
    PlayButton,
    NextButton,
    PreviousButton,
    ShuffleButton,
    ReplayButton,
    SkipForwardButton,
    SkipBackwardButton,
    FavoriteButton,
    VolumeButton,
    VolumeSlider,
    ProgressTrack,
    ThemeSwitch,
    ColorSwatch(AccentColor),
    /// An entry in the track list, identified by its `data-id` attribute
    TrackItem { data_id: Option<String> },
}

/// Raw pointer and scroll input
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click {
        region: UiRegion,
        /// Pointer offset from the region's left edge, in pixels
        offset_x: f64,
    },
    PointerMove {
        region: UiRegion,
        offset_x: f64,
        /// Whether a pointer button is held (dragging)
        pressed: bool,
    },
    Scroll {
        /// Vertical page scroll offset, in pixels
        offset_y: f64,
        /// Event time since the host's time origin
        timestamp: Duration,
    },
}

impl UiEvent {
    /// Click where the pointer position does not matter
    #[must_use]
    pub const fn click(region: UiRegion) -> Self {
        Self::Click {
            region,
            offset_x: 0.0,
        }
    }

    #[must_use]
    pub const fn click_at(region: UiRegion, offset_x: f64) -> Self {
        Self::Click { region, offset_x }
    }

    #[must_use]
    pub const fn hover(region: UiRegion, offset_x: f64) -> Self {
        Self::PointerMove {
            region,
            offset_x,
            pressed: false,
        }
    }

    #[must_use]
    pub const fn drag(region: UiRegion, offset_x: f64) -> Self {
        Self::PointerMove {
            region,
            offset_x,
            pressed: true,
        }
    }

    #[must_use]
    pub const fn scroll(offset_y: f64, timestamp: Duration) -> Self {
        Self::Scroll {
            offset_y,
            timestamp,
        }
    }
}

/// Operations accepted by the playback controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    TogglePlayPause,
    Play,
    Pause,
    Next,
    Previous,
    Shuffle,
    Replay,
    SkipForward,
    SkipBackward,
    SelectTrack(usize),
    HardSeek(PointerPosition),
    PreviewSeek(PointerPosition),
    ToggleMute,
    SetVolume(PointerPosition),
    ToggleFavorite,
    ToggleTheme,
    SetTheme(ThemeMode),
    SelectColor(AccentColor),
    TransformArtwork(ArtworkTransform),
}

/// Everything that can drive the player, queued in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    Ui(UiEvent),
    Command(PlayerCommand),
    Media(MediaEvent),
    SettleElapsed(SettleTicket),
    /// The scroll throttle window closed
    ScrollFlush,
}

/// Rendered sizes of the seekable controls
pub trait ControlGeometry {
    fn progress_track_width(&self) -> f64;
    fn volume_slider_width(&self) -> f64;
}

/// Fixed control sizes, for headless hosts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeometry {
    pub progress_track_width: f64,
    pub volume_slider_width: f64,
}

impl ControlGeometry for FixedGeometry {
    fn progress_track_width(&self) -> f64 {
        self.progress_track_width
    }

    fn volume_slider_width(&self) -> f64 {
        self.volume_slider_width
    }
}

/// Outcome of offering a scroll update to [`ScrollThrottle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAdmission {
    /// Apply the update now
    Apply,
    /// Held as the trailing update; flush after the delay
    Defer(Duration),
    /// Replaced the held trailing update, whose flush is already scheduled
    Coalesce,
}

/// Throttle with a leading and a trailing edge.
///
/// At most one update is applied per `interval`. Updates arriving inside the
/// window replace each other and the last one is flushed when the window
/// closes, so a burst always ends on its final offset.
#[derive(Debug, Clone)]
pub struct ScrollThrottle {
    interval: Duration,
    last: Option<Duration>,
    trailing: Option<f64>,
    flush_at: Option<Duration>,
}

impl ScrollThrottle {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            trailing: None,
            flush_at: None,
        }
    }

    pub fn admit(&mut self, offset: f64, now: Duration) -> ScrollAdmission {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.interval => {
                self.trailing = Some(offset);
                if self.flush_at.is_some() {
                    return ScrollAdmission::Coalesce;
                }
                let due = last + self.interval;
                self.flush_at = Some(due);
                ScrollAdmission::Defer(due.saturating_sub(now))
            }
            _ => {
                self.last = Some(now);
                self.trailing = None;
                ScrollAdmission::Apply
            }
        }
    }

    /// Take the held trailing update when its flush fires.
    ///
    /// The window restarts at the scheduled flush time.
    pub fn flush(&mut self) -> Option<f64> {
        let due = self.flush_at.take()?;
        let offset = self.trailing.take()?;
        self.last = self.last.max(Some(due));
        Some(offset)
    }

    #[must_use]
    pub const fn has_trailing(&self) -> bool {
        self.trailing.is_some()
    }
}

/// Host timer that posts [`PlayerInput::ScrollFlush`] after a delay.
pub trait FlushTimer {
    fn schedule_flush(&mut self, delay: Duration);
}

/// Maps UI events to exactly one controller command (or none)
pub struct InputRouter<G> {
    geometry: G,
    scroll: ScrollThrottle,
    flush_request: Option<Duration>,
    artwork_collapse_px: f64,
}

impl<G: ControlGeometry> InputRouter<G> {
    pub fn new(geometry: G, config: &PlayerConfig) -> Self {
        Self {
            geometry,
            scroll: ScrollThrottle::new(config.scroll_throttle_interval()),
            flush_request: None,
            artwork_collapse_px: config.artwork_collapse_px,
        }
    }

    pub const fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Resolve an event against the playlist and the current track index
    pub fn route(
        &mut self,
        event: &UiEvent,
        playlist: &Playlist,
        current_index: usize,
    ) -> Option<PlayerCommand> {
        match event {
            UiEvent::Click { region, offset_x } => {
                self.route_click(region, *offset_x, playlist, current_index)
            }
            UiEvent::PointerMove {
                region,
                offset_x,
                pressed,
            } => self.route_pointer_move(region, *offset_x, *pressed),
            UiEvent::Scroll {
                offset_y,
                timestamp,
            } => match self.scroll.admit(*offset_y, *timestamp) {
                ScrollAdmission::Apply => Some(self.artwork_command(*offset_y)),
                ScrollAdmission::Defer(delay) => {
                    self.flush_request = Some(delay);
                    None
                }
                ScrollAdmission::Coalesce => None,
            },
        }
    }

    /// Delay of a trailing scroll flush the host must schedule, if one was
    /// requested by the last routed event
    pub fn take_flush_request(&mut self) -> Option<Duration> {
        self.flush_request.take()
    }

    /// Artwork update for the held trailing scroll offset
    pub fn flush_scroll(&mut self) -> Option<PlayerCommand> {
        self.scroll
            .flush()
            .map(|offset_y| self.artwork_command(offset_y))
    }

    fn artwork_command(&self, offset_y: f64) -> PlayerCommand {
        PlayerCommand::TransformArtwork(ArtworkTransform::for_scroll(
            offset_y,
            self.artwork_collapse_px,
        ))
    }

    fn route_click(
        &self,
        region: &UiRegion,
        offset_x: f64,
        playlist: &Playlist,
        current_index: usize,
    ) -> Option<PlayerCommand> {
        let command = match region {
            UiRegion::PlayButton => PlayerCommand::TogglePlayPause,
            UiRegion::NextButton => PlayerCommand::Next,
            UiRegion::PreviousButton => PlayerCommand::Previous,
            UiRegion::ShuffleButton => PlayerCommand::Shuffle,
            UiRegion::ReplayButton => PlayerCommand::Replay,
            UiRegion::SkipForwardButton => PlayerCommand::SkipForward,
            UiRegion::SkipBackwardButton => PlayerCommand::SkipBackward,
            UiRegion::FavoriteButton => PlayerCommand::ToggleFavorite,
            UiRegion::VolumeButton => PlayerCommand::ToggleMute,
            UiRegion::ThemeSwitch => PlayerCommand::ToggleTheme,
            UiRegion::ColorSwatch(color) => PlayerCommand::SelectColor(*color),
            UiRegion::ProgressTrack => PlayerCommand::HardSeek(self.progress_pointer(offset_x)),
            UiRegion::VolumeSlider => PlayerCommand::SetVolume(self.volume_pointer(offset_x)),
            UiRegion::TrackItem { data_id } => {
                return resolve_track_item(data_id.as_deref(), playlist, current_index)
                    .map(PlayerCommand::SelectTrack);
            }
        };
        Some(command)
    }

    fn route_pointer_move(
        &self,
        region: &UiRegion,
        offset_x: f64,
        pressed: bool,
    ) -> Option<PlayerCommand> {
        match region {
            UiRegion::ProgressTrack => {
                Some(PlayerCommand::PreviewSeek(self.progress_pointer(offset_x)))
            }
            UiRegion::VolumeSlider if pressed => {
                Some(PlayerCommand::SetVolume(self.volume_pointer(offset_x)))
            }
            _ => None,
        }
    }

    fn progress_pointer(&self, offset_x: f64) -> PointerPosition {
        PointerPosition::new(offset_x, self.geometry.progress_track_width())
    }

    fn volume_pointer(&self, offset_x: f64) -> PointerPosition {
        PointerPosition::new(offset_x, self.geometry.volume_slider_width())
    }
}

/// Re-derive a track index from a track list entry's `data-id`.
fn resolve_track_item(
    data_id: Option<&str>,
    playlist: &Playlist,
    current_index: usize,
) -> Option<usize> {
    let Some(raw) = data_id else {
        debug!(target: LOG_TARGET, "Track item click without data-id");
        return None;
    };
    let Ok(id) = raw.trim().parse::<u32>() else {
        debug!(target: LOG_TARGET, "Ignoring track item with malformed id {:?}", raw);
        return None;
    };
    let Some(index) = playlist.index_of(id) else {
        debug!(target: LOG_TARGET, "Ignoring click on unknown track id {}", id);
        return None;
    };
    (index != current_index).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::Track;

    const GEOMETRY: FixedGeometry = FixedGeometry {
        progress_track_width: 300.0,
        volume_slider_width: 80.0,
    };

    fn playlist() -> Playlist {
        Playlist::new(vec![
            Track::new(10, "A", "X", "/a.jpg", "/a.mp3"),
            Track::new(20, "B", "X", "/b.jpg", "/b.mp3"),
            Track::new(30, "C", "X", "/c.jpg", "/c.mp3"),
        ])
        .unwrap()
    }

    fn router() -> InputRouter<FixedGeometry> {
        InputRouter::new(GEOMETRY, &PlayerConfig::default())
    }

    fn track_item(id: &str) -> UiEvent {
        UiEvent::click(UiRegion::TrackItem {
            data_id: Some(id.to_string()),
        })
    }

    #[test]
    fn test_buttons_map_to_transport_commands() {
        let mut router = router();
        let playlist = playlist();
        let cases = [
            (UiRegion::PlayButton, PlayerCommand::TogglePlayPause),
            (UiRegion::NextButton, PlayerCommand::Next),
            (UiRegion::PreviousButton, PlayerCommand::Previous),
            (UiRegion::ShuffleButton, PlayerCommand::Shuffle),
            (UiRegion::ReplayButton, PlayerCommand::Replay),
            (UiRegion::SkipForwardButton, PlayerCommand::SkipForward),
            (UiRegion::SkipBackwardButton, PlayerCommand::SkipBackward),
            (UiRegion::FavoriteButton, PlayerCommand::ToggleFavorite),
            (UiRegion::VolumeButton, PlayerCommand::ToggleMute),
            (UiRegion::ThemeSwitch, PlayerCommand::ToggleTheme),
            (
                UiRegion::ColorSwatch(AccentColor::Lime),
                PlayerCommand::SelectColor(AccentColor::Lime),
            ),
        ];

        for (region, expected) in cases {
            let routed = router.route(&UiEvent::click(region.clone()), &playlist, 0);
            assert_eq!(routed, Some(expected), "{region:?}");
        }
    }

    #[test]
    fn test_progress_track_carries_geometry() {
        let mut router = router();
        let playlist = playlist();

        let click = UiEvent::click_at(UiRegion::ProgressTrack, 150.0);
        assert_eq!(
            router.route(&click, &playlist, 0),
            Some(PlayerCommand::HardSeek(PointerPosition::new(150.0, 300.0)))
        );

        let hover = UiEvent::hover(UiRegion::ProgressTrack, 45.0);
        assert_eq!(
            router.route(&hover, &playlist, 0),
            Some(PlayerCommand::PreviewSeek(PointerPosition::new(45.0, 300.0)))
        );
    }

    #[test]
    fn test_volume_slider_scrubs_only_while_pressed() {
        let mut router = router();
        let playlist = playlist();

        let hover = UiEvent::hover(UiRegion::VolumeSlider, 20.0);
        assert_eq!(router.route(&hover, &playlist, 0), None);

        let drag = UiEvent::drag(UiRegion::VolumeSlider, 20.0);
        assert_eq!(
            router.route(&drag, &playlist, 0),
            Some(PlayerCommand::SetVolume(PointerPosition::new(20.0, 80.0)))
        );

        let click = UiEvent::click_at(UiRegion::VolumeSlider, 60.0);
        assert_eq!(
            router.route(&click, &playlist, 0),
            Some(PlayerCommand::SetVolume(PointerPosition::new(60.0, 80.0)))
        );
    }

    #[test]
    fn test_track_item_resolves_by_identity() {
        let mut router = router();
        let playlist = playlist();

        assert_eq!(
            router.route(&track_item("30"), &playlist, 0),
            Some(PlayerCommand::SelectTrack(2))
        );
    }

    #[test]
    fn test_track_item_noop_cases() {
        let mut router = router();
        let playlist = playlist();

        // Already current
        assert_eq!(router.route(&track_item("10"), &playlist, 0), None);
        // Unknown id
        assert_eq!(router.route(&track_item("99"), &playlist, 0), None);
        // Not a number
        assert_eq!(router.route(&track_item("abc"), &playlist, 0), None);
        // Missing attribute
        let missing = UiEvent::click(UiRegion::TrackItem { data_id: None });
        assert_eq!(router.route(&missing, &playlist, 0), None);
    }

    #[test]
    fn test_hover_on_buttons_is_ignored() {
        let mut router = router();
        let playlist = playlist();
        let hover = UiEvent::hover(UiRegion::PlayButton, 3.0);
        assert_eq!(router.route(&hover, &playlist, 0), None);
    }

    #[test]
    fn test_scroll_is_throttled() {
        let mut router = router();
        let playlist = playlist();
        let at = Duration::from_millis;

        let first = router.route(&UiEvent::scroll(160.0, at(1000)), &playlist, 0);
        assert!(matches!(
            first,
            Some(PlayerCommand::TransformArtwork(t)) if (t.scale - 0.5).abs() < f64::EPSILON
        ));

        // Inside the 16ms window: held until the window closes
        assert_eq!(router.route(&UiEvent::scroll(170.0, at(1010)), &playlist, 0), None);
        assert_eq!(router.take_flush_request(), Some(at(6)));

        // Window elapsed: admitted again
        assert!(router
            .route(&UiEvent::scroll(320.0, at(1016)), &playlist, 0)
            .is_some());
        assert_eq!(router.take_flush_request(), None);
    }

    #[test]
    fn test_scroll_burst_flushes_final_offset() {
        let mut router = router();
        let playlist = playlist();
        let at = Duration::from_millis;

        assert!(router
            .route(&UiEvent::scroll(160.0, at(1000)), &playlist, 0)
            .is_some());
        assert_eq!(router.route(&UiEvent::scroll(80.0, at(1005)), &playlist, 0), None);
        assert_eq!(router.route(&UiEvent::scroll(0.0, at(1010)), &playlist, 0), None);

        // One flush for the whole burst
        assert_eq!(router.take_flush_request(), Some(at(11)));

        let flushed = router.flush_scroll();
        assert!(matches!(
            flushed,
            Some(PlayerCommand::TransformArtwork(t)) if (t.scale - 1.0).abs() < f64::EPSILON
        ));
        assert_eq!(router.flush_scroll(), None);
    }

    #[test]
    fn test_scroll_throttle_edges() {
        let mut throttle = ScrollThrottle::new(Duration::from_millis(16));
        let at = Duration::from_millis;

        assert_eq!(throttle.admit(10.0, at(0)), ScrollAdmission::Apply);
        assert_eq!(throttle.admit(20.0, at(4)), ScrollAdmission::Defer(at(12)));
        assert_eq!(throttle.admit(30.0, at(15)), ScrollAdmission::Coalesce);
        assert!(throttle.has_trailing());

        assert_eq!(throttle.flush(), Some(30.0));
        assert!(!throttle.has_trailing());

        // The window restarts at the flush time
        assert_eq!(throttle.admit(40.0, at(20)), ScrollAdmission::Defer(at(12)));
        assert_eq!(throttle.admit(50.0, at(32)), ScrollAdmission::Apply);
        assert!(!throttle.has_trailing());

        // The stale flush finds nothing to apply
        assert_eq!(throttle.flush(), None);
    }
}

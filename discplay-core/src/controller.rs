//! Playback state machine.
//!
//! [`PlayerController`] is the single owner of the current track index,
//! playback phase, theme and accent. User commands and media engine events
//! both arrive as method calls and run to completion; every side effect on
//! the engine and the view is issued from here.

use crate::config::PlayerConfig;
use crate::error::CoreError;
use crate::events::PlayerEvent;
use crate::input::PlayerCommand;
use crate::media::{MediaEngine, MediaEvent};
use crate::palette::{AccentColor, ThemeMode};
use crate::playback::{PlaybackPhase, Transport};
use crate::playlist::{Playlist, Track};
use crate::progress::{map_pointer, playback_percent, PointerPosition};
use crate::settle::{SettleSlot, SettleTicket, SettleTimer};
use crate::time::{format_time, ZERO_TIME};
use crate::view::{ArtworkTransform, ViewSink};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

pub const LOG_TARGET: &str = "discplay::controller";

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Playback controller driving one media engine and one view
pub struct PlayerController<M, V, T> {
    playlist: Playlist,
    index: usize,
    phase: PlaybackPhase,
    theme: ThemeMode,
    accent: AccentColor,
    settle: SettleSlot,
    skip_seconds: f64,
    settle_delay: Duration,
    unmute_volume: f64,
    initial_volume: f64,
    media: M,
    view: V,
    timer: T,
    rng: StdRng,
    events: broadcast::Sender<PlayerEvent>,
}

impl<M, V, T> PlayerController<M, V, T>
where
    M: MediaEngine,
    V: ViewSink,
    T: SettleTimer,
{
    /// Create a controller positioned on the first track.
    ///
    /// Nothing is loaded or rendered until [`start`](Self::start) is called.
    pub fn new(
        playlist: Playlist,
        config: &PlayerConfig,
        theme: ThemeMode,
        media: M,
        view: V,
        timer: T,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            playlist,
            index: 0,
            phase: PlaybackPhase::Idle,
            theme,
            accent: config.default_accent,
            settle: SettleSlot::default(),
            skip_seconds: config.skip_seconds,
            settle_delay: config.seek_settle_delay(),
            unmute_volume: config.unmute_volume,
            initial_volume: config.initial_volume,
            media,
            view,
            timer,
            rng: StdRng::from_entropy(),
            events,
        }
    }

    /// Use a deterministic shuffle sequence
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Subscribe to diagnostics events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    pub const fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_track(&self) -> &Track {
        &self.playlist.tracks()[self.index]
    }

    pub const fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub const fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub const fn transport(&self) -> Transport {
        self.phase.transport()
    }

    pub const fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub const fn accent(&self) -> AccentColor {
        self.accent
    }

    /// Target of the skip waiting to resume, if any
    pub fn pending_seek(&self) -> Option<f64> {
        self.settle.pending().map(|pending| pending.target)
    }

    pub const fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Render the initial state and load the first track.
    pub fn start(&mut self) {
        self.view.show_theme(self.theme);
        self.render_swatches();
        self.view.highlight_swatch(self.accent);
        self.view.show_accent(self.accent.colors(self.theme));

        self.render_current_track();
        self.view.show_playing(false);

        self.media.set_volume(self.initial_volume);
        self.view
            .show_volume_level(playback_percent(self.initial_volume, 1.0));
        self.view.show_muted(self.initial_volume <= 0.0);

        self.load_current();
        info!(
            target: LOG_TARGET,
            "Player started with {} tracks ({} theme, {} accent)",
            self.playlist.len(),
            self.theme,
            self.accent
        );
    }

    /// Apply one command
    pub fn dispatch(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::TogglePlayPause => self.toggle_play_pause(),
            PlayerCommand::Play => self.play(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Next => {
                self.next();
            }
            PlayerCommand::Previous => {
                self.previous();
            }
            PlayerCommand::Shuffle => {
                self.shuffle();
            }
            PlayerCommand::Replay => self.replay(),
            PlayerCommand::SkipForward => self.skip_forward(),
            PlayerCommand::SkipBackward => self.skip_backward(),
            PlayerCommand::SelectTrack(index) => {
                self.select_track(index);
            }
            PlayerCommand::HardSeek(pointer) => self.hard_seek(pointer),
            PlayerCommand::PreviewSeek(pointer) => self.preview_seek(pointer),
            PlayerCommand::ToggleMute => self.toggle_mute(),
            PlayerCommand::SetVolume(pointer) => self.set_volume(pointer),
            PlayerCommand::ToggleFavorite => self.toggle_favorite(),
            PlayerCommand::ToggleTheme => self.toggle_theme(),
            PlayerCommand::SetTheme(mode) => self.set_theme(mode),
            PlayerCommand::SelectColor(color) => self.select_color(color),
            PlayerCommand::TransformArtwork(transform) => self.transform_artwork(transform),
        }
    }

    /// Apply one media engine notification
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::DataLoaded => self.on_data_loaded(),
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::VolumeChanged => self.on_volume_changed(),
            MediaEvent::LoadError { message } => self.on_load_error(message),
            MediaEvent::PlayStarted => self.on_play_started(),
            MediaEvent::PlayRejected { reason } => self.on_play_rejected(reason),
        }
    }

    // ---------------------------------------------------------------------
    // Track selection
    // ---------------------------------------------------------------------

    /// Make `index` the current track and load it.
    ///
    /// Returns `false` without side effects if `index` is already current or
    /// out of range. Every transport operation funnels through here.
    pub fn select_track(&mut self, index: usize) -> bool {
        if index == self.index {
            return false;
        }
        if index >= self.playlist.len() {
            warn!(
                target: LOG_TARGET,
                "Ignoring selection of track index {} (playlist has {})",
                index,
                self.playlist.len()
            );
            return false;
        }

        self.cancel_settle();
        self.index = index;
        self.render_current_track();
        self.load_current();

        let track_id = self.current_track().id;
        info!(
            target: LOG_TARGET,
            "Track changed to #{} '{}' (index {})",
            track_id,
            self.current_track().name,
            index
        );
        self.publish(PlayerEvent::TrackChanged { index, track_id });
        true
    }

    /// Advance to the next track, wrapping to the first
    pub fn next(&mut self) -> usize {
        self.select_track(self.playlist.next_index(self.index));
        self.index
    }

    /// Go back one track, wrapping to the last
    pub fn previous(&mut self) -> usize {
        self.select_track(self.playlist.previous_index(self.index));
        self.index
    }

    /// Jump to a uniformly random track other than the current one.
    ///
    /// On a single-track playlist this is a no-op returning the current index.
    pub fn shuffle(&mut self) -> usize {
        let len = self.playlist.len();
        if len <= 1 {
            debug!(target: LOG_TARGET, "Shuffle ignored: playlist has a single track");
            return self.index;
        }

        let mut candidate = self.rng.gen_range(0..len);
        while candidate == self.index {
            candidate = self.rng.gen_range(0..len);
        }
        self.select_track(candidate);
        self.index
    }

    // ---------------------------------------------------------------------
    // Transport
    // ---------------------------------------------------------------------

    pub fn toggle_play_pause(&mut self) {
        if self.media.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Request playback. A pending skip resume is superseded.
    pub fn play(&mut self) {
        if self.cancel_settle() {
            self.phase = PlaybackPhase::Paused;
        }
        self.media.request_play();
    }

    pub fn pause(&mut self) {
        if self.cancel_settle() {
            debug!(target: LOG_TARGET, "Pending seek resume cancelled by pause");
        }
        self.media.pause();
        if self.phase.has_media() {
            self.phase = PlaybackPhase::Paused;
        }
        self.view.show_playing(false);
        self.publish(PlayerEvent::PlaybackPaused {
            track_id: self.current_track().id,
        });
    }

    pub fn replay(&mut self) {
        self.media.set_current_time(0.0);
        self.play();
    }

    pub fn skip_forward(&mut self) {
        self.skip_by(self.skip_seconds);
    }

    pub fn skip_backward(&mut self) {
        self.skip_by(-self.skip_seconds);
    }

    fn skip_by(&mut self, delta: f64) {
        let duration = self.media.duration();
        if !duration.is_finite() {
            debug!(target: LOG_TARGET, "Skip ignored: duration not known yet");
            return;
        }
        let target = (self.media.current_time() + delta).clamp(0.0, duration.max(0.0));
        self.begin_seek(target);
    }

    /// Jump to `target` and resume playback once the settle delay elapses.
    ///
    /// A pending resume from an earlier seek is cancelled.
    fn begin_seek(&mut self, target: f64) {
        let (pending, replaced) = self.settle.arm(target);
        if let Some(ticket) = replaced {
            self.timer.cancel(ticket);
            debug!(
                target: LOG_TARGET,
                "Seek settle {} superseded by {}",
                ticket.id(),
                pending.ticket.id()
            );
        }

        self.media.set_current_time(target);
        self.media.pause();
        self.phase = PlaybackPhase::Seeking;
        self.timer.schedule(pending.ticket, self.settle_delay);

        debug!(
            target: LOG_TARGET,
            "Seek to {:.2}s scheduled to resume in {:?}",
            target,
            self.settle_delay
        );
        self.publish(PlayerEvent::SeekScheduled { target });
    }

    /// Settle timer callback. Tickets that are no longer pending are ignored.
    pub fn on_settle_elapsed(&mut self, ticket: SettleTicket) {
        let Some(pending) = self.settle.take(ticket) else {
            debug!(target: LOG_TARGET, "Ignoring stale settle ticket {}", ticket.id());
            return;
        };

        self.phase = PlaybackPhase::Paused;
        debug!(target: LOG_TARGET, "Seek to {:.2}s settled, resuming", pending.target);
        self.publish(PlayerEvent::SeekSettled {
            target: pending.target,
        });
        self.play();
    }

    /// Clear a pending settle, returning whether one was pending.
    fn cancel_settle(&mut self) -> bool {
        match self.settle.clear() {
            Some(ticket) => {
                self.timer.cancel(ticket);
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------------
    // Seek bar and volume
    // ---------------------------------------------------------------------

    /// Jump directly to the pointer position on the progress track
    pub fn hard_seek(&mut self, pointer: PointerPosition) {
        let duration = self.media.duration();
        if !duration.is_finite() {
            debug!(target: LOG_TARGET, "Hard seek ignored: duration not known yet");
            return;
        }
        let mapped = map_pointer(pointer, duration);
        self.media.set_current_time(mapped.value);
    }

    /// Update the hover tooltip without touching playback
    pub fn preview_seek(&mut self, pointer: PointerPosition) {
        let mapped = map_pointer(pointer, self.media.duration());
        self.view
            .show_seek_preview(mapped.percent(), &format_time(mapped.value));
    }

    pub fn toggle_mute(&mut self) {
        let level = if self.media.volume() <= 0.0 {
            self.unmute_volume
        } else {
            0.0
        };
        self.media.set_volume(level);
        self.view.show_volume_level(playback_percent(level, 1.0));
    }

    /// Set the engine volume from the pointer position on the volume slider.
    ///
    /// The mute icon follows the engine's volume change notification.
    pub fn set_volume(&mut self, pointer: PointerPosition) {
        let mapped = map_pointer(pointer, 1.0);
        self.media.set_volume(mapped.value);
        self.view.show_volume_level(mapped.percent());
    }

    // ---------------------------------------------------------------------
    // Favorite, theme and accent
    // ---------------------------------------------------------------------

    pub fn toggle_favorite(&mut self) {
        let Some(favorite) = self.playlist.toggle_favorite(self.index) else {
            return;
        };
        self.view.show_favorite(favorite);
        self.publish(PlayerEvent::FavoriteToggled {
            track_id: self.current_track().id,
            favorite,
        });
    }

    /// Switch theme mode and re-resolve every mode-dependent color
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
        self.view.show_theme(mode);
        self.render_swatches();
        self.view.show_accent(self.accent.colors(mode));
        debug!(target: LOG_TARGET, "Theme set to {}", mode);
        self.publish(PlayerEvent::ThemeChanged { mode });
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn select_color(&mut self, color: AccentColor) {
        self.accent = color;
        self.view.highlight_swatch(color);
        self.view.show_accent(color.colors(self.theme));
        debug!(target: LOG_TARGET, "Accent set to {}", color);
        self.publish(PlayerEvent::AccentChanged { color });
    }

    pub fn transform_artwork(&mut self, transform: ArtworkTransform) {
        self.view.show_artwork_transform(transform);
    }

    // ---------------------------------------------------------------------
    // Media engine notifications
    // ---------------------------------------------------------------------

    fn on_data_loaded(&mut self) {
        self.phase = PlaybackPhase::Ready;
        self.view
            .show_duration(&format_time(self.media.duration()));
        self.play();
    }

    fn on_time_update(&mut self) {
        if self.phase.is_seeking() {
            return;
        }
        let current = self.media.current_time();
        self.view
            .show_progress(playback_percent(current, self.media.duration()));
        self.view.show_elapsed(&format_time(current));
    }

    fn on_ended(&mut self) {
        self.phase = PlaybackPhase::Ended;
        self.view.show_playing(false);
        self.next();
    }

    fn on_volume_changed(&mut self) {
        self.view.show_muted(self.media.volume() <= 0.0);
    }

    fn on_load_error(&mut self, message: String) {
        self.cancel_settle();
        self.phase = PlaybackPhase::LoadFailed;
        let track_id = self.current_track().id;
        let err = CoreError::MediaLoad {
            track_id,
            message: message.clone(),
        };
        error!(target: LOG_TARGET, "{}", err);
        self.publish(PlayerEvent::MediaLoadFailed { track_id, message });
    }

    fn on_play_started(&mut self) {
        if !self.phase.is_seeking() {
            self.phase = PlaybackPhase::Playing;
        }
        self.view.show_playing(true);
        self.publish(PlayerEvent::PlaybackStarted {
            track_id: self.current_track().id,
        });
    }

    fn on_play_rejected(&mut self, reason: String) {
        let track_id = self.current_track().id;
        let err = CoreError::PlayRejected {
            track_id,
            reason: reason.clone(),
        };
        warn!(target: LOG_TARGET, "{}", err);

        if self.phase.has_media() && !self.phase.is_seeking() {
            self.phase = PlaybackPhase::Paused;
        }
        self.view.show_playing(false);
        self.publish(PlayerEvent::PlayRejected { track_id, reason });
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn render_current_track(&mut self) {
        let track = &self.playlist.tracks()[self.index];
        self.view.show_track(track);
        self.view.highlight_track(track.id);
        self.view.show_favorite(track.favorite);
        self.view.show_progress(0);
        self.view.show_elapsed(ZERO_TIME);
        self.view.show_duration(ZERO_TIME);
    }

    fn render_swatches(&mut self) {
        for color in AccentColor::ALL {
            self.view.show_swatch(color, color.colors(self.theme).primary);
        }
    }

    fn load_current(&mut self) {
        let source = self.playlist.tracks()[self.index].audio_url.clone();
        self.media.load(&source);
        self.phase = PlaybackPhase::Loading;
    }

    fn publish(&self, event: PlayerEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

use crate::palette::{AccentColor, ThemeMode};

/// Events published by the playback controller for diagnostics and observers
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The current track index changed
    TrackChanged {
        index: usize,
        track_id: u32,
    },
    /// The engine confirmed playback started
    PlaybackStarted {
        track_id: u32,
    },
    /// Playback was paused by the user
    PlaybackPaused {
        track_id: u32,
    },
    /// The engine refused a play request
    PlayRejected {
        track_id: u32,
        reason: String,
    },
    /// The current track's audio failed to load
    MediaLoadFailed {
        track_id: u32,
        message: String,
    },
    /// A skip jumped to `target` and is waiting to resume
    SeekScheduled {
        target: f64,
    },
    /// The pending skip settled and playback is resuming
    SeekSettled {
        target: f64,
    },
    ThemeChanged {
        mode: ThemeMode,
    },
    AccentChanged {
        color: AccentColor,
    },
    FavoriteToggled {
        track_id: u32,
        favorite: bool,
    },
}

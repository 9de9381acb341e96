//! Media engine seam.

/// Playback engine driven by the controller (an `<audio>` element in browsers).
///
/// Implementations execute requests; the controller stays the source of truth
/// for the current track index and transport status. Engines should:
///
/// - Report `NaN` from [`duration`](MediaEngine::duration) until a source has loaded
/// - Deliver the outcome of [`request_play`](MediaEngine::request_play) later, as
///   [`MediaEvent::PlayStarted`] or [`MediaEvent::PlayRejected`]
/// - Never deliver an event re-entrantly from inside one of these calls
pub trait MediaEngine {
    /// Start loading a new audio source, replacing the current one.
    fn load(&mut self, source_url: &str);

    /// Ask the engine to start playback. The request may be refused.
    fn request_play(&mut self);

    /// Stop playback synchronously.
    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Track duration in seconds; `NaN` before data has loaded.
    fn duration(&self) -> f64;

    /// Normalized volume in `[0, 1]`; zero means muted.
    fn volume(&self) -> f64;

    fn set_volume(&mut self, level: f64);
}

/// Notifications emitted by the media engine, in engine order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The current source's data (and duration) is available
    DataLoaded,
    /// Playback position advanced
    TimeUpdate,
    /// Playback reached the end of the track
    Ended,
    /// Engine volume changed
    VolumeChanged,
    /// The current source could not be loaded
    LoadError { message: String },
    /// A play request succeeded
    PlayStarted,
    /// A play request was refused (e.g. no prior user gesture)
    PlayRejected { reason: String },
}

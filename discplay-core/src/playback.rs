/// Lifecycle of the current track as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Nothing loaded yet
    #[default]
    Idle,
    /// A source was handed to the engine and has not reported data yet
    Loading,
    /// Data loaded; a play request is outstanding
    Ready,
    Playing,
    Paused,
    /// Skip in progress: time display frozen until the settle timer fires
    Seeking,
    /// Playback reached the end of the track
    Ended,
    /// The engine could not load the current source
    LoadFailed,
}

/// Coarse transport status shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Nothing has started yet, or the track finished
    Stopped,
    Playing,
    Paused,
    Seeking,
}

impl PlaybackPhase {
    #[must_use]
    pub const fn transport(self) -> Transport {
        match self {
            Self::Idle | Self::Loading | Self::Ready | Self::Ended | Self::LoadFailed => {
                Transport::Stopped
            }
            Self::Playing => Transport::Playing,
            Self::Paused => Transport::Paused,
            Self::Seeking => Transport::Seeking,
        }
    }

    /// Whether a source has loaded far enough for pause to be meaningful
    #[must_use]
    pub const fn has_media(self) -> bool {
        !matches!(self, Self::Idle | Self::Loading | Self::LoadFailed)
    }

    #[must_use]
    pub const fn is_seeking(self) -> bool {
        matches!(self, Self::Seeking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase() {
        assert_eq!(PlaybackPhase::default(), PlaybackPhase::Idle);
        assert_eq!(PlaybackPhase::Idle.transport(), Transport::Stopped);
    }

    #[test]
    fn test_transport_mapping() {
        assert_eq!(PlaybackPhase::Playing.transport(), Transport::Playing);
        assert_eq!(PlaybackPhase::Paused.transport(), Transport::Paused);
        assert_eq!(PlaybackPhase::Seeking.transport(), Transport::Seeking);
        assert_eq!(PlaybackPhase::Ended.transport(), Transport::Stopped);
        assert_eq!(PlaybackPhase::LoadFailed.transport(), Transport::Stopped);
    }

    #[test]
    fn test_has_media() {
        assert!(!PlaybackPhase::Loading.has_media());
        assert!(!PlaybackPhase::LoadFailed.has_media());
        assert!(PlaybackPhase::Ready.has_media());
        assert!(PlaybackPhase::Seeking.has_media());
    }
}

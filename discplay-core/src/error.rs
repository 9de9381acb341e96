use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Playlist errors
    #[error("Failed to parse playlist: {0}")]
    PlaylistParseError(#[from] serde_json::Error),

    #[error("Playlist must contain at least one track")]
    EmptyPlaylist,

    #[error("Duplicate track id {id} in playlist")]
    DuplicateTrackId { id: u32 },

    #[error("Unknown accent color: {name}")]
    UnknownColor { name: String },

    // Asset and media errors
    #[error("Failed to load artwork from {url}")]
    ArtworkLoad { url: String },

    #[error("Failed to load audio for track {track_id}: {message}")]
    MediaLoad { track_id: u32, message: String },

    #[error("Play request rejected for track {track_id}: {reason}")]
    PlayRejected { track_id: u32, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;

pub mod artwork;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod input;
pub mod media;
pub mod palette;
pub mod playback;
pub mod player;
pub mod playlist;
pub mod progress;
#[cfg(feature = "runtime")]
pub mod runtime;
pub mod settle;
pub mod time;
pub mod view;

#[cfg(test)]
mod testing;

pub use artwork::{artwork_error, preload_artwork, ArtworkLoader};
pub use config::{PlayerConfig, CONFIG_TEMPLATE};
pub use controller::PlayerController;
pub use error::{CoreError, Result};
pub use events::PlayerEvent;
pub use input::{
    ControlGeometry, FixedGeometry, FlushTimer, InputRouter, PlayerCommand, PlayerInput,
    ScrollAdmission, ScrollThrottle, UiEvent, UiRegion,
};
pub use media::{MediaEngine, MediaEvent};
pub use palette::{AccentColor, AccentPair, ThemeMode};
pub use playback::{PlaybackPhase, Transport};
pub use player::Player;
pub use playlist::{Playlist, Track};
pub use progress::{map_pointer, playback_percent, MappedPosition, PointerPosition};
#[cfg(feature = "runtime")]
pub use runtime::{channel, PlayerHandle, PlayerInbox, PlayerRuntime, TokioTimer};
pub use settle::{SettleSlot, SettleTicket, SettleTimer};
pub use time::{format_time, MillisExt, ZERO_TIME};
pub use view::{ArtworkTransform, ViewModel, ViewSink};

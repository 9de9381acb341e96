mod artwork;
mod dom;
mod error;
mod events;
mod geometry;
mod inbox;
mod logging;
mod markup;
mod media;
mod timer;
mod view;

use crate::artwork::ImageLoader;
use crate::error::{Result, WebError};
use crate::geometry::DomGeometry;
use crate::inbox::Inbox;
use crate::markup::selector;
use crate::media::AudioEngine;
use crate::timer::GlooTimer;
use crate::view::DomView;
use discplay_core::{
    preload_artwork, CoreError, InputRouter, Player, PlayerConfig, PlayerController, PlayerEvent,
    Playlist, ThemeMode,
};
use std::rc::Rc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlAudioElement;

const CONFIG: &str = include_str!("../assets/discplay.toml");
const SONGS: &str = include_str!("../assets/songs.json");

fn main() {
    let config = PlayerConfig::from_toml_str(CONFIG);
    logging::init(config.as_ref().map_or("info", |config| config.log_level.as_str()));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return;
        }
    };
    info!(
        "Loaded player config (skip {}s, settle {}ms)",
        config.skip_seconds, config.seek_settle_ms
    );

    spawn_local(async move {
        if let Err(e) = run(config).await {
            error!("Player failed to start: {e}");
        }
    });
}

async fn run(config: PlayerConfig) -> Result<()> {
    let window = dom::window()?;
    let document = window.document().ok_or(WebError::NoDocument)?;

    let playlist = Playlist::from_json(SONGS)?;
    info!("Loaded playlist with {} tracks", playlist.len());

    // Nothing renders until every image is available
    preload_artwork(&ImageLoader, &playlist).await?;

    let first = playlist.get(0).ok_or(CoreError::EmptyPlaylist)?;
    dom::query(&document, selector::ROOT)?
        .set_inner_html(&markup::render_player(&playlist, first));

    let theme = ThemeMode::from_prefers_dark(dom::prefers_dark(&window));
    let audio: HtmlAudioElement = dom::query_as(&document, selector::AUDIO)?;
    let inbox = Inbox::new();

    let view = DomView::collect(&document, &playlist)?;
    let geometry = DomGeometry::collect(&document)?;
    let media = AudioEngine::new(audio.clone(), Rc::downgrade(&inbox));
    let timer = GlooTimer::new(Rc::downgrade(&inbox));

    let controller = PlayerController::new(playlist, &config, theme, media, view, timer);
    spawn_local(log_player_events(controller.subscribe()));

    inbox.install(Player::new(controller, InputRouter::new(geometry, &config)));
    events::bind(&window, &document, &audio, &inbox)?;
    inbox.start();

    info!("Player ready");
    Ok(())
}

/// Log player events
async fn log_player_events(mut rx: broadcast::Receiver<PlayerEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => match event {
                PlayerEvent::TrackChanged { index, track_id } => {
                    debug!("Track changed: #{} (index {})", track_id, index);
                }
                PlayerEvent::PlaybackStarted { track_id } => {
                    info!("Playback started: #{}", track_id);
                }
                PlayerEvent::PlaybackPaused { track_id } => {
                    info!("Playback paused: #{}", track_id);
                }
                PlayerEvent::PlayRejected { .. } | PlayerEvent::MediaLoadFailed { .. } => {
                    // Already logged by the controller
                }
                PlayerEvent::SeekScheduled { target } => {
                    debug!("Seek scheduled to {:.1}s", target);
                }
                PlayerEvent::SeekSettled { target } => {
                    debug!("Seek settled at {:.1}s", target);
                }
                PlayerEvent::ThemeChanged { mode } => {
                    info!("Theme changed to {}", mode);
                }
                PlayerEvent::AccentChanged { color } => {
                    info!("Accent changed to {}", color);
                }
                PlayerEvent::FavoriteToggled { track_id, favorite } => {
                    info!("Favorite for #{}: {}", track_id, favorite);
                }
            },
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!("Player event logger lagged by {} messages", n);
            }
            Err(broadcast::error::RecvError::Closed) => {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_is_valid() {
        let config = PlayerConfig::from_toml_str(CONFIG).unwrap();
        assert_eq!(config.seek_settle_ms, 300);
        assert!(config.log_level.starts_with("info"));
    }

    #[test]
    fn test_bundled_playlist_is_valid() {
        let playlist = Playlist::from_json(SONGS).unwrap();
        assert_eq!(playlist.len(), 5);
        assert!(playlist.get(1).unwrap().favorite);
    }
}

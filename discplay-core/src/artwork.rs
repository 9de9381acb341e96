//! Artwork preloading.
//!
//! Every track's artwork must resolve before the player renders; a single
//! failure aborts startup.

use crate::error::{CoreError, Result};
use crate::playlist::Playlist;
use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{error, info};

/// Fetches one image so it is ready to display
#[async_trait(?Send)]
pub trait ArtworkLoader {
    /// # Errors
    ///
    /// Returns [`CoreError::ArtworkLoad`] if the image cannot be loaded.
    async fn load(&self, url: &str) -> Result<()>;
}

/// Load every track's artwork concurrently.
///
/// # Errors
///
/// Returns the first [`CoreError::ArtworkLoad`] encountered.
pub async fn preload_artwork<L>(loader: &L, playlist: &Playlist) -> Result<()>
where
    L: ArtworkLoader + ?Sized,
{
    let loads = playlist
        .tracks()
        .iter()
        .map(|track| loader.load(&track.artwork_url));

    match try_join_all(loads).await {
        Ok(loaded) => {
            info!("Preloaded {} artwork images", loaded.len());
            Ok(())
        }
        Err(err) => {
            error!("Artwork preload failed: {}", err);
            Err(err)
        }
    }
}

/// Build the error a loader reports for `url`
pub fn artwork_error(url: &str) -> CoreError {
    CoreError::ArtworkLoad {
        url: url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_playlist;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLoader {
        fail_on: Option<&'static str>,
        requested: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl ArtworkLoader for RecordingLoader {
        async fn load(&self, url: &str) -> Result<()> {
            self.requested.borrow_mut().push(url.to_string());
            if self.fail_on == Some(url) {
                return Err(artwork_error(url));
            }
            Ok(())
        }
    }

    #[test]
    fn test_preload_requests_every_image() {
        let loader = RecordingLoader::default();
        let playlist = sample_playlist(3);

        block_on(preload_artwork(&loader, &playlist)).unwrap();

        let mut requested = loader.requested.borrow().clone();
        requested.sort();
        assert_eq!(requested, vec!["/img/1.jpg", "/img/2.jpg", "/img/3.jpg"]);
    }

    #[test]
    fn test_preload_fails_on_any_image() {
        let loader = RecordingLoader {
            fail_on: Some("/img/2.jpg"),
            ..Default::default()
        };
        let playlist = sample_playlist(3);

        let err = block_on(preload_artwork(&loader, &playlist)).unwrap_err();
        assert!(matches!(err, CoreError::ArtworkLoad { ref url } if url == "/img/2.jpg"));
    }
}

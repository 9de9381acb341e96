use async_trait::async_trait;
use discplay_core::{artwork_error, ArtworkLoader};
use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// Loads artwork through detached `<img>` elements
pub struct ImageLoader;

#[async_trait(?Send)]
impl ArtworkLoader for ImageLoader {
    async fn load(&self, url: &str) -> discplay_core::Result<()> {
        let image = HtmlImageElement::new().map_err(|_| artwork_error(url))?;
        let loaded = Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(url);

        let result = JsFuture::from(loaded).await;
        image.set_onload(None);
        image.set_onerror(None);
        result.map(|_| ()).map_err(|_| artwork_error(url))
    }
}

//! Typed element lookup.

use crate::error::{Result, WebError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(WebError::NoWindow)
}

/// First element matching `selector`
pub fn query(parent: &Document, selector: &str) -> Result<Element> {
    parent
        .query_selector(selector)?
        .ok_or_else(|| WebError::MissingElement {
            selector: selector.to_string(),
        })
}

/// First element matching `selector`, cast to `T`
pub fn query_as<T: JsCast>(parent: &Document, selector: &str) -> Result<T> {
    query(parent, selector)?
        .dyn_into::<T>()
        .map_err(|_| WebError::WrongElementType {
            selector: selector.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

/// Whether the host prefers a dark color scheme
pub fn prefers_dark(window: &Window) -> bool {
    window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

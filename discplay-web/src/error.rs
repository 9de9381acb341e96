use discplay_core::CoreError;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Browser window is not available")]
    NoWindow,

    #[error("Document is not available")]
    NoDocument,

    #[error("Missing element {selector:?}")]
    MissingElement { selector: String },

    #[error("Element {selector:?} is not a {expected}")]
    WrongElementType {
        selector: String,
        expected: &'static str,
    },

    #[error("Browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe_js_value(&value))
    }
}

pub type Result<T> = std::result::Result<T, WebError>;

/// Human-readable text for a thrown JS value (`Error`, `DOMException` or anything else)
pub fn describe_js_value(value: &JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

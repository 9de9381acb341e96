use crate::dom::query_as;
use crate::error::Result;
use crate::markup::selector;
use discplay_core::ControlGeometry;
use web_sys::{Document, HtmlElement};

/// Rendered widths of the seekable controls, read on every pointer event
pub struct DomGeometry {
    progress_track: HtmlElement,
    volume_slider: HtmlElement,
}

impl DomGeometry {
    pub fn collect(document: &Document) -> Result<Self> {
        Ok(Self {
            progress_track: query_as(document, selector::PROGRESS_TRACK)?,
            volume_slider: query_as(document, selector::VOLUME_SLIDER)?,
        })
    }
}

impl ControlGeometry for DomGeometry {
    fn progress_track_width(&self) -> f64 {
        f64::from(self.progress_track.client_width())
    }

    fn volume_slider_width(&self) -> f64 {
        f64::from(self.volume_slider.client_width())
    }
}

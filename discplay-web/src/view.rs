//! DOM view sink.
//!
//! Element handles are collected once after the markup is rendered; updates
//! only write attributes, classes, text and style variables.

use crate::dom::{query, query_as};
use crate::error::{Result, WebError};
use crate::markup::selector;
use discplay_core::{
    AccentColor, AccentPair, ArtworkTransform, Playlist, ThemeMode, Track, ViewSink,
};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

const PLAY_ICON: &str = r#"<i class="fa-solid fa-play"></i>"#;
const PAUSE_ICON: &str = r#"<i class="fa-solid fa-pause"></i>"#;
const FAVORITE_ICON: &str = r#"<i class="fa-solid fa-heart"></i>"#;
const NOT_FAVORITE_ICON: &str = r#"<i class="fa-regular fa-heart"></i>"#;
const VOLUME_ICON: &str = r#"<i class="fa-solid fa-volume-high"></i>"#;
const MUTED_ICON: &str = r#"<i class="fa-solid fa-volume-xmark"></i>"#;

pub struct DomView {
    root: HtmlElement,
    theme_switch: Element,
    track_name: HtmlElement,
    cd: HtmlElement,
    cd_wrapper: Element,
    thumbnail: HtmlImageElement,
    play_button: Element,
    progress_track: HtmlElement,
    tooltip: HtmlElement,
    current_time: HtmlElement,
    end_time: HtmlElement,
    favorite_button: Element,
    volume_button: Element,
    volume_slider: HtmlElement,
    swatches: Vec<(AccentColor, HtmlElement)>,
    track_items: Vec<(u32, Element)>,
}

impl DomView {
    pub fn collect(document: &Document, playlist: &Playlist) -> Result<Self> {
        let root = document
            .document_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or(WebError::NoDocument)?;

        let swatches = AccentColor::ALL
            .iter()
            .map(|&color| {
                let swatch = format!(r#"{}[data-color="{color}"]"#, selector::SWATCH);
                query_as::<HtmlElement>(document, &swatch).map(|element| (color, element))
            })
            .collect::<Result<Vec<_>>>()?;

        let track_items = playlist
            .tracks()
            .iter()
            .map(|track| {
                let item = format!(r#"{}[data-id="{}"]"#, selector::TRACK_ITEM, track.id);
                query(document, &item).map(|element| (track.id, element))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            root,
            theme_switch: query(document, selector::THEME_SWITCH)?,
            track_name: query_as(document, selector::TRACK_NAME)?,
            cd: query_as(document, selector::CD)?,
            cd_wrapper: query(document, selector::CD_WRAPPER)?,
            thumbnail: query_as(document, selector::CD_THUMBNAIL)?,
            play_button: query(document, selector::PLAY)?,
            progress_track: query_as(document, selector::PROGRESS_TRACK)?,
            tooltip: query_as(document, selector::PROGRESS_TOOLTIP)?,
            current_time: query_as(document, selector::CURRENT_TIME)?,
            end_time: query_as(document, selector::END_TIME)?,
            favorite_button: query(document, selector::FAVORITE)?,
            volume_button: query(document, selector::VOLUME)?,
            volume_slider: query_as(document, selector::VOLUME_SLIDER)?,
            swatches,
            track_items,
        })
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        warn!("Failed to set {}: {:?}", property, err);
    }
}

fn set_attribute(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        warn!("Failed to set attribute {}: {:?}", name, err);
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        warn!("Failed to toggle class {}: {:?}", class, err);
    }
}

fn percent(value: u8) -> String {
    format!("{value}%")
}

impl ViewSink for DomView {
    fn show_track(&mut self, track: &Track) {
        self.thumbnail.set_src(&track.artwork_url);
        self.thumbnail.set_alt(&track.name);
        self.track_name.set_inner_text(&track.name);
    }

    fn highlight_track(&mut self, track_id: u32) {
        for (id, item) in &self.track_items {
            toggle_class(item, "active", *id == track_id);
        }
    }

    fn show_playing(&mut self, playing: bool) {
        self.play_button
            .set_inner_html(if playing { PAUSE_ICON } else { PLAY_ICON });
        toggle_class(&self.cd_wrapper, "paused", !playing);
    }

    fn show_progress(&mut self, value: u8) {
        let value = percent(value);
        set_style(&self.cd, "--progress", &value);
        set_style(&self.progress_track, "--progress-width", &value);
    }

    fn show_elapsed(&mut self, text: &str) {
        self.current_time.set_inner_text(text);
    }

    fn show_duration(&mut self, text: &str) {
        self.end_time.set_inner_text(text);
    }

    fn show_seek_preview(&mut self, value: u8, text: &str) {
        set_style(&self.tooltip, "--current-left", &percent(value));
        self.tooltip.set_text_content(Some(text));
    }

    fn show_muted(&mut self, muted: bool) {
        self.volume_button
            .set_inner_html(if muted { MUTED_ICON } else { VOLUME_ICON });
    }

    fn show_volume_level(&mut self, value: u8) {
        set_style(&self.volume_slider, "--volume-level", &percent(value));
    }

    fn show_favorite(&mut self, active: bool) {
        toggle_class(&self.favorite_button, "active", active);
        self.favorite_button.set_inner_html(if active {
            FAVORITE_ICON
        } else {
            NOT_FAVORITE_ICON
        });
    }

    fn show_theme(&mut self, mode: ThemeMode) {
        set_attribute(&self.root, "data-theme", mode.as_str());
        set_attribute(&self.theme_switch, "data-state", mode.switch_state());
    }

    fn show_swatch(&mut self, color: AccentColor, primary: &'static str) {
        if let Some((_, swatch)) = self.swatches.iter().find(|(c, _)| *c == color) {
            set_style(swatch, "background-color", primary);
        }
    }

    fn highlight_swatch(&mut self, color: AccentColor) {
        for (c, swatch) in &self.swatches {
            toggle_class(swatch, "active", *c == color);
        }
    }

    fn show_accent(&mut self, colors: AccentPair) {
        set_style(&self.root, "--accent-primary", colors.primary);
        set_style(&self.root, "--accent-secondary", colors.secondary);
    }

    fn show_artwork_transform(&mut self, transform: ArtworkTransform) {
        set_style(&self.cd, "transform", &format!("scale({})", transform.scale));
        set_style(&self.cd, "opacity", &transform.opacity.to_string());
    }
}

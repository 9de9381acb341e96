//! Static player markup.
//!
//! Rendered once at startup; afterwards every change goes through the view
//! sink.

use discplay_core::{AccentColor, Playlist, Track, ZERO_TIME};
use std::fmt::Write;

/// Selectors shared by the view and the event bindings
pub mod selector {
    pub const ROOT: &str = "#app";
    pub const THEME_SWITCH: &str = ".theme__switcher";
    pub const TRACK_NAME: &str = ".player__name";
    pub const CD: &str = ".player__cd";
    pub const CD_WRAPPER: &str = ".player__cd-wrapper";
    pub const CD_THUMBNAIL: &str = ".player__cd-thumbnail";
    pub const PLAY: &str = ".btn--play";
    pub const NEXT: &str = ".btn--next";
    pub const PREVIOUS: &str = ".btn--prev";
    pub const SHUFFLE: &str = ".btn--shuffle";
    pub const REPLAY: &str = ".btn--replay";
    pub const SKIP_FORWARD: &str = ".btn--skip-forward";
    pub const SKIP_BACKWARD: &str = ".btn--skip-backward";
    pub const FAVORITE: &str = ".btn--favorite";
    pub const VOLUME: &str = ".btn--volume";
    pub const VOLUME_SLIDER: &str = ".player__volume-track";
    pub const PROGRESS_TRACK: &str = ".player__progress-track";
    pub const PROGRESS_TOOLTIP: &str = ".player__progress-track-tooltip";
    pub const CURRENT_TIME: &str = ".progress__current-time";
    pub const END_TIME: &str = ".progress__end-time";
    pub const COLOR_PICKER: &str = ".color-picker";
    pub const SWATCH: &str = ".color-picker__swatch";
    pub const TRACK_LIST: &str = ".track-list";
    pub const TRACK_ITEM: &str = ".track-item";
    pub const AUDIO: &str = ".player__audio";
}

/// Full player markup with `current` shown as now playing
pub fn render_player(playlist: &Playlist, current: &Track) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(r#"<div id="music-player">"#);
    html.push_str(
        r#"<header class="theme"><button class="theme__switcher" data-state="unchecked" aria-label="Toggle theme"></button></header>"#,
    );
    html.push_str(r#"<div class="player">"#);
    render_current_track(&mut html, current);
    html.push_str(CONTROLS);
    render_progress(&mut html);
    html.push_str(ACTIONS);
    render_color_picker(&mut html);
    html.push_str("</div>");
    render_track_list(&mut html, playlist);
    html.push_str(r#"<audio class="player__audio" preload="auto"></audio>"#);
    html.push_str("</div>");
    html
}

fn render_current_track(html: &mut String, track: &Track) {
    let name = escape(&track.name);
    let artwork = escape(&track.artwork_url);
    let _ = write!(
        html,
        r#"<div class="player__detail"><p class="player__playing">Now playing:</p><h3 class="player__name">{name}</h3></div><div class="player__cd"><div class="player__cd-wrapper paused"><img src="{artwork}" alt="{name}" class="player__cd-thumbnail"/></div></div>"#
    );
}

const CONTROLS: &str = concat!(
    r#"<div class="player__controls">"#,
    r#"<button class="btn btn--replay"><i class="fa-solid fa-arrow-rotate-left"></i></button>"#,
    r#"<button class="btn btn--prev"><i class="fa-solid fa-backward-step"></i></button>"#,
    r#"<button class="btn btn--play"><i class="fa-solid fa-play"></i></button>"#,
    r#"<button class="btn btn--next"><i class="fa-solid fa-forward-step"></i></button>"#,
    r#"<button class="btn btn--shuffle"><i class="fa-solid fa-shuffle"></i></button>"#,
    "</div>",
);

fn render_progress(html: &mut String) {
    let _ = write!(
        html,
        r#"<div class="player__progress"><div class="player__progress-time progress__current-time">{ZERO_TIME}</div><div class="player__progress-track"><div class="player__progress-track-fill"></div><div class="player__progress-track-tooltip">{ZERO_TIME}</div></div><div class="player__progress-time progress__end-time">{ZERO_TIME}</div></div>"#
    );
}

const ACTIONS: &str = concat!(
    r#"<div class="player__audio-actions">"#,
    r#"<button class="btn btn--favorite"><i class="fa-regular fa-heart"></i></button>"#,
    r#"<button class="btn btn--skip-backward"><i class="fa-solid fa-arrow-rotate-left"></i></button>"#,
    r#"<button class="btn btn--volume"><i class="fa-solid fa-volume-high"></i></button>"#,
    r#"<div class="player__volume-track"><div class="player__volume-track-fill"></div></div>"#,
    r#"<button class="btn btn--skip-forward"><i class="fa-solid fa-arrow-rotate-right"></i></button>"#,
    "</div>",
);

fn render_color_picker(html: &mut String) {
    html.push_str(r#"<div class="color-picker">"#);
    for color in AccentColor::ALL {
        let _ = write!(
            html,
            r#"<button class="color-picker__swatch" data-color="{color}" aria-label="{color}"></button>"#
        );
    }
    html.push_str("</div>");
}

fn render_track_list(html: &mut String, playlist: &Playlist) {
    html.push_str(r#"<div class="track-list">"#);
    for track in playlist.tracks() {
        let name = escape(&track.name);
        let _ = write!(
            html,
            r#"<div class="track-item" data-id="{id}"><img src="{artwork}" alt="{name}" class="track-item__thumbnail"/><div class="track-item__detail"><h3 class="track-item__name">{name}</h3><p class="track-item__artist">{artist}</p></div></div>"#,
            id = track.id,
            artwork = escape(&track.artwork_url),
            artist = escape(&track.artist),
        );
    }
    html.push_str("</div>");
}

/// Escape text for use inside element content and quoted attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist() -> Playlist {
        Playlist::new(vec![
            Track::new(7, "Rock & Roll", "The <Band>", "/img/7.jpg", "/audio/7.mp3"),
            Track::new(9, "Quiet", "Solo", "/img/9.jpg", "/audio/9.mp3"),
        ])
        .unwrap()
    }

    #[test]
    fn test_track_items_carry_ids() {
        let playlist = playlist();
        let html = render_player(&playlist, &playlist.tracks()[0]);

        assert_eq!(html.matches(r#"class="track-item""#).count(), 2);
        assert!(html.contains(r#"data-id="7""#));
        assert!(html.contains(r#"data-id="9""#));
    }

    #[test]
    fn test_renders_every_swatch() {
        let playlist = playlist();
        let html = render_player(&playlist, &playlist.tracks()[1]);

        assert_eq!(html.matches("color-picker__swatch").count(), AccentColor::ALL.len());
        assert!(html.contains(r#"data-color="rose""#));
        assert!(html.contains(r#"data-color="violet""#));
    }

    #[test]
    fn test_text_is_escaped() {
        let playlist = playlist();
        let html = render_player(&playlist, &playlist.tracks()[0]);

        assert!(html.contains("Rock &amp; Roll"));
        assert!(html.contains("The &lt;Band&gt;"));
        assert!(!html.contains("<Band>"));
    }

    #[test]
    fn test_now_playing_uses_current_track() {
        let playlist = playlist();
        let html = render_player(&playlist, &playlist.tracks()[1]);
        assert!(html.contains(r#"<h3 class="player__name">Quiet</h3>"#));
    }
}

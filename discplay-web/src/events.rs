//! DOM and media listeners feeding the inbox.

use crate::dom::query;
use crate::error::Result;
use crate::inbox::Inbox;
use crate::markup::selector;
use crate::media::load_error_message;
use discplay_core::{AccentColor, MediaEvent, PlayerInput, UiEvent, UiRegion};
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlAudioElement, MouseEvent, Window};

const CLICK_TARGETS: [(&str, UiRegion); 11] = [
    (selector::PLAY, UiRegion::PlayButton),
    (selector::NEXT, UiRegion::NextButton),
    (selector::PREVIOUS, UiRegion::PreviousButton),
    (selector::SHUFFLE, UiRegion::ShuffleButton),
    (selector::REPLAY, UiRegion::ReplayButton),
    (selector::SKIP_FORWARD, UiRegion::SkipForwardButton),
    (selector::SKIP_BACKWARD, UiRegion::SkipBackwardButton),
    (selector::FAVORITE, UiRegion::FavoriteButton),
    (selector::VOLUME, UiRegion::VolumeButton),
    (selector::THEME_SWITCH, UiRegion::ThemeSwitch),
    (selector::PROGRESS_TRACK, UiRegion::ProgressTrack),
];

/// Attach every listener. Listeners stay registered for the page's lifetime.
pub fn bind(
    window: &Window,
    document: &Document,
    audio: &HtmlAudioElement,
    inbox: &Rc<Inbox>,
) -> Result<()> {
    for (target, region) in CLICK_TARGETS {
        let element = query(document, target)?;
        let inbox = Rc::clone(inbox);
        listen(&element, "click", move |event| {
            let offset_x = mouse_offset(&event);
            inbox.post(PlayerInput::Ui(UiEvent::click_at(region.clone(), offset_x)));
        })?;
    }

    bind_pointer_moves(document, selector::PROGRESS_TRACK, UiRegion::ProgressTrack, inbox)?;
    bind_volume_slider(document, inbox)?;
    bind_color_picker(document, inbox)?;
    bind_track_list(document, inbox)?;
    bind_scroll(window, inbox)?;
    bind_audio(audio, inbox)
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn mouse_offset(event: &Event) -> f64 {
    event
        .dyn_ref::<MouseEvent>()
        .map_or(0.0, |mouse| f64::from(mouse.offset_x()))
}

fn primary_pressed(event: &Event) -> bool {
    event
        .dyn_ref::<MouseEvent>()
        .is_some_and(|mouse| mouse.buttons() & 1 != 0)
}

fn bind_pointer_moves(
    document: &Document,
    control: &str,
    region: UiRegion,
    inbox: &Rc<Inbox>,
) -> Result<()> {
    let element = query(document, control)?;
    let inbox = Rc::clone(inbox);
    listen(&element, "mousemove", move |event| {
        let offset_x = mouse_offset(&event);
        let input = if primary_pressed(&event) {
            UiEvent::drag(region.clone(), offset_x)
        } else {
            UiEvent::hover(region.clone(), offset_x)
        };
        inbox.post(PlayerInput::Ui(input));
    })
}

fn bind_volume_slider(document: &Document, inbox: &Rc<Inbox>) -> Result<()> {
    let slider = query(document, selector::VOLUME_SLIDER)?;
    let click_inbox = Rc::clone(inbox);
    listen(&slider, "click", move |event| {
        let offset_x = mouse_offset(&event);
        click_inbox.post(PlayerInput::Ui(UiEvent::click_at(
            UiRegion::VolumeSlider,
            offset_x,
        )));
    })?;
    bind_pointer_moves(document, selector::VOLUME_SLIDER, UiRegion::VolumeSlider, inbox)
}

/// Closest ancestor of the event target matching `selector`
fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

fn bind_color_picker(document: &Document, inbox: &Rc<Inbox>) -> Result<()> {
    let picker = query(document, selector::COLOR_PICKER)?;
    let inbox = Rc::clone(inbox);
    listen(&picker, "click", move |event| {
        let Some(swatch) = closest(&event, selector::SWATCH) else {
            return;
        };
        let Some(name) = swatch.get_attribute("data-color") else {
            return;
        };
        match name.parse::<AccentColor>() {
            Ok(color) => inbox.post(PlayerInput::Ui(UiEvent::click(UiRegion::ColorSwatch(
                color,
            )))),
            Err(err) => debug!("Ignoring swatch click: {}", err),
        }
    })
}

fn bind_track_list(document: &Document, inbox: &Rc<Inbox>) -> Result<()> {
    let list = query(document, selector::TRACK_LIST)?;
    let inbox = Rc::clone(inbox);
    listen(&list, "click", move |event| {
        let Some(item) = closest(&event, selector::TRACK_ITEM) else {
            return;
        };
        event.stop_propagation();
        let data_id = item.get_attribute("data-id");
        inbox.post(PlayerInput::Ui(UiEvent::click(UiRegion::TrackItem { data_id })));
    })
}

fn bind_scroll(window: &Window, inbox: &Rc<Inbox>) -> Result<()> {
    let inbox = Rc::clone(inbox);
    let scrolled = window.clone();
    listen(window, "scroll", move |event| {
        let offset_y = scrolled.scroll_y().unwrap_or(0.0);
        let timestamp =
            Duration::try_from_secs_f64(event.time_stamp() / 1000.0).unwrap_or_default();
        inbox.post(PlayerInput::Ui(UiEvent::scroll(offset_y, timestamp)));
    })
}

fn bind_audio(audio: &HtmlAudioElement, inbox: &Rc<Inbox>) -> Result<()> {
    let events: [(&str, MediaEvent); 4] = [
        ("loadeddata", MediaEvent::DataLoaded),
        ("timeupdate", MediaEvent::TimeUpdate),
        ("ended", MediaEvent::Ended),
        ("volumechange", MediaEvent::VolumeChanged),
    ];
    for (kind, media_event) in events {
        let inbox = Rc::clone(inbox);
        listen(audio, kind, move |_| {
            inbox.post(PlayerInput::Media(media_event.clone()));
        })?;
    }

    let inbox = Rc::clone(inbox);
    let failed = audio.clone();
    listen(audio, "error", move |_| {
        let message = load_error_message(&failed);
        inbox.post(PlayerInput::Media(MediaEvent::LoadError { message }));
    })
}

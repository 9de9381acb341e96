use crate::error::describe_js_value;
use crate::inbox::Inbox;
use discplay_core::{MediaEngine, MediaEvent, PlayerInput};
use std::rc::Weak;
use tracing::warn;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

/// [`MediaEngine`] backed by an `<audio>` element
pub struct AudioEngine {
    audio: HtmlAudioElement,
    inbox: Weak<Inbox>,
}

impl AudioEngine {
    pub const fn new(audio: HtmlAudioElement, inbox: Weak<Inbox>) -> Self {
        Self { audio, inbox }
    }
}

fn post(inbox: &Weak<Inbox>, event: MediaEvent) {
    if let Some(inbox) = inbox.upgrade() {
        inbox.post(PlayerInput::Media(event));
    }
}

impl MediaEngine for AudioEngine {
    fn load(&mut self, source_url: &str) {
        self.audio.set_src(source_url);
        self.audio.load();
    }

    fn request_play(&mut self) {
        let inbox = self.inbox.clone();
        match self.audio.play() {
            Ok(promise) => spawn_local(async move {
                let event = match JsFuture::from(promise).await {
                    Ok(_) => MediaEvent::PlayStarted,
                    Err(err) => MediaEvent::PlayRejected {
                        reason: describe_js_value(&err),
                    },
                };
                post(&inbox, event);
            }),
            // Still delivered asynchronously
            Err(err) => {
                let reason = describe_js_value(&err);
                spawn_local(async move {
                    post(&inbox, MediaEvent::PlayRejected { reason });
                });
            }
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            warn!("Pause failed: {}", describe_js_value(&err));
        }
    }

    fn is_paused(&self) -> bool {
        self.audio.paused()
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn volume(&self) -> f64 {
        self.audio.volume()
    }

    fn set_volume(&mut self, level: f64) {
        self.audio.set_volume(level.clamp(0.0, 1.0));
    }
}

/// Describe the element's current load error
pub fn load_error_message(audio: &HtmlAudioElement) -> String {
    match audio.error() {
        Some(error) => format!("media error code {}", error.code()),
        None => "unknown media error".to_string(),
    }
}

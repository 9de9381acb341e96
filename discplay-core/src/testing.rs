//! Recording fakes shared by unit tests.

use crate::media::MediaEngine;
use crate::playlist::{Playlist, Track};
use crate::input::FlushTimer;
use crate::settle::{SettleTicket, SettleTimer};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Load(String),
    RequestPlay,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f64),
}

/// Media engine that records every call and behaves like an idle `<audio>`.
#[derive(Debug)]
pub struct FakeMedia {
    pub calls: Vec<MediaCall>,
    pub source: Option<String>,
    pub paused: bool,
    pub current_time: f64,
    pub duration: f64,
    /// Duration reported once a source is loaded
    pub source_duration: f64,
    pub volume: f64,
}

impl Default for FakeMedia {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            source: None,
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            source_duration: f64::NAN,
            volume: 1.0,
        }
    }
}

impl FakeMedia {
    pub fn with_source_duration(duration: f64) -> Self {
        Self {
            source_duration: duration,
            ..Self::default()
        }
    }

    pub fn play_requests(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == MediaCall::RequestPlay)
            .count()
    }

    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                MediaCall::Load(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl MediaEngine for FakeMedia {
    fn load(&mut self, source_url: &str) {
        self.calls.push(MediaCall::Load(source_url.to_string()));
        self.source = Some(source_url.to_string());
        self.paused = true;
        self.current_time = 0.0;
        self.duration = self.source_duration;
    }

    fn request_play(&mut self) {
        self.calls.push(MediaCall::RequestPlay);
        self.paused = false;
    }

    fn pause(&mut self) {
        self.calls.push(MediaCall::Pause);
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.calls.push(MediaCall::SetCurrentTime(seconds));
        self.current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, level: f64) {
        self.calls.push(MediaCall::SetVolume(level));
        self.volume = level;
    }
}

/// Timer that records requests without ever firing.
#[derive(Debug, Default)]
pub struct FakeTimer {
    pub scheduled: Vec<(SettleTicket, Duration)>,
    pub cancelled: Vec<SettleTicket>,
    pub flushes: Vec<Duration>,
}

impl SettleTimer for FakeTimer {
    fn schedule(&mut self, ticket: SettleTicket, delay: Duration) {
        self.scheduled.push((ticket, delay));
    }

    fn cancel(&mut self, ticket: SettleTicket) {
        self.cancelled.push(ticket);
    }
}

impl FlushTimer for FakeTimer {
    fn schedule_flush(&mut self, delay: Duration) {
        self.flushes.push(delay);
    }
}

pub fn sample_playlist(count: u32) -> Playlist {
    let tracks = (1..=count)
        .map(|id| {
            Track::new(
                id,
                format!("Track {id}"),
                "Artist",
                format!("/img/{id}.jpg"),
                format!("/audio/{id}.mp3"),
            )
        })
        .collect();
    Playlist::new(tracks).unwrap()
}

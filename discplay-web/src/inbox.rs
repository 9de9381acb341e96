//! Ordered input queue for the browser event loop.
//!
//! Every listener, play-promise continuation and timer posts here. Inputs
//! posted while another input is being handled are queued and drained by
//! the outer call, so handlers never nest.

use crate::geometry::DomGeometry;
use crate::media::AudioEngine;
use crate::timer::GlooTimer;
use crate::view::DomView;
use discplay_core::{Player, PlayerInput};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub type WebPlayer = Player<AudioEngine, DomView, GlooTimer, DomGeometry>;

#[derive(Default)]
pub struct Inbox {
    player: RefCell<Option<WebPlayer>>,
    queue: RefCell<VecDeque<PlayerInput>>,
}

impl Inbox {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn install(&self, player: WebPlayer) {
        *self.player.borrow_mut() = Some(player);
    }

    /// Render the player, load the first track, then handle anything queued
    pub fn start(&self) {
        if let Ok(mut slot) = self.player.try_borrow_mut() {
            if let Some(player) = slot.as_mut() {
                player.start();
            }
        }
        self.drain();
    }

    pub fn post(&self, input: PlayerInput) {
        self.queue.borrow_mut().push_back(input);
        self.drain();
    }

    fn drain(&self) {
        // Already draining further up the stack
        let Ok(mut slot) = self.player.try_borrow_mut() else {
            return;
        };
        let Some(player) = slot.as_mut() else {
            return;
        };
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(input) = next else {
                break;
            };
            player.handle(input);
        }
    }
}

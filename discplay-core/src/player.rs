use crate::controller::PlayerController;
use crate::input::{ControlGeometry, FlushTimer, InputRouter, PlayerInput, UiEvent};
use crate::media::MediaEngine;
use crate::settle::SettleTimer;
use crate::view::ViewSink;

/// Controller plus input router: the unit every host drives.
///
/// Inputs must be fed one at a time in arrival order; each runs to
/// completion before the next.
pub struct Player<M, V, T, G> {
    controller: PlayerController<M, V, T>,
    router: InputRouter<G>,
}

impl<M, V, T, G> Player<M, V, T, G>
where
    M: MediaEngine,
    V: ViewSink,
    T: SettleTimer + FlushTimer,
    G: ControlGeometry,
{
    pub const fn new(controller: PlayerController<M, V, T>, router: InputRouter<G>) -> Self {
        Self { controller, router }
    }

    pub fn start(&mut self) {
        self.controller.start();
    }

    pub fn handle(&mut self, input: PlayerInput) {
        match input {
            PlayerInput::Ui(event) => self.handle_ui(&event),
            PlayerInput::Command(command) => self.controller.dispatch(command),
            PlayerInput::Media(event) => self.controller.handle_media_event(event),
            PlayerInput::SettleElapsed(ticket) => self.controller.on_settle_elapsed(ticket),
            PlayerInput::ScrollFlush => {
                if let Some(command) = self.router.flush_scroll() {
                    self.controller.dispatch(command);
                }
            }
        }
    }

    fn handle_ui(&mut self, event: &UiEvent) {
        let command = self.router.route(
            event,
            self.controller.playlist(),
            self.controller.current_index(),
        );
        if let Some(delay) = self.router.take_flush_request() {
            self.controller.timer_mut().schedule_flush(delay);
        }
        if let Some(command) = command {
            self.controller.dispatch(command);
        }
    }

    pub const fn controller(&self) -> &PlayerController<M, V, T> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlayerController<M, V, T> {
        &mut self.controller
    }

    pub fn into_controller(self) -> PlayerController<M, V, T> {
        self.controller
    }
}

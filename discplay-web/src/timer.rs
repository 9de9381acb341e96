use crate::inbox::Inbox;
use discplay_core::{FlushTimer, PlayerInput, SettleTicket, SettleTimer};
use gloo_timers::callback::Timeout;
use std::rc::Weak;
use std::time::Duration;

/// Settle and scroll-flush timer backed by `setTimeout`.
///
/// At most one settle and one flush are pending at a time, so a slot each is
/// enough. Dropping a [`Timeout`] clears it.
pub struct GlooTimer {
    inbox: Weak<Inbox>,
    pending: Option<(SettleTicket, Timeout)>,
    flush: Option<Timeout>,
}

impl GlooTimer {
    pub const fn new(inbox: Weak<Inbox>) -> Self {
        Self {
            inbox,
            pending: None,
            flush: None,
        }
    }

    fn post_after(&self, delay: Duration, input: PlayerInput) -> Timeout {
        let inbox = self.inbox.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            if let Some(inbox) = inbox.upgrade() {
                inbox.post(input);
            }
        })
    }
}

impl SettleTimer for GlooTimer {
    fn schedule(&mut self, ticket: SettleTicket, delay: Duration) {
        let timeout = self.post_after(delay, PlayerInput::SettleElapsed(ticket));
        self.pending = Some((ticket, timeout));
    }

    fn cancel(&mut self, ticket: SettleTicket) {
        if matches!(self.pending, Some((pending, _)) if pending == ticket) {
            self.pending = None;
        }
    }
}

impl FlushTimer for GlooTimer {
    fn schedule_flush(&mut self, delay: Duration) {
        self.flush = Some(self.post_after(delay, PlayerInput::ScrollFlush));
    }
}

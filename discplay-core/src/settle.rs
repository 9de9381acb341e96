//! Seek settle scheduling.
//!
//! A skip pauses playback, jumps, and resumes after a short settle delay.
//! Only one resume may be pending: arming a new one replaces the previous
//! ticket, and a ticket that no longer matches the slot is ignored when its
//! timer fires.

use std::time::Duration;

/// Identity of one scheduled settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleTicket(u64);

impl SettleTicket {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Host timer that delivers a ticket back to the controller after a delay.
pub trait SettleTimer {
    /// Deliver `ticket` once `delay` has elapsed.
    fn schedule(&mut self, ticket: SettleTicket, delay: Duration);

    /// Drop a scheduled ticket. Cancelling an unknown ticket is a no-op.
    fn cancel(&mut self, ticket: SettleTicket);
}

/// A seek waiting for its settle delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSeek {
    pub ticket: SettleTicket,
    /// Position the seek jumped to, in seconds
    pub target: f64,
}

/// Single-slot holder for the pending seek.
#[derive(Debug, Default)]
pub struct SettleSlot {
    generation: u64,
    pending: Option<PendingSeek>,
}

impl SettleSlot {
    /// Arm a new pending seek, returning it and the ticket it replaced.
    pub fn arm(&mut self, target: f64) -> (PendingSeek, Option<SettleTicket>) {
        let replaced = self.clear();
        self.generation += 1;
        let pending = PendingSeek {
            ticket: SettleTicket(self.generation),
            target,
        };
        self.pending = Some(pending);
        (pending, replaced)
    }

    /// Take the pending seek if `ticket` is still the current one.
    pub fn take(&mut self, ticket: SettleTicket) -> Option<PendingSeek> {
        match self.pending {
            Some(pending) if pending.ticket == ticket => self.pending.take(),
            _ => None,
        }
    }

    /// Drop any pending seek, returning its ticket for cancellation.
    pub fn clear(&mut self) -> Option<SettleTicket> {
        self.pending.take().map(|pending| pending.ticket)
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&PendingSeek> {
        self.pending.as_ref()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

//! Native event loop.
//!
//! All inputs (UI events, commands, media notifications and timer
//! expirations) share one unbounded queue consumed by a single task, so they
//! are handled strictly in arrival order and each runs to completion.

use crate::controller::PlayerController;
use crate::input::{ControlGeometry, FlushTimer, PlayerCommand, PlayerInput, UiEvent};
use crate::media::{MediaEngine, MediaEvent};
use crate::player::Player;
use crate::settle::{SettleTicket, SettleTimer};
use crate::view::ViewSink;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const LOG_TARGET: &str = "discplay::runtime";

/// Create the input queue: a cloneable sending handle and the receiving end
/// consumed by [`PlayerRuntime`].
pub fn channel() -> (PlayerHandle, PlayerInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PlayerHandle { tx }, PlayerInbox { rx })
}

/// Sending side of the player's input queue
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<PlayerInput>,
}

impl PlayerHandle {
    /// Queue an input. Returns `false` if the runtime has stopped.
    pub fn send(&self, input: PlayerInput) -> bool {
        self.tx.send(input).is_ok()
    }

    pub fn command(&self, command: PlayerCommand) -> bool {
        self.send(PlayerInput::Command(command))
    }

    pub fn ui(&self, event: UiEvent) -> bool {
        self.send(PlayerInput::Ui(event))
    }

    pub fn media(&self, event: MediaEvent) -> bool {
        self.send(PlayerInput::Media(event))
    }
}

/// Receiving side of the player's input queue
#[derive(Debug)]
pub struct PlayerInbox {
    rx: mpsc::UnboundedReceiver<PlayerInput>,
}

/// Settle and scroll-flush timer backed by tokio sleeps that post back into
/// the input queue.
///
/// Holds only a weak sender so the runtime still stops once every
/// [`PlayerHandle`] is dropped.
#[derive(Debug)]
pub struct TokioTimer {
    tx: mpsc::WeakUnboundedSender<PlayerInput>,
    tasks: HashMap<SettleTicket, JoinHandle<()>>,
    flush: Option<JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new(handle: &PlayerHandle) -> Self {
        Self {
            tx: handle.tx.downgrade(),
            tasks: HashMap::new(),
            flush: None,
        }
    }

    fn post_after(&self, delay: Duration, input: PlayerInput) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(input);
            }
        })
    }
}

impl SettleTimer for TokioTimer {
    fn schedule(&mut self, ticket: SettleTicket, delay: Duration) {
        self.tasks.retain(|_, task| !task.is_finished());
        let task = self.post_after(delay, PlayerInput::SettleElapsed(ticket));
        self.tasks.insert(ticket, task);
    }

    fn cancel(&mut self, ticket: SettleTicket) {
        if let Some(task) = self.tasks.remove(&ticket) {
            task.abort();
        }
    }
}

impl FlushTimer for TokioTimer {
    fn schedule_flush(&mut self, delay: Duration) {
        let task = self.post_after(delay, PlayerInput::ScrollFlush);
        if let Some(previous) = self.flush.replace(task) {
            previous.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
        if let Some(task) = &self.flush {
            task.abort();
        }
    }
}

/// Single-task driver for one [`Player`]
pub struct PlayerRuntime<M, V, T, G> {
    player: Player<M, V, T, G>,
    inbox: PlayerInbox,
    cancel_token: CancellationToken,
}

impl<M, V, T, G> PlayerRuntime<M, V, T, G>
where
    M: MediaEngine,
    V: ViewSink,
    T: SettleTimer + FlushTimer,
    G: ControlGeometry,
{
    pub fn new(player: Player<M, V, T, G>, inbox: PlayerInbox) -> Self {
        Self {
            player,
            inbox,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Get a clone of the cancellation token
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Start the player and process inputs until cancelled or every handle
    /// is dropped. Returns the controller for inspection.
    pub async fn run(mut self) -> PlayerController<M, V, T> {
        info!(target: LOG_TARGET, "Starting player runtime");
        self.player.start();

        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!(target: LOG_TARGET, "Player runtime shutting down gracefully");
                    break;
                }
                input = self.inbox.rx.recv() => {
                    let Some(input) = input else {
                        debug!(target: LOG_TARGET, "All player handles dropped");
                        break;
                    };
                    self.player.handle(input);
                }
            }
        }

        self.player.into_controller()
    }
}

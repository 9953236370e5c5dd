//! Real-time host for a [`Session`]
//!
//! One task owns the session. Player intents, countdown ticks and narrative
//! results all arrive as messages and are applied one at a time, and a fresh
//! snapshot is published on a `watch` channel after each one.
//!
//! The countdown is its own task, started when the session enters Playing and
//! aborted as soon as it is anywhere else. Ticks carry the epoch of the task
//! that sent them so a tick already queued when its task was aborted is
//! dropped instead of eating into the next level's clock.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::consts::TICK_MS;
use crate::narrative::{NarrativeError, NarrativeRequest, Narrator, Ticket, request_text};
use crate::sim::{GameEvent, Intent, Session, Snapshot};

/// Presentation-side handle: send intents, observe snapshots
#[derive(Clone)]
pub struct GameHandle {
    intents: mpsc::UnboundedSender<Intent>,
    snapshots: watch::Receiver<Snapshot>,
}

impl GameHandle {
    /// Queue an intent. Returns false if the driver has stopped.
    pub fn send(&self, intent: Intent) -> bool {
        self.intents.send(intent).is_ok()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait for the next published snapshot (None once the driver is gone)
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.snapshots.changed().await.ok()?;
        Some(self.snapshots.borrow_and_update().clone())
    }
}

enum Message {
    Tick {
        epoch: u64,
    },
    Narrative {
        ticket: Ticket,
        result: Result<String, NarrativeError>,
    },
}

struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

struct GameDriver<R> {
    session: Session<R>,
    /// None = narrative disabled, every request resolves to its fallback
    narrator: Option<Arc<dyn Narrator>>,
    intents: mpsc::UnboundedReceiver<Intent>,
    inbox: mpsc::UnboundedReceiver<Message>,
    outbox: mpsc::UnboundedSender<Message>,
    snapshots: watch::Sender<Snapshot>,
    ticker: Option<Ticker>,
    next_epoch: u64,
}

/// Spawn a driver on the current tokio runtime.
///
/// The driver stops when every [`GameHandle`] is dropped; its join handle
/// yields the final session.
pub fn spawn<R>(
    session: Session<R>,
    narrator: Option<Arc<dyn Narrator>>,
) -> (GameHandle, JoinHandle<Session<R>>)
where
    R: Rng + Send + 'static,
{
    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    let (outbox, inbox) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

    let driver = GameDriver {
        session,
        narrator,
        intents: intent_rx,
        inbox,
        outbox,
        snapshots: snapshot_tx,
        ticker: None,
        next_epoch: 1,
    };
    let join = tokio::spawn(driver.run());

    let handle = GameHandle {
        intents: intent_tx,
        snapshots: snapshot_rx,
    };
    (handle, join)
}

impl<R: Rng> GameDriver<R> {
    async fn run(mut self) -> Session<R> {
        self.settle();
        loop {
            tokio::select! {
                intent = self.intents.recv() => match intent {
                    Some(intent) => self.session.apply(intent),
                    None => break,
                },
                Some(message) = self.inbox.recv() => self.handle(message),
            }
            self.settle();
        }
        self.stop_ticker();
        log::info!("Game driver stopped");
        self.session
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Tick { epoch } => {
                if self.ticker.as_ref().is_some_and(|t| t.epoch == epoch) {
                    self.session.tick();
                } else {
                    log::debug!("Dropping tick from stopped countdown {}", epoch);
                }
            }
            Message::Narrative { ticket, result } => {
                self.session.resolve_narrative(ticket, result);
            }
        }
    }

    /// Run side effects of the last mutation and publish the result
    fn settle(&mut self) {
        for event in self.session.drain_events() {
            if let GameEvent::NarrativeRequested(request) = event {
                self.dispatch(request);
            }
        }

        match (self.session.clock_running(), self.ticker.is_some()) {
            (true, false) => self.start_ticker(),
            (false, true) => self.stop_ticker(),
            _ => {}
        }

        let snapshot = self.session.snapshot();
        self.snapshots.send_if_modified(|current| {
            if current.revision == snapshot.revision {
                return false;
            }
            *current = snapshot;
            true
        });
    }

    fn dispatch(&self, request: NarrativeRequest) {
        let outbox = self.outbox.clone();
        let Some(narrator) = self.narrator.clone() else {
            let _ = outbox.send(Message::Narrative {
                ticket: request.ticket,
                result: Err(NarrativeError::Disabled),
            });
            return;
        };

        tokio::spawn(async move {
            let result = request_text(narrator.as_ref(), &request.kind).await;
            // Driver may be gone; nothing left to update then
            let _ = outbox.send(Message::Narrative {
                ticket: request.ticket,
                result,
            });
        });
    }

    fn start_ticker(&mut self) {
        let epoch = self.next_epoch;
        self.next_epoch += 1;

        let outbox = self.outbox.clone();
        let handle = tokio::spawn(async move {
            let period = Duration::from_millis(TICK_MS);
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if outbox.send(Message::Tick { epoch }).is_err() {
                    break;
                }
            }
        });
        log::debug!("Countdown {} started", epoch);
        self.ticker = Some(Ticker { epoch, handle });
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.handle.abort();
            log::debug!("Countdown {} stopped", ticker.epoch);
        }
    }
}

//! The single event-processing context.
//!
//! Inbound UI messages, timer expiries and upstream completions all funnel
//! into one loop; each message runs through [`update`] to completion before
//! the next is taken, so no two state mutations interleave.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use feed_logging::{feed_debug, feed_info};
use newsfeed_core::{
    update, AppState, AppViewModel, EndpointKind, FeedSettings, Msg, QuerySpec,
};
use newsfeed_engine::{EngineEvent, EngineHandle, NewsFetcher, Notifier};
use tokio::sync::{mpsc, watch};

use crate::effects::{to_http_failure, EffectRunner};

/// Wall-clock source for cooldown bookkeeping.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct Orchestrator {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    engine_rx: mpsc::UnboundedReceiver<EngineEvent>,
    view_tx: watch::Sender<AppViewModel>,
    clock: Clock,
}

impl Orchestrator {
    pub fn new(
        settings: FeedSettings,
        fetcher: Arc<dyn NewsFetcher>,
        notifier: Notifier,
    ) -> (Self, OrchestratorHandle) {
        let state = AppState::with_settings(settings);
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (engine_tx, engine_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(state.view());

        let engine = EngineHandle::new(fetcher, engine_tx);
        let runner = EffectRunner::new(engine, msg_tx.downgrade(), notifier);

        let orchestrator = Self {
            state,
            runner,
            msg_rx,
            engine_rx,
            view_tx,
            clock: Arc::new(Utc::now),
        };
        (orchestrator, OrchestratorHandle { msg_tx, view_rx })
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Runs until a teardown message arrives or every handle is dropped.
    /// Pending timers are cancelled on the way out.
    pub async fn run(mut self) -> AppState {
        feed_info!("Orchestrator started");
        loop {
            tokio::select! {
                msg = self.msg_rx.recv() => match msg {
                    Some(Msg::Teardown) | None => break,
                    Some(msg) => self.dispatch_msg(msg),
                },
                Some(event) = self.engine_rx.recv() => {
                    let msg = self.map_event(event);
                    self.dispatch_msg(msg);
                }
            }
        }
        self.dispatch_msg(Msg::Teardown);
        feed_info!("Orchestrator stopped");
        self.state
    }

    fn map_event(&self, event: EngineEvent) -> Msg {
        match event {
            EngineEvent::FetchCompleted { seq, result } => Msg::FetchResolved {
                seq,
                result: result.map_err(to_http_failure),
                received_at: (self.clock)(),
            },
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        feed_debug!("Dispatch {:?}", MsgLabel(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view_tx.send_replace(state.view());
        }
        self.state = state;
        self.runner.run(effects);
    }
}

/// Inbound interface used by a front end.
#[derive(Clone)]
pub struct OrchestratorHandle {
    msg_tx: mpsc::UnboundedSender<Msg>,
    view_rx: watch::Receiver<AppViewModel>,
}

impl OrchestratorHandle {
    /// Returns false once the event loop has stopped.
    pub fn send(&self, msg: Msg) -> bool {
        self.msg_tx.send(msg).is_ok()
    }

    pub fn on_input_change(&self, text: impl Into<String>) -> bool {
        self.send(Msg::InputChanged(text.into()))
    }

    pub fn on_category_change(&self, category: Option<String>) -> bool {
        self.send(Msg::CategoryChanged(category))
    }

    pub fn on_source_change(&self, source: Option<String>) -> bool {
        self.send(Msg::SourceChanged(source))
    }

    pub fn on_date_range_change(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        self.send(Msg::DateRangeChanged { from, to })
    }

    pub fn on_endpoint_change(&self, kind: EndpointKind) -> bool {
        self.send(Msg::EndpointChanged(kind))
    }

    pub fn on_page_change(&self, page: usize) -> bool {
        self.send(Msg::PageRequested(page))
    }

    pub fn on_reset_rate_limit(&self) -> bool {
        self.send(Msg::ResetRateLimit)
    }

    pub fn fetch_now(&self, spec: QuerySpec) -> bool {
        self.send(Msg::FetchRequested(spec))
    }

    /// Tears the loop down; pending timers are cancelled and never fire.
    pub fn shutdown(&self) -> bool {
        self.send(Msg::Teardown)
    }

    pub fn view(&self) -> AppViewModel {
        self.view_rx.borrow().clone()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<AppViewModel> {
        self.view_rx.clone()
    }
}

/// Keeps article payloads out of debug logs.
struct MsgLabel<'a>(&'a Msg);

impl std::fmt::Debug for MsgLabel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Msg::FetchResolved { seq, result, .. } => match result {
                Ok(items) => write!(f, "FetchResolved(seq={seq}, {} items)", items.len()),
                Err(failure) => write!(f, "FetchResolved(seq={seq}, {failure})"),
            },
            other => write!(f, "{other:?}"),
        }
    }
}

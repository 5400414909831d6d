use std::sync::Arc;

use feed_logging::feed_debug;
use newsfeed_core::UpstreamRequest;
use tokio::sync::mpsc;

use crate::{EngineEvent, FetchError, NewsFetcher};

/// Runs upstream requests off the event loop and reports completions as events.
///
/// Calls are never aborted once issued; the receiving side decides whether a
/// completion is still relevant.
#[derive(Clone)]
pub struct EngineHandle {
    fetcher: Arc<dyn NewsFetcher>,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
}

impl EngineHandle {
    pub fn new(fetcher: Arc<dyn NewsFetcher>, event_tx: mpsc::UnboundedSender<EngineEvent>) -> Self {
        Self { fetcher, event_tx }
    }

    /// Spawns one request on the current tokio runtime.
    pub fn dispatch(&self, seq: u64, request: UpstreamRequest) {
        let fetcher = self.fetcher.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            handle_dispatch(fetcher.as_ref(), seq, request, event_tx).await;
        });
    }
}

async fn handle_dispatch(
    fetcher: &dyn NewsFetcher,
    seq: u64,
    request: UpstreamRequest,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
) {
    let result: Result<_, FetchError> = fetcher.fetch(&request).await;
    feed_debug!("fetch seq={} completed ok={}", seq, result.is_ok());
    if event_tx
        .send(EngineEvent::FetchCompleted { seq, result })
        .is_err()
    {
        feed_debug!("event loop gone; dropping completion for seq={}", seq);
    }
}

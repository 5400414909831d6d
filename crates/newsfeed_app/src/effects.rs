use feed_logging::{feed_debug, feed_info};
use newsfeed_core::{Effect, HttpFailure, Msg};
use newsfeed_engine::{EngineHandle, FetchError, FetchErrorKind, Notifier, TimerSlot};
use tokio::sync::mpsc;

/// Executes core effects: timers, upstream dispatch and notices.
///
/// Timer callbacks hold only a weak sender, so a pending timer never keeps
/// the event loop alive on its own.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::WeakUnboundedSender<Msg>,
    debounce: TimerSlot,
    cooldown: TimerSlot,
    notifier: Notifier,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        msg_tx: mpsc::WeakUnboundedSender<Msg>,
        notifier: Notifier,
    ) -> Self {
        Self {
            engine,
            msg_tx,
            debounce: TimerSlot::new(),
            cooldown: TimerSlot::new(),
            notifier,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleDebounce { token, delay } => {
                    let tx = self.msg_tx.clone();
                    self.debounce.replace(delay, move || {
                        send(&tx, Msg::DebounceElapsed { token });
                    });
                }
                Effect::CancelDebounce => self.debounce.cancel(),
                Effect::Dispatch { seq, request } => {
                    feed_info!("Dispatch seq={} endpoint={}", seq, request.endpoint);
                    self.engine.dispatch(seq, request);
                }
                Effect::ArmCooldownTimer { generation, delay } => {
                    let tx = self.msg_tx.clone();
                    self.cooldown.replace(delay, move || {
                        send(&tx, Msg::CooldownElapsed { generation });
                    });
                }
                Effect::CancelCooldownTimer => self.cooldown.cancel(),
                Effect::Notify { kind, message } => {
                    let delivered = self.notifier.show(kind, message);
                    feed_debug!("Notice delivered to {} subscriber(s)", delivered);
                }
            }
        }
    }

    pub fn is_debounce_armed(&self) -> bool {
        self.debounce.is_armed()
    }

    pub fn is_cooldown_armed(&self) -> bool {
        self.cooldown.is_armed()
    }
}

fn send(tx: &mpsc::WeakUnboundedSender<Msg>, msg: Msg) {
    match tx.upgrade() {
        Some(tx) => {
            let _ = tx.send(msg);
        }
        None => feed_debug!("Event loop gone; dropping {:?}", msg),
    }
}

/// Maps an engine failure onto the core's classification input.
pub fn to_http_failure(err: FetchError) -> HttpFailure {
    match err.kind {
        FetchErrorKind::HttpStatus(code) => HttpFailure::Status {
            code,
            message: Some(err.message),
        },
        ref kind if kind.is_transport() => HttpFailure::Transport(err.message),
        kind => HttpFailure::Other(format!("{kind}: {}", err.message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use newsfeed_core::{classify, Article, FailureKind, UpstreamRequest};
    use newsfeed_engine::NewsFetcher;

    struct Unreachable;

    #[async_trait::async_trait]
    impl NewsFetcher for Unreachable {
        async fn fetch(&self, _: &UpstreamRequest) -> Result<Vec<Article>, FetchError> {
            Err(error(FetchErrorKind::Network))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_effects_disarm_both_timers() {
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel();
        let (engine_tx, _engine_rx) = mpsc::unbounded_channel();
        let engine = EngineHandle::new(Arc::new(Unreachable), engine_tx);
        let mut runner = EffectRunner::new(engine, msg_tx.downgrade(), Notifier::new());

        runner.run(vec![
            Effect::ScheduleDebounce {
                token: 1,
                delay: Duration::from_millis(1000),
            },
            Effect::ArmCooldownTimer {
                generation: 1,
                delay: Duration::from_secs(300),
            },
        ]);
        assert!(runner.is_debounce_armed());
        assert!(runner.is_cooldown_armed());

        runner.run(vec![Effect::CancelDebounce, Effect::CancelCooldownTimer]);
        assert!(!runner.is_debounce_armed());
        assert!(!runner.is_cooldown_armed());

        tokio::time::sleep(Duration::from_secs(400)).await;
        assert!(msg_rx.try_recv().is_err());
        drop(msg_tx);
    }

    fn error(kind: FetchErrorKind) -> FetchError {
        FetchError {
            kind,
            message: "detail".to_string(),
        }
    }

    #[test]
    fn engine_errors_classify_as_expected() {
        let cases = [
            (FetchErrorKind::HttpStatus(429), FailureKind::RateLimited),
            (FetchErrorKind::HttpStatus(401), FailureKind::Unauthorized),
            (FetchErrorKind::HttpStatus(500), FailureKind::ServerOrClientError),
            (FetchErrorKind::Network, FailureKind::NetworkUnreachable),
            (FetchErrorKind::Timeout, FailureKind::NetworkUnreachable),
            (FetchErrorKind::Decode, FailureKind::Unexpected),
            (FetchErrorKind::InvalidRequest, FailureKind::Unexpected),
        ];
        for (kind, expected) in cases {
            assert_eq!(classify(&to_http_failure(error(kind))), expected);
        }
    }
}

mod common;

use common::*;
use newsfeed_core::{
    update, AppState, Effect, FailureKind, FetchState, HttpFailure, Msg, NoticeKind, QuerySpec,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn dispatch_sets_pending_and_resets_page() {
    init_logging();
    let (state, seq) = search(AppState::new(), "rust");
    let (state, _) = resolve(state, seq, Ok(articles(20)));
    let (state, _) = update(state, Msg::PageRequested(2));
    assert_eq!(state.current_page(), 2);

    let (state, _) = search(state, "tokio");
    assert_eq!(state.fetch_state(), FetchState::Pending);
    assert_eq!(state.current_page(), 1);
}

#[test]
fn success_replaces_results_and_bounds_visible_items() {
    init_logging();
    let (state, seq) = search(AppState::new(), "rust");
    let (state, effects) = resolve(state, seq, Ok(articles(17)));
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.fetch_state, FetchState::Succeeded);
    assert_eq!(view.result_count, 17);
    assert_eq!(view.visible_items.len(), 10);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.error_message, None);
    assert!(!view.is_initial_load);

    let (state, seq) = search(state, "serde");
    let (state, _) = resolve(state, seq, Ok(articles(3)));
    assert_eq!(state.results().len(), 3);
    assert_eq!(state.visible_items().len(), 3);
    assert_eq!(state.total_pages(), 1);
}

#[test]
fn empty_result_is_success_not_failure() {
    init_logging();
    let (state, seq) = search(AppState::new(), "nothing matches");
    let (state, _) = resolve(state, seq, Ok(Vec::new()));
    let view = state.view();
    assert_eq!(view.fetch_state, FetchState::Succeeded);
    assert!(view.show_empty_notice);
    assert_eq!(view.total_pages, 0);
    assert_eq!(view.current_page, 1);
}

#[test]
fn earlier_response_arriving_late_is_discarded() {
    init_logging();
    let (state, first) = search(AppState::new(), "first");
    let (state, second) = search(state, "second");
    assert!(second > first);

    let (state, _) = resolve(state, second, Ok(articles(2)));
    let (state, effects) = resolve(state, first, Ok(articles(15)));
    assert!(effects.is_empty());
    assert_eq!(state.results(), articles(2).as_slice());
    assert_eq!(state.fetch_state(), FetchState::Succeeded);

    // A stale failure must not arm anything either.
    let (state, effects) = resolve(state, first, Err(status(500)));
    assert!(effects.is_empty());
    assert!(!state.is_cooldown_active());
}

#[test]
fn rate_limit_trips_sticky_gate_without_cooldown() {
    init_logging();
    let (state, seq) = search(AppState::new(), "rust");
    let (state, effects) = resolve(state, seq, Err(status(429)));

    assert!(state.is_rate_limited());
    assert!(!state.is_cooldown_active());
    assert_eq!(state.fetch_state(), FetchState::Failed);
    assert_eq!(state.last_failure(), Some(FailureKind::RateLimited));
    assert_eq!(
        effects,
        vec![Effect::Notify {
            kind: NoticeKind::Error,
            message: FailureKind::RateLimited.user_message().to_string(),
        }]
    );

    let (state, effects) = update(state, Msg::InputChanged("again".into()));
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::FetchRequested(QuerySpec::default()));
    assert!(effects.is_empty());
    assert_eq!(state.latest_seq(), 1);
}

#[test]
fn reset_reopens_rate_limit_gate_and_clears_display() {
    init_logging();
    let (state, seq) = search(AppState::new(), "rust");
    let (state, _) = resolve(state, seq, Err(status(429)));

    let (state, effects) = update(state, Msg::ResetRateLimit);
    assert!(!state.is_rate_limited());
    assert_eq!(state.error_message(), None);
    assert!(state.results().is_empty());
    assert_eq!(state.fetch_state(), FetchState::Idle);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Notify {
            kind: NoticeKind::Success,
            ..
        }]
    ));

    let (_state, effects) = update(state, Msg::InputChanged("again".into()));
    assert_eq!(effects.len(), 1);

    // Resetting an open gate does nothing.
    let (state, effects) = update(AppState::new(), Msg::ResetRateLimit);
    assert!(effects.is_empty());
    assert_eq!(state, AppState::new());
}

#[test]
fn unauthorized_arms_cooldown_for_five_minutes() {
    init_logging();
    let (state, seq) = search(AppState::new(), "rust");
    let (state, effects) = resolve(state, seq, Err(status(401)));

    assert!(state.is_cooldown_active());
    assert!(!state.is_rate_limited());
    assert_eq!(state.cooldown().armed_at(), Some(at(0)));
    assert_eq!(
        effects[0],
        Effect::ArmCooldownTimer {
            generation: 1,
            delay: Duration::from_secs(300),
        }
    );
    assert_eq!(
        state.error_message(),
        Some("API key is invalid or expired. Please check your API key.")
    );
    assert_eq!(
        state.cooldown_remaining(at(299)),
        Some(Duration::from_secs(1))
    );
}

#[test]
fn cooldown_expiry_clears_error_and_reopens_gate() {
    init_logging();
    let (state, seq) = search(AppState::new(), "rust");
    let (state, _) = resolve(state, seq, Err(HttpFailure::Transport("refused".into())));
    assert_eq!(state.last_failure(), Some(FailureKind::NetworkUnreachable));
    let generation = state.cooldown().generation();

    let (state, _) = update(state, Msg::CooldownElapsed { generation: generation + 7 });
    assert!(state.is_cooldown_active());

    let (state, _) = update(state, Msg::CooldownElapsed { generation });
    assert!(!state.is_cooldown_active());
    assert_eq!(state.error_message(), None);
    assert_eq!(state.fetch_state(), FetchState::Failed);

    let (_state, effects) = update(state, Msg::InputChanged("retry".into()));
    assert_eq!(effects.len(), 1);
}

#[test]
fn every_non_rate_limit_failure_arms_cooldown() {
    init_logging();
    let failures = [
        (status(401), FailureKind::Unauthorized),
        (status(404), FailureKind::ServerOrClientError),
        (status(503), FailureKind::ServerOrClientError),
        (HttpFailure::Transport("dns".into()), FailureKind::NetworkUnreachable),
        (HttpFailure::Other("bad json".into()), FailureKind::Unexpected),
    ];
    for (failure, kind) in failures {
        let (state, seq) = search(AppState::new(), "rust");
        let (state, effects) = resolve(state, seq, Err(failure));
        assert_eq!(state.last_failure(), Some(kind));
        assert!(state.is_cooldown_active(), "{kind} should arm cooldown");
        assert!(matches!(effects[0], Effect::ArmCooldownTimer { .. }));
        assert_eq!(state.error_message(), Some(kind.user_message()));
        assert!(state.results().is_empty());
    }
}

#[test]
fn failure_clears_previous_results() {
    init_logging();
    let (state, seq) = search(AppState::new(), "rust");
    let (state, _) = resolve(state, seq, Ok(articles(12)));
    let (state, seq) = search(state, "more");
    let (state, _) = resolve(state, seq, Err(status(500)));
    assert!(state.results().is_empty());
    assert_eq!(state.view().visible_items.len(), 0);
}

#[test]
fn fetch_requested_bypasses_debounce() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::FetchRequested(QuerySpec::default()));
    let (seq, request) = dispatched(&effects).expect("dispatch");
    assert_eq!(seq, 1);
    assert_eq!(request.param("country"), Some("us"));
    assert_eq!(state.fetch_state(), FetchState::Pending);
}

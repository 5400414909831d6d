#![allow(dead_code)]

use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use newsfeed_core::{update, AppState, Article, Effect, HttpFailure, Msg, UpstreamRequest};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn article(n: usize) -> Article {
    Article {
        source: None,
        author: None,
        title: format!("Story {n}"),
        description: None,
        url: format!("https://news.example.com/{n}"),
        url_to_image: None,
        published_at: None,
        content: None,
    }
}

pub fn articles(count: usize) -> Vec<Article> {
    (1..=count).map(article).collect()
}

pub fn debounce_token(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleDebounce { token, .. } => Some(*token),
            _ => None,
        })
        .expect("debounce effect")
}

pub fn dispatched(effects: &[Effect]) -> Option<(u64, UpstreamRequest)> {
    effects.iter().find_map(|effect| match effect {
        Effect::Dispatch { seq, request } => Some((*seq, request.clone())),
        _ => None,
    })
}

/// Types `text` and lets the settle delay elapse; returns the dispatched seq.
pub fn search(state: AppState, text: &str) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::InputChanged(text.to_string()));
    let token = debounce_token(&effects);
    let (state, effects) = update(state, Msg::DebounceElapsed { token });
    let (seq, _) = dispatched(&effects).expect("dispatch effect");
    (state, seq)
}

pub fn resolve(
    state: AppState,
    seq: u64,
    result: Result<Vec<Article>, HttpFailure>,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FetchResolved {
            seq,
            result,
            received_at: at(0),
        },
    )
}

pub fn status(code: u16) -> HttpFailure {
    HttpFailure::Status {
        code,
        message: None,
    }
}

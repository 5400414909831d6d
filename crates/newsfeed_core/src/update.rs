use feed_logging::feed_warn;

use crate::{AppState, Effect, Msg, CATEGORIES, SOURCES};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.filters.free_text = text;
            state.mark_dirty();
            state.schedule(state.filters.clone())
        }
        Msg::CategoryChanged(category) => {
            state.filters.category = normalize_choice(category, CATEGORIES, "category");
            state.mark_dirty();
            state.schedule(state.filters.clone())
        }
        Msg::SourceChanged(source) => {
            state.filters.source = normalize_choice(source, SOURCES, "source");
            state.mark_dirty();
            state.schedule(state.filters.clone())
        }
        Msg::DateRangeChanged { from, to } => {
            state.filters.date_from = from;
            state.filters.date_to = to;
            state.mark_dirty();
            state.schedule(state.filters.clone())
        }
        Msg::EndpointChanged(kind) => {
            state.filters.endpoint_kind = kind;
            state.mark_dirty();
            state.schedule(state.filters.clone())
        }
        Msg::FetchRequested(spec) => state.fetch(spec),
        Msg::DebounceElapsed { token } => state.on_debounce_elapsed(token),
        Msg::FetchResolved {
            seq,
            result,
            received_at,
        } => state.apply_resolution(seq, result, received_at),
        Msg::CooldownElapsed { generation } => state.on_cooldown_elapsed(generation),
        Msg::PageRequested(page) => {
            state.request_page(page);
            Vec::new()
        }
        Msg::NextPage => {
            state.step_page(true);
            Vec::new()
        }
        Msg::PrevPage => {
            state.step_page(false);
            Vec::new()
        }
        Msg::ResetRateLimit => state.reset_rate_limit(),
        Msg::ArticleSelected { url } => {
            state.select_article(&url);
            Vec::new()
        }
        Msg::ArticleClosed => {
            state.close_article();
            Vec::new()
        }
        Msg::Teardown => state.teardown(),
    };

    (state, effects)
}

/// Empty selections mean "all"; unknown values are passed through with a warning.
fn normalize_choice(raw: Option<String>, known: &[&str], label: &str) -> Option<String> {
    let value = raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())?;
    if !known.contains(&value.as_str()) {
        feed_warn!("unrecognised {} {:?}; sending as-is", label, value);
    }
    Some(value)
}

mod common;

use common::*;
use newsfeed_core::{update, AppState, Msg, PageButton};

fn loaded(count: usize) -> AppState {
    let (state, seq) = search(AppState::new(), "rust");
    resolve(state, seq, Ok(articles(count))).0
}

#[test]
fn out_of_range_pages_clamp() {
    init_logging();
    let state = loaded(20);
    let total = state.total_pages();
    assert_eq!(total, 2);

    let (state, _) = update(state, Msg::PageRequested(0));
    assert_eq!(state.current_page(), 1);
    let (state, _) = update(state, Msg::PageRequested(total + 5));
    assert_eq!(state.current_page(), total);
    assert_eq!(state.visible_items()[0].url, "https://news.example.com/11");
}

#[test]
fn page_change_with_no_results_stays_on_first_page() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::PageRequested(4));
    assert_eq!(state.current_page(), 1);
    assert!(!state.consume_dirty());
}

#[test]
fn paging_applies_to_displayed_results_while_next_query_pending() {
    init_logging();
    let state = loaded(20);
    let (state, seq) = search(state, "next");
    // Fetch start resets the page but the old results stay on display.
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.results().len(), 20);

    let (state, _) = update(state, Msg::NextPage);
    assert_eq!(state.current_page(), 2);

    let (state, _) = resolve(state, seq, Ok(articles(15)));
    assert_eq!(state.current_page(), 1);
}

#[test]
fn next_and_prev_stay_in_bounds() {
    init_logging();
    let state = loaded(15);
    let (state, _) = update(state, Msg::PrevPage);
    assert_eq!(state.current_page(), 1);
    let (state, _) = update(state, Msg::NextPage);
    let (state, _) = update(state, Msg::NextPage);
    assert_eq!(state.current_page(), 2);
    assert_eq!(state.visible_items().len(), 5);
    assert_eq!(
        state.view().page_buttons,
        vec![PageButton::Page(1), PageButton::Page(2)]
    );
}

#[test]
fn article_lookup_and_selection() {
    init_logging();
    let state = loaded(3);
    assert!(state.article_by_url("https://news.example.com/2").is_some());

    let (state, _) = update(
        state,
        Msg::ArticleSelected {
            url: "https://news.example.com/2".into(),
        },
    );
    let view = state.view();
    assert_eq!(view.selected_article.map(|a| a.title), Some("Story 2".into()));
    assert_eq!(view.detail_error, None);

    let (state, _) = update(
        state,
        Msg::ArticleSelected {
            url: "https://elsewhere.example.com".into(),
        },
    );
    assert_eq!(state.view().detail_error.as_deref(), Some("Article not found"));

    let (state, _) = update(state, Msg::ArticleClosed);
    assert_eq!(state.view().detail_error, None);
}

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::pagination::{page_buttons, total_pages};
use crate::view_model::AppViewModel;
use crate::{Article, CooldownState, FailureKind, FeedSettings, PageState, QuerySpec, RateLimitState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingQuery {
    pub(crate) token: u64,
    pub(crate) spec: QuerySpec,
}

/// Everything the fetch controller owns. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) settings: FeedSettings,
    pub(crate) filters: QuerySpec,
    pub(crate) results: Vec<Article>,
    pub(crate) fetch_state: FetchState,
    pub(crate) error_message: Option<String>,
    pub(crate) last_failure: Option<FailureKind>,
    pub(crate) cooldown: CooldownState,
    pub(crate) rate_limit: RateLimitState,
    pub(crate) pages: PageState,
    pub(crate) pending_debounce: Option<PendingQuery>,
    pub(crate) debounce_counter: u64,
    pub(crate) latest_seq: u64,
    pub(crate) is_initial_load: bool,
    pub(crate) selected: Option<Article>,
    pub(crate) detail_error: Option<String>,
    pub(crate) torn_down: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(FeedSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: FeedSettings) -> Self {
        Self {
            cooldown: CooldownState::new(settings.cooldown),
            pages: PageState::new(settings.page_size),
            settings,
            filters: QuerySpec::default(),
            results: Vec::new(),
            fetch_state: FetchState::Idle,
            error_message: None,
            last_failure: None,
            rate_limit: RateLimitState::default(),
            pending_debounce: None,
            debounce_counter: 0,
            latest_seq: 0,
            is_initial_load: true,
            selected: None,
            detail_error: None,
            torn_down: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let total = self.total_pages();
        let current = self.pages.current_page();
        AppViewModel {
            fetch_state: self.fetch_state,
            error_message: self.error_message.clone(),
            is_cooldown_active: self.cooldown.is_active(),
            cooldown_expires_at: self.cooldown.expires_at(),
            is_rate_limited: self.rate_limit.is_tripped(),
            visible_items: self.visible_items().to_vec(),
            current_page: current,
            total_pages: total,
            page_buttons: page_buttons(current, total),
            result_count: self.results.len(),
            filters: self.filters.clone(),
            is_initial_load: self.is_initial_load,
            show_empty_notice: self.results.is_empty()
                && self.fetch_state != FetchState::Pending
                && !self.is_initial_load,
            selected_article: self.selected.clone(),
            detail_error: self.detail_error.clone(),
        }
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn filters(&self) -> &QuerySpec {
        &self.filters
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch_state
    }

    pub fn results(&self) -> &[Article] {
        &self.results
    }

    pub fn visible_items(&self) -> &[Article] {
        self.pages.visible(&self.results)
    }

    pub fn current_page(&self) -> usize {
        self.pages.current_page()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.results.len(), self.pages.page_size())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn last_failure(&self) -> Option<FailureKind> {
        self.last_failure
    }

    pub fn cooldown(&self) -> &CooldownState {
        &self.cooldown
    }

    pub fn is_cooldown_active(&self) -> bool {
        self.cooldown.is_active()
    }

    pub fn cooldown_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.cooldown.remaining(now)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.rate_limit.is_tripped()
    }

    /// True while either lockout forbids dispatching a request.
    pub fn is_gated(&self) -> bool {
        self.rate_limit.is_tripped() || self.cooldown.is_active()
    }

    /// Sequence number of the most recently dispatched request (0 = none yet).
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn has_pending_debounce(&self) -> bool {
        self.pending_debounce.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn article_by_url(&self, url: &str) -> Option<&Article> {
        self.results.iter().find(|article| article.key() == url)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

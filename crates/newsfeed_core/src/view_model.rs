use chrono::{DateTime, Utc};

use crate::{Article, FetchState, PageButton, QuerySpec};

/// Observable state handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub fetch_state: FetchState,
    pub error_message: Option<String>,
    pub is_cooldown_active: bool,
    pub cooldown_expires_at: Option<DateTime<Utc>>,
    pub is_rate_limited: bool,
    pub visible_items: Vec<Article>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_buttons: Vec<PageButton>,
    pub result_count: usize,
    pub filters: QuerySpec,
    pub is_initial_load: bool,
    /// Results are empty after a completed fetch ("No articles found.").
    pub show_empty_notice: bool,
    pub selected_article: Option<Article>,
    pub detail_error: Option<String>,
}

impl AppViewModel {
    /// Whole seconds left on the cooldown, rounded up.
    pub fn cooldown_remaining_secs(&self, now: DateTime<Utc>) -> Option<u64> {
        if !self.is_cooldown_active {
            return None;
        }
        let expires_at = self.cooldown_expires_at?;
        let millis = (expires_at - now).num_milliseconds().max(0) as u64;
        Some(millis.div_ceil(1000))
    }
}

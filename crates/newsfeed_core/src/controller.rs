//! Debounce, fetch dispatch, resolution and gate handling on [`AppState`].

use chrono::{DateTime, Utc};
use feed_logging::{feed_debug, feed_info, feed_warn};

use crate::state::PendingQuery;
use crate::{
    build_request, classify, AppState, Article, Effect, FailureKind, FetchState, HttpFailure,
    NoticeKind, QuerySpec,
};

impl AppState {
    /// Debounce entry point: last write wins, nothing is queued.
    pub(crate) fn schedule(&mut self, spec: QuerySpec) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        if self.is_gated() {
            feed_debug!(
                "schedule suppressed: rate_limited={} cooldown={}",
                self.rate_limit.is_tripped(),
                self.cooldown.is_active()
            );
            return Vec::new();
        }

        self.debounce_counter += 1;
        let token = self.debounce_counter;
        self.pending_debounce = Some(PendingQuery { token, spec });
        vec![Effect::ScheduleDebounce {
            token,
            delay: self.settings.settle_delay,
        }]
    }

    pub(crate) fn on_debounce_elapsed(&mut self, token: u64) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        match self.pending_debounce.take() {
            Some(pending) if pending.token == token => self.fetch(pending.spec),
            other => {
                feed_debug!("ignoring superseded debounce token {}", token);
                self.pending_debounce = other;
                Vec::new()
            }
        }
    }

    /// Dispatches one request unless a gate is closed. The gate check here is
    /// what guarantees nothing is sent while locked out, whoever the caller is.
    pub(crate) fn fetch(&mut self, spec: QuerySpec) -> Vec<Effect> {
        if self.torn_down || self.is_gated() {
            feed_debug!("fetch skipped: gate closed or torn down");
            return Vec::new();
        }

        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.fetch_state = FetchState::Pending;
        self.error_message = None;
        self.pages.reset();
        self.mark_dirty();

        let request = build_request(&spec, &self.settings);
        feed_info!(
            "dispatching fetch seq={} endpoint={} params={}",
            seq,
            request.endpoint,
            request.params.len()
        );
        vec![Effect::Dispatch { seq, request }]
    }

    pub(crate) fn apply_resolution(
        &mut self,
        seq: u64,
        result: Result<Vec<Article>, HttpFailure>,
        received_at: DateTime<Utc>,
    ) -> Vec<Effect> {
        if self.torn_down {
            feed_debug!("ignoring resolution for seq={} after teardown", seq);
            return Vec::new();
        }
        if seq != self.latest_seq {
            feed_debug!(
                "discarding stale response seq={} latest={}",
                seq,
                self.latest_seq
            );
            return Vec::new();
        }
        if self.fetch_state != FetchState::Pending {
            feed_debug!("discarding duplicate resolution for seq={}", seq);
            return Vec::new();
        }

        self.mark_dirty();
        self.pages.reset();
        match result {
            Ok(articles) => {
                feed_info!("fetch seq={} succeeded with {} items", seq, articles.len());
                self.results = articles;
                self.fetch_state = FetchState::Succeeded;
                self.error_message = None;
                self.last_failure = None;
                self.is_initial_load = false;
                self.refresh_selection();
                Vec::new()
            }
            Err(failure) => {
                let kind = classify(&failure);
                feed_warn!("fetch seq={} failed ({}): {}", seq, kind, failure);
                self.results.clear();
                self.refresh_selection();
                self.fetch_state = FetchState::Failed;
                self.last_failure = Some(kind);
                self.error_message = Some(kind.user_message().to_string());

                let mut effects = Vec::with_capacity(2);
                if kind.arms_cooldown() {
                    effects.push(self.arm_cooldown(received_at));
                } else {
                    self.trip_rate_limit();
                }
                effects.push(Effect::Notify {
                    kind: NoticeKind::Error,
                    message: kind.user_message().to_string(),
                });
                effects
            }
        }
    }

    fn arm_cooldown(&mut self, now: DateTime<Utc>) -> Effect {
        let generation = self.cooldown.arm(now);
        feed_info!(
            "cooldown armed generation={} for {:?}",
            generation,
            self.cooldown.duration()
        );
        Effect::ArmCooldownTimer {
            generation,
            delay: self.cooldown.duration(),
        }
    }

    fn trip_rate_limit(&mut self) {
        self.rate_limit.trip();
        self.fetch_state = FetchState::Failed;
        self.error_message = Some(FailureKind::RateLimited.user_message().to_string());
        self.pending_debounce = None;
        feed_warn!("rate limit tripped; requests blocked until reset");
    }

    pub(crate) fn on_cooldown_elapsed(&mut self, generation: u64) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        if !self.cooldown.expire(generation) {
            feed_debug!("ignoring stale cooldown expiry generation={}", generation);
            return Vec::new();
        }
        feed_info!("cooldown cleared");
        if !self.rate_limit.is_tripped() {
            self.error_message = None;
        }
        self.mark_dirty();
        Vec::new()
    }

    pub(crate) fn reset_rate_limit(&mut self) -> Vec<Effect> {
        if !self.rate_limit.reset() {
            return Vec::new();
        }
        feed_info!("rate limit reset by user");
        self.error_message = None;
        self.last_failure = None;
        self.results.clear();
        self.refresh_selection();
        self.pages.reset();
        self.fetch_state = FetchState::Idle;
        self.mark_dirty();
        vec![Effect::Notify {
            kind: NoticeKind::Success,
            message: "Rate limit reset.".to_string(),
        }]
    }

    /// Pages always address the result set currently on display.
    pub(crate) fn request_page(&mut self, page: usize) {
        let before = self.pages.current_page();
        if self.pages.set_page(page, self.results.len()) != before {
            self.mark_dirty();
        }
    }

    pub(crate) fn step_page(&mut self, forward: bool) {
        let before = self.pages.current_page();
        let after = if forward {
            self.pages.next(self.results.len())
        } else {
            self.pages.prev(self.results.len())
        };
        if after != before {
            self.mark_dirty();
        }
    }

    pub(crate) fn select_article(&mut self, url: &str) {
        self.selected = self.article_by_url(url).cloned();
        self.detail_error = match self.selected {
            Some(_) => None,
            None => Some("Article not found".to_string()),
        };
        self.mark_dirty();
    }

    pub(crate) fn close_article(&mut self) {
        if self.selected.is_some() || self.detail_error.is_some() {
            self.selected = None;
            self.detail_error = None;
            self.mark_dirty();
        }
    }

    fn refresh_selection(&mut self) {
        if let Some(selected) = self.selected.take() {
            self.selected = self
                .results
                .iter()
                .find(|article| article.key() == selected.key())
                .cloned();
        }
    }

    pub(crate) fn teardown(&mut self) -> Vec<Effect> {
        self.torn_down = true;
        self.pending_debounce = None;
        vec![Effect::CancelDebounce, Effect::CancelCooldownTimer]
    }
}

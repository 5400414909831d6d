use chrono::{DateTime, NaiveDate, Utc};

use crate::{Article, EndpointKind, HttpFailure, QuerySpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box.
    InputChanged(String),
    /// User picked a category (`None` = all categories).
    CategoryChanged(Option<String>),
    /// User picked a source (`None` = all sources).
    SourceChanged(Option<String>),
    DateRangeChanged {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    EndpointChanged(EndpointKind),
    /// Fetch immediately, bypassing the settle delay (gates still apply).
    FetchRequested(QuerySpec),
    /// A debounce timer fired.
    DebounceElapsed { token: u64 },
    /// An upstream call finished.
    FetchResolved {
        seq: u64,
        result: Result<Vec<Article>, HttpFailure>,
        received_at: DateTime<Utc>,
    },
    /// A cooldown timer fired.
    CooldownElapsed { generation: u64 },
    PageRequested(usize),
    NextPage,
    PrevPage,
    /// User explicitly cleared the rate-limit lockout.
    ResetRateLimit,
    ArticleSelected { url: String },
    ArticleClosed,
    /// Component is going away; cancel every timer.
    Teardown,
}

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    /// Quiet period after the last input change before a query is dispatched.
    pub settle_delay: Duration,
    /// Lockout after a non-rate-limit failure.
    pub cooldown: Duration,
    /// Items per display page.
    pub page_size: usize,
    /// Items requested from upstream per fetch (`pageSize` parameter).
    pub max_result_window: usize,
    /// Country sent with top-headlines queries.
    pub country: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1000),
            cooldown: Duration::from_secs(5 * 60),
            page_size: 10,
            max_result_window: 20,
            country: "us".to_string(),
        }
    }
}

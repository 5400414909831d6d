use std::time::Duration;

use feed_logging::{feed_debug, feed_warn};
use futures_util::StreamExt;
use newsfeed_core::{Article, ArticlesResponse, EndpointKind, UpstreamRequest};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::{FetchError, FetchErrorKind};

const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub top_headlines_url: String,
    pub everything_url: String,
    pub api_key: Option<String>,
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Whole-request bound. Unset by default: the upstream call waits for
    /// the transport to give up on its own.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            top_headlines_url: "https://newsapi.org/v2/top-headlines".to_string(),
            everything_url: "https://newsapi.org/v2/everything".to_string(),
            api_key: None,
            user_agent: concat!("newsfeed/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl FetchSettings {
    pub fn endpoint_url(&self, kind: EndpointKind) -> &str {
        match kind {
            EndpointKind::TopHeadlines => &self.top_headlines_url,
            EndpointKind::Everything => &self.everything_url,
        }
    }
}

#[async_trait::async_trait]
pub trait NewsFetcher: Send + Sync {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Vec<Article>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Self::build_client(&settings)?;
        Ok(Self { settings, client })
    }

    fn build_client(settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = settings.api_key.as_deref() {
            let mut value = HeaderValue::from_str(key).map_err(|_| {
                FetchError::new(
                    FetchErrorKind::InvalidRequest,
                    "api key is not a valid header value",
                )
            })?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| FetchError::new(FetchErrorKind::Network, err.to_string()))
    }

    fn request_url(&self, request: &UpstreamRequest) -> Result<url::Url, FetchError> {
        url::Url::parse_with_params(self.settings.endpoint_url(request.endpoint), &request.params)
            .map_err(|err| FetchError::new(FetchErrorKind::InvalidRequest, err.to_string()))
    }
}

#[async_trait::async_trait]
impl NewsFetcher for ReqwestFetcher {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Vec<Article>, FetchError> {
        let url = self.request_url(request)?;
        feed_debug!("GET {} params={:?}", request.endpoint, request.params);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = upstream_error_message(&body).unwrap_or_else(|| status.to_string());
            feed_warn!("upstream {} answered {}: {}", request.endpoint, status, message);
            return Err(FetchError::new(
                FetchErrorKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FetchErrorKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FetchErrorKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded: ArticlesResponse = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FetchErrorKind::Decode, err.to_string()))?;
        let articles = decoded.into_articles();
        feed_debug!(
            "GET {} returned {} articles ({} bytes)",
            request.endpoint,
            articles.len(),
            bytes.len()
        );
        Ok(articles)
    }
}

/// NewsAPI error bodies look like `{"status":"error","code":"...","message":"..."}`.
fn upstream_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FetchErrorKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FetchErrorKind::InvalidRequest, err.to_string());
    }
    FetchError::new(FetchErrorKind::Network, err.to_string())
}

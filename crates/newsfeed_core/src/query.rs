use std::fmt;

use chrono::NaiveDate;

use crate::FeedSettings;

/// Categories offered for top-headlines filtering.
pub const CATEGORIES: &[&str] = &["general", "technology", "sports", "health", "business"];
/// Sources offered for filtering.
pub const SOURCES: &[&str] = &["techcrunch", "bbc-news", "cnn", "reuters"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndpointKind {
    #[default]
    TopHeadlines,
    Everything,
}

impl EndpointKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "top" | "top-headlines" | "topheadlines" | "headlines" => Some(Self::TopHeadlines),
            "everything" | "all" => Some(Self::Everything),
            _ => None,
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointKind::TopHeadlines => write!(f, "top-headlines"),
            EndpointKind::Everything => write!(f, "everything"),
        }
    }
}

/// Snapshot of the filters one fetch attempt is built from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySpec {
    pub free_text: String,
    pub category: Option<String>,
    pub source: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub endpoint_kind: EndpointKind,
}

/// Endpoint plus ordered query parameters for one upstream GET.
/// Credentials are added by the transport, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub endpoint: EndpointKind,
    pub params: Vec<(String, String)>,
}

impl UpstreamRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.param(key).is_some()
    }
}

pub fn build_request(spec: &QuerySpec, settings: &FeedSettings) -> UpstreamRequest {
    let mut params = Vec::new();
    push(&mut params, "pageSize", Some(settings.max_result_window.to_string()));

    match spec.endpoint_kind {
        EndpointKind::TopHeadlines => {
            push(&mut params, "country", non_empty(&settings.country));
            push(&mut params, "category", spec.category.as_deref().and_then(non_empty));
            push(&mut params, "q", non_empty(&spec.free_text));
        }
        EndpointKind::Everything => {
            push(&mut params, "q", non_empty(&spec.free_text));
            push(&mut params, "sortBy", Some("publishedAt".to_string()));
            push(&mut params, "from", spec.date_from.map(format_date));
            push(&mut params, "to", spec.date_to.map(format_date));
        }
    }

    push(&mut params, "sources", spec.source.as_deref().and_then(non_empty));

    UpstreamRequest {
        endpoint: spec.endpoint_kind,
        params,
    }
}

fn push(params: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        params.push((key.to_string(), value));
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

//! Newsfeed core: pure fetch-orchestration state machine and view-model helpers.
mod article;
mod controller;
mod effect;
mod failure;
mod gate;
mod msg;
mod pagination;
mod query;
mod settings;
mod state;
mod update;
mod view_model;

pub use article::{Article, ArticleSource, ArticlesResponse};
pub use effect::{Effect, NoticeKind};
pub use failure::{classify, FailureKind, HttpFailure};
pub use gate::{CooldownState, RateLimitState};
pub use msg::Msg;
pub use pagination::{page_buttons, page_window, total_pages, PageButton, PageState};
pub use query::{build_request, EndpointKind, QuerySpec, UpstreamRequest, CATEGORIES, SOURCES};
pub use settings::FeedSettings;
pub use state::{AppState, FetchState};
pub use update::update;
pub use view_model::AppViewModel;

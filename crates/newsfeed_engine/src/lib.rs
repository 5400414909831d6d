//! Newsfeed engine: upstream IO, timers and notifications for the core state machine.
mod engine;
mod fetch;
mod notify;
mod timer;
mod types;

pub use engine::EngineHandle;
pub use fetch::{FetchSettings, NewsFetcher, ReqwestFetcher};
pub use notify::{Notice, Notifier, Subscription};
pub use timer::{TimerHandle, TimerSlot};
pub use types::{EngineEvent, FetchError, FetchErrorKind};

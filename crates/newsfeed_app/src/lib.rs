//! Newsfeed app: runtime loop, effect execution, configuration and text front end.
pub mod commands;
pub mod config;
pub mod effects;
pub mod render;
pub mod runtime;

pub use commands::{Command, CommandError};
pub use config::{AppConfig, ConfigError};
pub use effects::{to_http_failure, EffectRunner};
pub use runtime::{Clock, Orchestrator, OrchestratorHandle};

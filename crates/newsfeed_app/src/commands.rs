//! Line-oriented commands for the terminal front end.

use chrono::NaiveDate;
use newsfeed_core::{AppViewModel, EndpointKind};
use thiserror::Error;

use crate::OrchestratorHandle;

pub const HELP: &str = "\
commands:
  search <text>           set the search text (empty clears it)
  category <name|->       filter top headlines by category
  source <name|->         filter by source
  dates <from|-> <to|->   date range for `everything` (YYYY-MM-DD)
  endpoint <top|everything>
  page <n> | next | prev  change page
  open <n> | close        show / hide details of item n on this page
  reset                   clear a rate-limit lockout
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Category(Option<String>),
    Source(Option<String>),
    Dates {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    Endpoint(EndpointKind),
    Page(usize),
    Next,
    Prev,
    Open(usize),
    Close,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
    #[error("invalid argument {value:?} for {command}")]
    InvalidArgument { command: &'static str, value: String },
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "category" | "cat" => Ok(Command::Category(optional(rest))),
            "source" | "src" => Ok(Command::Source(optional(rest))),
            "dates" => {
                let mut parts = rest.split_whitespace();
                let from = parse_date(parts.next())?;
                let to = parse_date(parts.next())?;
                Ok(Command::Dates { from, to })
            }
            "endpoint" => EndpointKind::parse(rest)
                .map(Command::Endpoint)
                .ok_or_else(|| invalid("endpoint", rest)),
            "page" => parse_number("page", rest).map(Command::Page),
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "open" => parse_number("open", rest).map(Command::Open),
            "close" => Ok(Command::Close),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Forwards the command to the orchestrator. `view` resolves `open n`
    /// against the items currently on screen.
    pub fn apply(self, handle: &OrchestratorHandle, view: &AppViewModel) -> bool {
        match self {
            Command::Search(text) => handle.on_input_change(text),
            Command::Category(category) => handle.on_category_change(category),
            Command::Source(source) => handle.on_source_change(source),
            Command::Dates { from, to } => handle.on_date_range_change(from, to),
            Command::Endpoint(kind) => handle.on_endpoint_change(kind),
            Command::Page(page) => handle.on_page_change(page),
            Command::Next => handle.send(newsfeed_core::Msg::NextPage),
            Command::Prev => handle.send(newsfeed_core::Msg::PrevPage),
            Command::Open(index) => {
                let url = index
                    .checked_sub(1)
                    .and_then(|i| view.visible_items.get(i))
                    .map(|article| article.url.clone())
                    .unwrap_or_default();
                handle.send(newsfeed_core::Msg::ArticleSelected { url })
            }
            Command::Close => handle.send(newsfeed_core::Msg::ArticleClosed),
            Command::Reset => handle.on_reset_rate_limit(),
            Command::Help | Command::Quit => true,
        }
    }
}

fn optional(raw: &str) -> Option<String> {
    match raw {
        "" | "-" | "all" => None,
        value => Some(value.to_string()),
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, CommandError> {
    match raw {
        None | Some("-") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| invalid("dates", value)),
    }
}

fn parse_number(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    raw.parse().map_err(|_| invalid(command, raw))
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

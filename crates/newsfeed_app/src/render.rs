//! Plain-text rendering of the view model.

use chrono::{DateTime, Utc};
use newsfeed_core::{AppViewModel, EndpointKind, FetchState, PageButton};

const DESCRIPTION_PREVIEW_CHARS: usize = 80;

pub fn render(view: &AppViewModel, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![header_line(view)];

    if let Some(error) = view.error_message.as_deref() {
        let suffix = if view.is_rate_limited {
            " [type `reset` to clear]".to_string()
        } else {
            view.cooldown_remaining_secs(now)
                .map(|secs| format!(" [Cooldown active - {secs}s remaining]"))
                .unwrap_or_default()
        };
        lines.push(format!("! {error}{suffix}"));
    }

    if let Some(article) = view.selected_article.as_ref() {
        lines.push(format!("== {}", article.title));
        lines.push(format!(
            "Author: {}",
            article.author.as_deref().unwrap_or("Unknown")
        ));
        lines.push(format!(
            "Published: {}",
            article
                .published_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "N/A".to_string())
        ));
        lines.push(article.body_text().to_string());
        lines.push(format!("Read original: {}", article.url));
        return lines;
    }
    if let Some(detail_error) = view.detail_error.as_deref() {
        lines.push(format!("! {detail_error}"));
    }

    match view.fetch_state {
        FetchState::Pending => lines.push("Loading...".to_string()),
        _ if view.show_empty_notice => lines.push("No articles found.".to_string()),
        _ => {}
    }

    for (index, article) in view.visible_items.iter().enumerate() {
        let mut line = format!("{:>2}. {}", index + 1, article.title);
        if let Some(source) = article.source_name() {
            line.push_str(&format!(" | {source}"));
        }
        if let Some(published) = article.published_at {
            line.push_str(&format!(" | {}", published.format("%Y-%m-%d")));
        }
        lines.push(line);
        lines.push(format!("    {}", description_preview(article.description.as_deref())));
    }

    if view.total_pages > 0 && view.fetch_state != FetchState::Pending {
        lines.push(page_strip(view));
    }
    lines
}

fn header_line(view: &AppViewModel) -> String {
    let filters = &view.filters;
    let mut header = format!("[{}]", filters.endpoint_kind);
    if !filters.free_text.trim().is_empty() {
        header.push_str(&format!(" q={:?}", filters.free_text.trim()));
    }
    if filters.endpoint_kind == EndpointKind::TopHeadlines {
        if let Some(category) = filters.category.as_deref() {
            header.push_str(&format!(" category={category}"));
        }
    } else {
        if let Some(from) = filters.date_from {
            header.push_str(&format!(" from={from}"));
        }
        if let Some(to) = filters.date_to {
            header.push_str(&format!(" to={to}"));
        }
    }
    if let Some(source) = filters.source.as_deref() {
        header.push_str(&format!(" source={source}"));
    }
    header.push_str(&format!(" ({} results)", view.result_count));
    header
}

fn description_preview(description: Option<&str>) -> String {
    match description {
        Some(text) => {
            let preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{preview}...")
        }
        None => "No description.".to_string(),
    }
}

fn page_strip(view: &AppViewModel) -> String {
    let pages: Vec<String> = view
        .page_buttons
        .iter()
        .map(|button| match button {
            PageButton::Page(n) if *n == view.current_page => format!("[{n}]"),
            PageButton::Page(n) => n.to_string(),
            PageButton::Ellipsis => "...".to_string(),
        })
        .collect();
    format!("< {} >", pages.join(" "))
}

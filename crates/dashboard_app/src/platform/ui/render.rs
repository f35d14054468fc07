use dashboard_core::{
    AppViewModel, ArticleRowView, BackfillState, LoadState, RewritePanelView, SelectRequest,
    PROGRESS_MAX,
};

const BAR_WIDTH: usize = 20;
const TITLE_WIDTH: usize = 48;

/// Renders the view model as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("News Articles ({})", view.article_count));
    match view.load {
        LoadState::NotStarted | LoadState::Loading if view.rows.is_empty() => {
            lines.push("  Loading articles...".to_string());
        }
        _ if view.rows.is_empty() => lines.push("  No articles.".to_string()),
        _ => lines.extend(view.rows.iter().map(format_row)),
    }

    if view.loading || view.progress > 0 {
        lines.push(String::new());
        lines.push(format!(
            "Progress: {} {:>3}%",
            progress_bar(view.progress),
            view.progress
        ));
    }

    if let Some(panel) = &view.panel {
        lines.push(String::new());
        lines.extend(format_panel(panel));
    }

    lines.push(String::new());
    lines.push(status_line(view));
    lines
}

pub fn progress_bar(percent: u8) -> String {
    let percent = usize::from(percent.min(PROGRESS_MAX));
    let filled = percent * BAR_WIDTH / usize::from(PROGRESS_MAX);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn format_row(row: &ArticleRowView) -> String {
    let control = if row.enabled {
        format!("[{}]", row.label)
    } else {
        format!("({})", row.label)
    };
    format!(
        "  #{id:<6} {title:<width$} {control}",
        id = row.id,
        title = truncate(&row.title, TITLE_WIDTH),
        width = TITLE_WIDTH,
    )
}

fn format_panel(panel: &RewritePanelView) -> Vec<String> {
    let request = match &panel.request {
        SelectRequest::InFlight => "sending...".to_string(),
        SelectRequest::Acknowledged { message } => format!("accepted ({message})"),
        SelectRequest::Failed { reason } => format!("failed ({reason})"),
    };
    vec![
        format!("--- Rewrite: article #{} ---", panel.article_id),
        format!("Original:  {}", panel.original),
        format!(
            "Rewritten: {}",
            panel.rewritten.as_deref().unwrap_or("(waiting for rewrite...)")
        ),
        format!("Request:   {request}"),
    ]
}

fn status_line(view: &AppViewModel) -> String {
    let backfill = match view.backfill {
        BackfillState::Disabled => None,
        BackfillState::Idle => Some("backfill pending".to_string()),
        BackfillState::Running => Some("backfill running".to_string()),
        BackfillState::Finished { attempted, failed } => Some(format!(
            "backfill {} updated, {} failed",
            attempted.saturating_sub(failed),
            failed
        )),
        BackfillState::Aborted => Some("backfill aborted".to_string()),
    };

    let mut parts = Vec::new();
    if let Some(notice) = &view.notice {
        parts.push(notice.clone());
    }
    if let Some(backfill) = backfill {
        parts.push(backfill);
    }
    if parts.is_empty() {
        parts.push("Ready".to_string());
    }
    format!("Status: {}", parts.join(" | "))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

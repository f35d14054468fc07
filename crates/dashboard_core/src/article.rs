use std::fmt;

/// Shown in the rewrite panel when the article has no body.
pub const CONTENT_NOT_AVAILABLE: &str = "Content not available";
/// Written to the backend by the backfill pass for articles without content.
pub const DEFAULT_BACKFILL_CONTENT: &str = "This is default content";
/// Display-only text shown once the simulated rewrite reaches 100%.
pub const REWRITTEN_PLACEHOLDER: &str =
    "This is the AI-rewritten version of the article. The final text will be available once the rewrite completes.";
/// Replaces local content after a select acknowledgement in the overwrite variant.
pub const SELECTED_CONTENT_PLACEHOLDER: &str = "Rewriting in progress...";

/// Opaque article identifier, kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<u64> for ArticleId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RewriteStatus {
    #[default]
    NotSelected,
    Pending,
    Completed,
    /// A status string the dashboard does not know; never triggerable.
    Other(String),
}

impl RewriteStatus {
    /// Maps a backend `rewrite_status` string.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "not_selected" => Self::NotSelected,
            "pending" | "selected_for_rewriting" => Self::Pending,
            "completed" | "rewritten" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Maps the boolean `selected_for_rewrite` variant.
    pub fn from_selected_flag(selected: bool) -> Self {
        if selected {
            Self::Pending
        } else {
            Self::NotSelected
        }
    }

    pub fn is_triggerable(&self) -> bool {
        matches!(self, Self::NotSelected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Rewriting...",
            Self::Completed => "Rewritten",
            Self::NotSelected | Self::Other(_) => "Rewrite",
        }
    }
}

/// Local mirror of a backend article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: Option<String>,
    pub status: RewriteStatus,
}

impl Article {
    /// True when content is absent or empty.
    pub fn is_missing_content(&self) -> bool {
        self.content.as_deref().map_or(true, str::is_empty)
    }

    pub fn display_content(&self) -> &str {
        match self.content.as_deref() {
            Some(content) if !content.is_empty() => content,
            _ => CONTENT_NOT_AVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_statuses_map_to_known_variants() {
        assert_eq!(RewriteStatus::from_wire("not_selected"), RewriteStatus::NotSelected);
        assert_eq!(
            RewriteStatus::from_wire("selected_for_rewriting"),
            RewriteStatus::Pending
        );
        assert_eq!(RewriteStatus::from_wire("rewritten"), RewriteStatus::Completed);
        assert_eq!(
            RewriteStatus::from_wire("archived"),
            RewriteStatus::Other("archived".to_string())
        );
    }

    #[test]
    fn only_not_selected_is_triggerable() {
        assert!(RewriteStatus::NotSelected.is_triggerable());
        assert!(!RewriteStatus::Pending.is_triggerable());
        assert!(!RewriteStatus::Completed.is_triggerable());
        assert!(!RewriteStatus::Other("x".into()).is_triggerable());
        assert_eq!(RewriteStatus::Other("x".into()).label(), "Rewrite");
    }

    #[test]
    fn empty_content_counts_as_missing() {
        let mut article = Article {
            id: ArticleId::from(1),
            title: "A".into(),
            content: Some(String::new()),
            status: RewriteStatus::NotSelected,
        };
        assert!(article.is_missing_content());
        assert_eq!(article.display_content(), CONTENT_NOT_AVAILABLE);

        article.content = Some("body".into());
        assert!(!article.is_missing_content());
        assert_eq!(article.display_content(), "body");
    }
}

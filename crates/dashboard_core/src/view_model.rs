use crate::{ArticleId, BackfillState, LoadState, RewriteStatus, SelectRequest};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub rows: Vec<ArticleRowView>,
    pub article_count: usize,
    pub loading: bool,
    pub progress: u8,
    pub panel: Option<RewritePanelView>,
    pub load: LoadState,
    pub backfill: BackfillState,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRowView {
    pub id: ArticleId,
    pub title: String,
    pub status: RewriteStatus,
    pub label: &'static str,
    /// Whether the Rewrite control accepts clicks.
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePanelView {
    pub article_id: ArticleId,
    pub original: String,
    pub rewritten: Option<String>,
    pub request: SelectRequest,
}

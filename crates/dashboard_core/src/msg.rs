use crate::{Article, ArticleId, SimulationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Dashboard mounted; triggers the initial list load once.
    AppStarted,
    /// User asked for a fresh copy of the article list.
    ReloadRequested,
    /// Engine delivered a well-formed article list.
    ArticlesLoaded(Vec<Article>),
    /// Engine could not load the list (transport or malformed payload).
    ArticlesLoadFailed { reason: String },
    /// User clicked Rewrite on a row.
    RewriteClicked(ArticleId),
    /// Timer tick for a progress simulation.
    ProgressTick { simulation: SimulationId },
    /// Backend acknowledged the select request.
    SelectAcknowledged { article_id: ArticleId, message: String },
    /// Select request failed or was rejected.
    SelectFailed { article_id: ArticleId, reason: String },
    /// Backfill wrote default content for one article.
    ContentBackfilled { article_id: ArticleId, content: String },
    /// Backfill update failed for one article.
    ContentBackfillFailed { article_id: ArticleId, reason: String },
    /// Backfill pass finished.
    BackfillFinished { attempted: usize, failed: usize },
    /// Backfill pass could not re-fetch the list.
    BackfillAborted { reason: String },
    /// User closed the rewrite panel.
    RewritePanelClosed,
    /// User asked to quit.
    CloseRequested,
    /// UI/render tick to coalesce rendering.
    Tick,
}

use crate::{ArticleId, SimulationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadArticles,
    SelectForRewrite {
        article_id: ArticleId,
    },
    StartProgress {
        simulation: SimulationId,
        interval_ms: u64,
        ticks: u32,
    },
    CancelProgress {
        simulation: SimulationId,
    },
    BackfillMissingContent {
        content: String,
    },
    Quit,
}

//! Dashboard core: pure state machine and view-model helpers.
mod article;
mod effect;
mod msg;
mod progress;
mod state;
mod update;
mod view_model;

pub use article::{
    Article, ArticleId, RewriteStatus, CONTENT_NOT_AVAILABLE, DEFAULT_BACKFILL_CONTENT,
    REWRITTEN_PLACEHOLDER, SELECTED_CONTENT_PLACEHOLDER,
};
pub use effect::Effect;
pub use msg::Msg;
pub use progress::{
    ticks_to_finish, Simulation, SimulationId, TickOutcome, PROGRESS_MAX, PROGRESS_STEP,
    TICK_INTERVAL_MS,
};
pub use state::{AppState, BackfillState, CoreSettings, LoadState, RewritePanel, SelectRequest};
pub use update::update;
pub use view_model::{AppViewModel, ArticleRowView, RewritePanelView};

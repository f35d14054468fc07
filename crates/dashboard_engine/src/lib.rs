//! Dashboard engine: backend API client and effect execution.
mod api;
mod backfill;
mod decode;
mod engine;
mod ticker;
mod types;

pub use api::{
    ApiSettings, ArticleApi, ChannelEventSink, EventSink, ReqwestArticleApi, DEFAULT_API_URL,
};
pub use backfill::run_backfill;
pub use decode::{decode_article_list, decode_select_ack};
pub use engine::EngineHandle;
pub use ticker::run_ticker;
pub use types::{
    ApiError, ArticleRecord, BackfillSummary, EngineError, EngineEvent, FailureKind, SelectAck,
    SimulationId, WireId,
};

use dashboard_logging::{dash_info, dash_warn};
use futures_util::future::join_all;

use crate::{ApiError, ArticleApi, BackfillSummary, EngineEvent, EventSink};

/// Re-fetches the list and writes `content` to every article without a body.
///
/// Updates run concurrently and independently: each outcome is logged and
/// emitted as its own `ContentUpdated` event, and a failure never stops the
/// others. Only a failed re-fetch aborts the pass.
pub async fn run_backfill(
    api: &dyn ArticleApi,
    content: &str,
    sink: &dyn EventSink,
) -> Result<BackfillSummary, ApiError> {
    let records = api.list_articles().await?;
    let targets: Vec<String> = records
        .iter()
        .filter(|record| record.is_missing_content())
        .map(|record| record.article_id())
        .collect();

    if targets.is_empty() {
        dash_info!("Backfill: every article already has content");
        return Ok(BackfillSummary::default());
    }
    dash_info!("Backfill: updating {} articles without content", targets.len());

    let updates = targets.into_iter().map(move |article_id| async move {
        let result = api.update_content(&article_id, content).await;
        match &result {
            Ok(()) => dash_info!("Backfill: article {} updated", article_id),
            Err(err) => dash_warn!("Backfill: article {} failed: {}", article_id, err),
        }
        let failed = result.is_err();
        sink.emit(EngineEvent::ContentUpdated {
            article_id,
            content: content.to_string(),
            result,
        });
        failed
    });

    let outcomes = join_all(updates).await;
    Ok(BackfillSummary {
        attempted: outcomes.len(),
        failed: outcomes.into_iter().filter(|failed| *failed).count(),
    })
}

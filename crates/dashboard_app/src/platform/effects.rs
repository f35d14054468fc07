use std::sync::{mpsc, Arc};
use std::time::Duration;

use dashboard_core::{Article, ArticleId, Effect, Msg, RewriteStatus};
use dashboard_engine::{
    ApiSettings, ArticleRecord, EngineError, EngineEvent, EngineHandle, EventSink,
};
use dashboard_logging::{dash_debug, dash_info};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, EngineError> {
        dash_info!("Using articles API at {}", settings.base_url);
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { tx: msg_tx }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadArticles => {
                    dash_debug!("LoadArticles");
                    self.engine.load_articles();
                }
                Effect::SelectForRewrite { article_id } => {
                    dash_debug!("SelectForRewrite article_id={}", article_id);
                    self.engine.select_for_rewrite(article_id.as_str());
                }
                Effect::StartProgress {
                    simulation,
                    interval_ms,
                    ticks,
                } => {
                    dash_debug!(
                        "StartProgress simulation={} interval_ms={} ticks={}",
                        simulation,
                        interval_ms,
                        ticks
                    );
                    self.engine
                        .start_progress(simulation, Duration::from_millis(interval_ms), ticks);
                }
                Effect::CancelProgress { simulation } => {
                    dash_debug!("CancelProgress simulation={}", simulation);
                    self.engine.cancel_progress(simulation);
                }
                Effect::BackfillMissingContent { content } => {
                    dash_debug!("BackfillMissingContent");
                    self.engine.backfill_missing_content(content);
                }
                Effect::Quit => {
                    // handled by the main loop via `AppState::is_quitting`
                }
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}

/// Forwards engine events into the app's message queue.
struct MsgSink {
    tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(map_event(event));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ArticlesLoaded(Ok(records)) => {
            Msg::ArticlesLoaded(records.into_iter().map(map_record).collect())
        }
        EngineEvent::ArticlesLoaded(Err(err)) => Msg::ArticlesLoadFailed {
            reason: err.to_string(),
        },
        EngineEvent::SelectCompleted { article_id, result } => match result {
            Ok(ack) => Msg::SelectAcknowledged {
                article_id: ArticleId::new(article_id),
                message: ack.message,
            },
            Err(err) => Msg::SelectFailed {
                article_id: ArticleId::new(article_id),
                reason: err.to_string(),
            },
        },
        EngineEvent::ContentUpdated {
            article_id,
            content,
            result,
        } => match result {
            Ok(()) => Msg::ContentBackfilled {
                article_id: ArticleId::new(article_id),
                content,
            },
            Err(err) => Msg::ContentBackfillFailed {
                article_id: ArticleId::new(article_id),
                reason: err.to_string(),
            },
        },
        EngineEvent::BackfillCompleted(Ok(summary)) => Msg::BackfillFinished {
            attempted: summary.attempted,
            failed: summary.failed,
        },
        EngineEvent::BackfillCompleted(Err(err)) => Msg::BackfillAborted {
            reason: err.to_string(),
        },
        EngineEvent::ProgressTick { simulation } => Msg::ProgressTick { simulation },
    }
}

fn map_record(record: ArticleRecord) -> Article {
    let status = match (record.rewrite_status.as_deref(), record.selected_for_rewrite) {
        (Some(raw), _) => RewriteStatus::from_wire(raw),
        (None, Some(selected)) => RewriteStatus::from_selected_flag(selected),
        (None, None) => RewriteStatus::NotSelected,
    };
    Article {
        id: ArticleId::new(record.article_id()),
        title: record.title,
        content: record.content,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_engine::{ApiError, SelectAck, WireId};
    use pretty_assertions::assert_eq;

    fn record(id: u64, status: Option<&str>, selected: Option<bool>) -> ArticleRecord {
        ArticleRecord {
            id: WireId::Number(id.into()),
            title: format!("Article {id}"),
            content: None,
            rewrite_status: status.map(ToOwned::to_owned),
            selected_for_rewrite: selected,
        }
    }

    #[test]
    fn status_prefers_rewrite_status_over_flag() {
        let article = map_record(record(1, Some("completed"), Some(false)));
        assert_eq!(article.status, RewriteStatus::Completed);
        assert_eq!(article.id, ArticleId::from(1));

        let article = map_record(record(2, None, Some(true)));
        assert_eq!(article.status, RewriteStatus::Pending);

        let article = map_record(record(3, None, None));
        assert_eq!(article.status, RewriteStatus::NotSelected);
    }

    #[test]
    fn loaded_records_keep_order() {
        let msg = map_event(EngineEvent::ArticlesLoaded(Ok(vec![
            record(2, Some("not_selected"), None),
            record(1, Some("pending"), None),
        ])));
        let articles = match msg {
            Msg::ArticlesLoaded(articles) => articles,
            other => panic!("expected ArticlesLoaded, got {other:?}"),
        };
        let ids: Vec<_> = articles.iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn select_outcomes_map_to_messages() {
        let msg = map_event(EngineEvent::SelectCompleted {
            article_id: "5".to_string(),
            result: Ok(SelectAck {
                message: "ok".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::SelectAcknowledged {
                article_id: ArticleId::from(5),
                message: "ok".to_string()
            }
        );

        let msg = map_event(EngineEvent::SelectCompleted {
            article_id: "5".to_string(),
            result: Err(ApiError {
                kind: dashboard_engine::FailureKind::HttpStatus(500),
                message: "500 Internal Server Error".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::SelectFailed {
                article_id: ArticleId::from(5),
                reason: "http status 500: 500 Internal Server Error".to_string()
            }
        );
    }
}

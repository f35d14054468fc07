use dashboard_logging::{dash_debug, dash_error, dash_info, dash_warn};

use crate::progress::{ticks_to_finish, TickOutcome, TICK_INTERVAL_MS};
use crate::{AppState, BackfillState, Effect, LoadState, Msg, DEFAULT_BACKFILL_CONTENT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted => {
            if state.load_state() == LoadState::NotStarted {
                state.begin_load();
                vec![Effect::LoadArticles]
            } else {
                Vec::new()
            }
        }
        Msg::ReloadRequested => {
            if state.load_state() == LoadState::Loading {
                Vec::new()
            } else {
                state.begin_load();
                vec![Effect::LoadArticles]
            }
        }
        Msg::ArticlesLoaded(articles) => {
            dash_debug!("Adopting {} articles", articles.len());
            state.replace_articles(articles);
            if state.claim_backfill() {
                vec![Effect::BackfillMissingContent {
                    content: DEFAULT_BACKFILL_CONTENT.to_string(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ArticlesLoadFailed { reason } => {
            // Never keep stale rows next to a failed load.
            state.clear_articles();
            state.set_notice(format!("Could not load articles: {reason}"));
            Vec::new()
        }
        Msg::RewriteClicked(article_id) => {
            let Some(article) = state.article(&article_id) else {
                dash_error!("Rewrite requested for unknown article {}", article_id);
                return (state, Vec::new());
            };
            if !article.status.is_triggerable() || state.is_in_flight(&article_id) {
                dash_debug!("Rewrite control for article {} is inert", article_id);
                return (state, Vec::new());
            }

            let original = article.display_content().to_string();
            let (simulation, superseded) = state.start_rewrite(&article_id, original);
            dash_info!(
                "Rewrite triggered for article {} (simulation {})",
                article_id,
                simulation
            );

            let mut effects = Vec::with_capacity(3);
            if let Some(previous) = superseded {
                effects.push(Effect::CancelProgress {
                    simulation: previous,
                });
            }
            effects.push(Effect::StartProgress {
                simulation,
                interval_ms: TICK_INTERVAL_MS,
                ticks: ticks_to_finish(),
            });
            effects.push(Effect::SelectForRewrite { article_id });
            effects
        }
        Msg::ProgressTick { simulation } => match state.advance_simulation(simulation) {
            TickOutcome::Finished => vec![Effect::CancelProgress { simulation }],
            TickOutcome::Advanced | TickOutcome::Ignored => Vec::new(),
        },
        Msg::SelectAcknowledged {
            article_id,
            message,
        } => {
            if !state.acknowledge_select(&article_id, message) {
                dash_warn!(
                    "Select acknowledged for article {} which is no longer listed",
                    article_id
                );
            }
            Vec::new()
        }
        Msg::SelectFailed { article_id, reason } => {
            state.fail_select(&article_id, reason.clone());
            state.set_notice(format!(
                "Rewrite request for article {article_id} failed: {reason}"
            ));
            // Reconcile with the backend's canonical status instead of retrying.
            if state.load_state() == LoadState::Loading {
                Vec::new()
            } else {
                state.begin_load();
                vec![Effect::LoadArticles]
            }
        }
        Msg::ContentBackfilled {
            article_id,
            content,
        } => {
            if !state.patch_content(&article_id, content) {
                dash_debug!("Backfilled article {} is not listed locally", article_id);
            }
            Vec::new()
        }
        Msg::ContentBackfillFailed { article_id, reason } => {
            dash_debug!("Backfill for article {} left untouched: {}", article_id, reason);
            Vec::new()
        }
        Msg::BackfillFinished { attempted, failed } => {
            state.finish_backfill(BackfillState::Finished { attempted, failed });
            if failed > 0 {
                state.set_notice(format!(
                    "Backfill updated {} of {} articles",
                    attempted.saturating_sub(failed),
                    attempted
                ));
            }
            Vec::new()
        }
        Msg::BackfillAborted { reason } => {
            state.finish_backfill(BackfillState::Aborted);
            state.set_notice(format!("Backfill aborted: {reason}"));
            Vec::new()
        }
        Msg::RewritePanelClosed => match state.close_panel() {
            Some(simulation) => vec![Effect::CancelProgress { simulation }],
            None => Vec::new(),
        },
        Msg::CloseRequested => {
            let mut effects = Vec::with_capacity(2);
            if let Some(simulation) = state.abandon_simulation() {
                effects.push(Effect::CancelProgress { simulation });
            }
            state.request_quit();
            effects.push(Effect::Quit);
            effects
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

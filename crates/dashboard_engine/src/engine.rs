use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use dashboard_logging::{dash_debug, dash_info, dash_warn};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiSettings, ArticleApi, EventSink, ReqwestArticleApi};
use crate::backfill::run_backfill;
use crate::ticker::run_ticker;
use crate::{EngineError, EngineEvent, SimulationId};

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

enum EngineCommand {
    LoadArticles,
    SelectForRewrite {
        article_id: String,
    },
    BackfillMissingContent {
        content: String,
    },
    StartProgress {
        simulation: SimulationId,
        period: Duration,
        ticks: u32,
    },
    CancelProgress {
        simulation: SimulationId,
    },
    Shutdown,
}

/// Owns the engine thread and its tokio runtime.
///
/// Dropping the handle cancels every running ticker and stops the thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let api = ReqwestArticleApi::new(settings)?;
        Self::with_api(Arc::new(api), sink)
    }

    pub fn with_api(
        api: Arc<dyn ArticleApi>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("dashboard-io")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("dashboard-engine".to_string())
            .spawn(move || run_worker(runtime, api, sink, cmd_rx))?;

        Ok(Self {
            cmd_tx,
            worker: Some(worker),
        })
    }

    pub fn load_articles(&self) {
        self.send(EngineCommand::LoadArticles);
    }

    pub fn select_for_rewrite(&self, article_id: impl Into<String>) {
        self.send(EngineCommand::SelectForRewrite {
            article_id: article_id.into(),
        });
    }

    pub fn backfill_missing_content(&self, content: impl Into<String>) {
        self.send(EngineCommand::BackfillMissingContent {
            content: content.into(),
        });
    }

    pub fn start_progress(&self, simulation: SimulationId, period: Duration, ticks: u32) {
        self.send(EngineCommand::StartProgress {
            simulation,
            period,
            ticks,
        });
    }

    pub fn cancel_progress(&self, simulation: SimulationId) {
        self.send(EngineCommand::CancelProgress { simulation });
    }

    /// Cancels outstanding work and waits for the engine thread to exit.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        self.send(EngineCommand::Shutdown);
        if worker.join().is_err() {
            dash_warn!("Engine thread panicked during shutdown");
        }
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            dash_debug!("Engine command dropped: engine already stopped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(
    runtime: Runtime,
    api: Arc<dyn ArticleApi>,
    sink: Arc<dyn EventSink>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
) {
    let root = CancellationToken::new();
    let mut tickers: HashMap<SimulationId, CancellationToken> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        tickers.retain(|_, token| !token.is_cancelled());
        match command {
            EngineCommand::Shutdown => break,
            EngineCommand::StartProgress {
                simulation,
                period,
                ticks,
            } => {
                let token = root.child_token();
                if let Some(previous) = tickers.insert(simulation, token.clone()) {
                    previous.cancel();
                }
                let sink = sink.clone();
                runtime.spawn(async move {
                    let emitted =
                        run_ticker(simulation, period, ticks, token.clone(), sink.as_ref()).await;
                    dash_debug!("Simulation {} stopped after {} ticks", simulation, emitted);
                    token.cancel();
                });
            }
            EngineCommand::CancelProgress { simulation } => {
                if let Some(token) = tickers.remove(&simulation) {
                    token.cancel();
                }
            }
            request => {
                let api = api.clone();
                let sink = sink.clone();
                let token = root.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {}
                        _ = handle_request(api.as_ref(), request, sink.as_ref()) => {}
                    }
                });
            }
        }
    }

    root.cancel();
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    dash_debug!("Engine thread stopped");
}

async fn handle_request(api: &dyn ArticleApi, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::LoadArticles => {
            let result = api.list_articles().await;
            match &result {
                Ok(records) => dash_info!("Loaded {} articles", records.len()),
                Err(err) => dash_warn!("Failed to load articles: {}", err),
            }
            sink.emit(EngineEvent::ArticlesLoaded(result));
        }
        EngineCommand::SelectForRewrite { article_id } => {
            let result = api.select_for_rewrite(&article_id).await;
            match &result {
                Ok(ack) => dash_info!("Article {} selected: {}", article_id, ack.message),
                Err(err) => dash_warn!("Selecting article {} failed: {}", article_id, err),
            }
            sink.emit(EngineEvent::SelectCompleted { article_id, result });
        }
        EngineCommand::BackfillMissingContent { content } => {
            let result = run_backfill(api, &content, sink).await;
            match &result {
                Ok(summary) => dash_info!(
                    "Backfill finished: {} attempted, {} failed",
                    summary.attempted,
                    summary.failed
                ),
                Err(err) => dash_warn!("Backfill aborted: {}", err),
            }
            sink.emit(EngineEvent::BackfillCompleted(result));
        }
        EngineCommand::StartProgress { .. }
        | EngineCommand::CancelProgress { .. }
        | EngineCommand::Shutdown => {}
    }
}

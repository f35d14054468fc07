use std::collections::BTreeSet;

use crate::progress::{Simulation, SimulationId, TickOutcome};
use crate::view_model::{AppViewModel, ArticleRowView, RewritePanelView};
use crate::{Article, ArticleId, RewriteStatus, REWRITTEN_PLACEHOLDER};

/// Behaviour switches chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoreSettings {
    /// Run the missing-content backfill pass after the first load.
    pub backfill_missing_content: bool,
    /// Replace local content with a placeholder once a select is acknowledged.
    pub overwrite_content_on_select: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackfillState {
    #[default]
    Disabled,
    Idle,
    Running,
    Finished {
        attempted: usize,
        failed: usize,
    },
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectRequest {
    InFlight,
    Acknowledged { message: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePanel {
    pub article_id: ArticleId,
    pub original: String,
    pub rewritten: Option<String>,
    pub request: SelectRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: CoreSettings,
    articles: Vec<Article>,
    load: LoadState,
    backfill: BackfillState,
    simulation: Option<Simulation>,
    next_simulation_id: SimulationId,
    panel: Option<RewritePanel>,
    in_flight: BTreeSet<ArticleId>,
    notice: Option<String>,
    quitting: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(CoreSettings::default())
    }

    pub fn with_settings(settings: CoreSettings) -> Self {
        let backfill = if settings.backfill_missing_content {
            BackfillState::Idle
        } else {
            BackfillState::Disabled
        };
        Self {
            settings,
            backfill,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> CoreSettings {
        self.settings
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn article(&self, id: &ArticleId) -> Option<&Article> {
        self.articles.iter().find(|article| &article.id == id)
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn backfill_state(&self) -> BackfillState {
        self.backfill
    }

    /// True only while a progress simulation runs.
    pub fn is_loading(&self) -> bool {
        self.simulation
            .as_ref()
            .is_some_and(|sim| !sim.is_finished())
    }

    pub fn progress(&self) -> u8 {
        self.simulation.as_ref().map_or(0, Simulation::percent)
    }

    pub fn running_simulation(&self) -> Option<SimulationId> {
        self.simulation
            .as_ref()
            .filter(|sim| !sim.is_finished())
            .map(|sim| sim.id)
    }

    pub fn panel(&self) -> Option<&RewritePanel> {
        self.panel.as_ref()
    }

    pub fn is_in_flight(&self, id: &ArticleId) -> bool {
        self.in_flight.contains(id)
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// True when a rewrite panel exists, its simulation finished and the
    /// select request resolved.
    pub fn rewrite_settled(&self) -> bool {
        match &self.panel {
            Some(panel) => {
                !self.is_loading() && !matches!(panel.request, SelectRequest::InFlight)
            }
            None => false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            rows: self
                .articles
                .iter()
                .map(|article| ArticleRowView {
                    id: article.id.clone(),
                    title: article.title.clone(),
                    status: article.status.clone(),
                    label: article.status.label(),
                    enabled: article.status.is_triggerable()
                        && !self.in_flight.contains(&article.id),
                })
                .collect(),
            article_count: self.articles.len(),
            loading: self.is_loading(),
            progress: self.progress(),
            panel: self.panel.as_ref().map(|panel| RewritePanelView {
                article_id: panel.article_id.clone(),
                original: panel.original.clone(),
                rewritten: panel.rewritten.clone(),
                request: panel.request.clone(),
            }),
            load: self.load,
            backfill: self.backfill,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.mark_dirty();
    }

    pub(crate) fn begin_load(&mut self) {
        self.load = LoadState::Loading;
        self.mark_dirty();
    }

    pub(crate) fn replace_articles(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        self.load = LoadState::Loaded;
        self.notice = None;
        self.mark_dirty();
    }

    pub(crate) fn clear_articles(&mut self) {
        self.articles.clear();
        self.load = LoadState::Failed;
        self.mark_dirty();
    }

    /// Claims the one-shot backfill pass; false when disabled or already claimed.
    pub(crate) fn claim_backfill(&mut self) -> bool {
        if self.backfill != BackfillState::Idle {
            return false;
        }
        self.backfill = BackfillState::Running;
        self.mark_dirty();
        true
    }

    pub(crate) fn finish_backfill(&mut self, state: BackfillState) {
        self.backfill = state;
        self.mark_dirty();
    }

    pub(crate) fn patch_content(&mut self, id: &ArticleId, content: String) -> bool {
        match self.articles.iter_mut().find(|article| &article.id == id) {
            Some(article) => {
                article.content = Some(content);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Opens the panel and starts a fresh simulation, returning the new id
    /// and the one it superseded.
    pub(crate) fn start_rewrite(
        &mut self,
        id: &ArticleId,
        original: String,
    ) -> (SimulationId, Option<SimulationId>) {
        let superseded = self.running_simulation();
        self.next_simulation_id += 1;
        let simulation = self.next_simulation_id;
        self.simulation = Some(Simulation::new(simulation, id.clone()));
        self.panel = Some(RewritePanel {
            article_id: id.clone(),
            original,
            rewritten: None,
            request: SelectRequest::InFlight,
        });
        self.in_flight.insert(id.clone());
        self.mark_dirty();
        (simulation, superseded)
    }

    pub(crate) fn advance_simulation(&mut self, simulation: SimulationId) -> TickOutcome {
        let outcome = match self.simulation.as_mut() {
            Some(sim) if sim.id == simulation => sim.advance(),
            _ => return TickOutcome::Ignored,
        };
        if outcome == TickOutcome::Finished {
            if let Some(panel) = self.panel.as_mut() {
                panel.rewritten = Some(REWRITTEN_PLACEHOLDER.to_string());
            }
        }
        if outcome != TickOutcome::Ignored {
            self.mark_dirty();
        }
        outcome
    }

    /// Stops the running simulation without touching progress.
    pub(crate) fn abandon_simulation(&mut self) -> Option<SimulationId> {
        let running = self.running_simulation()?;
        self.simulation = None;
        self.mark_dirty();
        Some(running)
    }

    pub(crate) fn close_panel(&mut self) -> Option<SimulationId> {
        let running = self.abandon_simulation();
        if self.panel.take().is_some() {
            self.mark_dirty();
        }
        running
    }

    /// Marks the article pending after an acknowledgement. Never downgrades
    /// a completed article.
    pub(crate) fn acknowledge_select(&mut self, id: &ArticleId, message: String) -> bool {
        self.in_flight.remove(id);
        self.resolve_panel(id, SelectRequest::Acknowledged { message });
        let overwrite = self.settings.overwrite_content_on_select;
        let Some(article) = self.articles.iter_mut().find(|article| &article.id == id) else {
            return false;
        };
        if article.status == RewriteStatus::NotSelected {
            article.status = RewriteStatus::Pending;
        }
        if overwrite {
            article.content = Some(crate::SELECTED_CONTENT_PLACEHOLDER.to_string());
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn fail_select(&mut self, id: &ArticleId, reason: String) {
        self.in_flight.remove(id);
        self.resolve_panel(id, SelectRequest::Failed { reason });
        self.mark_dirty();
    }

    fn resolve_panel(&mut self, id: &ArticleId, request: SelectRequest) {
        if let Some(panel) = self.panel.as_mut().filter(|panel| &panel.article_id == id) {
            panel.request = request;
        }
    }

    pub(crate) fn request_quit(&mut self) {
        self.quitting = true;
        self.mark_dirty();
    }
}

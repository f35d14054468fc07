use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use dashboard_core::{update, AppState, ArticleId, LoadState, Msg};
use dashboard_logging::{dash_info, dash_warn};

use super::effects::EffectRunner;
use super::input;
use super::ui;
use crate::cli::{DashboardConfig, RunMode};

const RENDER_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app(config: DashboardConfig) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut runner = EffectRunner::new(config.api.clone(), msg_tx.clone())?;

    if config.mode == RunMode::Watch {
        println!("{}", input::HELP);
        input::spawn_stdin_reader(msg_tx.clone());
    }

    // Background tick to throttle rendering.
    let tick_tx = msg_tx.clone();
    thread::spawn(move || {
        while tick_tx.send(Msg::Tick).is_ok() {
            thread::sleep(RENDER_INTERVAL);
        }
    });
    drop(msg_tx);

    let mut session = Session::new(AppState::with_settings(config.core), config.mode);
    session.dispatch(Msg::AppStarted, &runner);

    while let Ok(msg) = msg_rx.recv() {
        let is_tick = matches!(msg, Msg::Tick);
        session.dispatch(msg, &runner);
        session.drive(&runner);

        if session.state.is_quitting() || session.is_done() {
            break;
        }
        if is_tick && session.mode == RunMode::Watch {
            session.render_if_dirty()?;
        }
    }

    session.render_final()?;
    runner.shutdown();
    dash_info!("Dashboard stopped");
    Ok(())
}

/// Owns the state machine for one run of the binary.
struct Session {
    state: AppState,
    mode: RunMode,
    rewrite_triggered: bool,
    done: bool,
}

impl Session {
    fn new(state: AppState, mode: RunMode) -> Self {
        Self {
            state,
            mode,
            rewrite_triggered: false,
            done: false,
        }
    }

    fn dispatch(&mut self, msg: Msg, runner: &EffectRunner) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        runner.enqueue(effects);
    }

    /// Advances the one-shot modes once their preconditions hold.
    fn drive(&mut self, runner: &EffectRunner) {
        let load = self.state.load_state();
        match self.mode.clone() {
            RunMode::Watch => {}
            RunMode::List => {
                if matches!(load, LoadState::Loaded | LoadState::Failed) {
                    self.done = true;
                }
            }
            RunMode::Rewrite { article_id } => match load {
                LoadState::Failed => self.done = true,
                LoadState::Loaded if !self.rewrite_triggered => {
                    self.rewrite_triggered = true;
                    self.trigger(article_id, runner);
                }
                _ if self.rewrite_triggered && self.state.rewrite_settled() => self.done = true,
                _ => {}
            },
        }
    }

    fn trigger(&mut self, article_id: ArticleId, runner: &EffectRunner) {
        self.dispatch(Msg::RewriteClicked(article_id.clone()), runner);
        let started = self
            .state
            .panel()
            .is_some_and(|panel| panel.article_id == article_id);
        if !started {
            dash_warn!("Article {} cannot be rewritten", article_id);
            eprintln!("Article {article_id} is unknown or already selected for rewrite");
            self.done = true;
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn render_if_dirty(&mut self) -> io::Result<()> {
        if !self.state.consume_dirty() {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        writeln!(out)?;
        for line in ui::render::render(&self.state.view()) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }

    fn render_final(&mut self) -> io::Result<()> {
        if self.mode == RunMode::Watch {
            return Ok(());
        }
        self.state.consume_dirty();
        let mut out = io::stdout().lock();
        for line in ui::render::render(&self.state.view()) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

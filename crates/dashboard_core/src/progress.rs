use crate::ArticleId;

/// Milliseconds between two simulated progress ticks.
pub const TICK_INTERVAL_MS: u64 = 500;
/// Percentage points added per tick.
pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_MAX: u8 = 100;

pub type SimulationId = u64;

/// Number of ticks needed to go from 0 to `PROGRESS_MAX`.
pub const fn ticks_to_finish() -> u32 {
    PROGRESS_MAX.div_ceil(PROGRESS_STEP) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    Finished,
    /// Tick for a simulation that already reached the end.
    Ignored,
}

/// Cosmetic progress run started by one rewrite trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    pub id: SimulationId,
    pub article_id: ArticleId,
    percent: u8,
}

impl Simulation {
    pub fn new(id: SimulationId, article_id: ArticleId) -> Self {
        Self {
            id,
            article_id,
            percent: 0,
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_finished(&self) -> bool {
        self.percent >= PROGRESS_MAX
    }

    pub fn advance(&mut self) -> TickOutcome {
        if self.is_finished() {
            return TickOutcome::Ignored;
        }
        self.percent = self.percent.saturating_add(PROGRESS_STEP).min(PROGRESS_MAX);
        if self.is_finished() {
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }
}

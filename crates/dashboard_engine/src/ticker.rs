use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, EventSink, SimulationId};

/// Emits `ticks` progress ticks for `simulation`, one every `period`.
///
/// Stops early once `token` is cancelled. Returns the number of ticks emitted.
pub async fn run_ticker(
    simulation: SimulationId,
    period: Duration,
    ticks: u32,
    token: CancellationToken,
    sink: &dyn EventSink,
) -> u32 {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut emitted = 0;
    while emitted < ticks {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                sink.emit(EngineEvent::ProgressTick { simulation });
                emitted += 1;
            }
        }
    }
    emitted
}

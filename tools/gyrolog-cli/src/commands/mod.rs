pub mod inspect;
pub mod record;
pub mod session;

use std::path::Path;
use std::sync::Arc;

use gyrolog_common::clock::{Clock, ManualClock, MonotonicClock};
use gyrolog_sensor_model::event::SensorEvent;

/// Time source for a replayed stream.
///
/// Paced replays run on the real monotonic clock. Unpaced replays follow
/// the captured `t` offsets, so recorded timestamps match the capture.
pub enum ReplayClock {
    Live(Arc<MonotonicClock>),
    Captured(ManualClock),
}

impl ReplayClock {
    pub fn new(realtime: bool) -> Self {
        if realtime {
            Self::Live(Arc::new(MonotonicClock::new()))
        } else {
            Self::Captured(ManualClock::new(0))
        }
    }

    pub fn shared(&self) -> Arc<dyn Clock> {
        match self {
            Self::Live(clock) => clock.clone() as Arc<dyn Clock>,
            Self::Captured(clock) => Arc::new(clock.clone()),
        }
    }

    /// Advance captured time to the event's offset before it is handled.
    pub fn observe(&self, event: &SensorEvent) {
        if let (Self::Captured(clock), Some(offset_ms)) = (self, event.offset_ms) {
            clock.set(offset_ms);
        }
    }
}

/// Print where an export landed, or that there was nothing to export.
pub fn save_export(
    export: Option<gyrolog_export::CsvExport>,
    output: &Path,
) -> anyhow::Result<()> {
    match export {
        Some(export) => {
            let path = export.save_to(output)?;
            println!("Exported {} samples to: {}", export.rows, path.display());
        }
        None => println!("Nothing to export: no samples recorded."),
    }
    Ok(())
}

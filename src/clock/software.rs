use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::core::{Error, Result};
use super::rtc::{TickSink, TimerPeripheral};
use super::source::TimerSetting;

/// Timer peripheral emulated with a tokio interval
///
/// Stands in for the hardware timer on a host. The tick period comes from
/// the configured prescaler setting (one second for every supported source)
/// unless overridden with [`SoftwareTimer::with_period`]. Missed ticks are
/// delivered in a burst so the counter never loses seconds.
#[derive(Debug, Default)]
pub struct SoftwareTimer {
    period_override: Option<Duration>,
    period: Option<Duration>,
    task: Option<JoinHandle<()>>,
}

impl SoftwareTimer {
    /// Creates a stopped timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stopped timer that ticks every `period` regardless of the
    /// clock source, e.g. to run a simulated clock faster than real time
    pub fn with_period(period: Duration) -> Self {
        SoftwareTimer {
            period_override: Some(period),
            period: None,
            task: None,
        }
    }

    /// Returns the configured tick period
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Returns whether the tick task is running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }
}

impl TimerPeripheral for SoftwareTimer {
    fn configure(&mut self, setting: &TimerSetting) -> Result<()> {
        let period = self.period_override.unwrap_or_else(|| setting.tick_period());
        if period.is_zero() {
            return Err(Error::clock_config("tick period must be nonzero"));
        }
        self.period = Some(period);
        Ok(())
    }

    fn enable(&mut self, sink: TickSink) -> Result<()> {
        let period = self
            .period
            .ok_or_else(|| Error::invalid_state("software timer enabled before configure"))?;
        let runtime = Handle::try_current()
            .map_err(|e| Error::invalid_state(format!("software timer needs a tokio runtime: {}", e)))?;

        self.disable();
        self.task = Some(runtime.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticks.tick().await;
                sink.signal();
            }
        }));
        debug!(?period, "software timer started");
        Ok(())
    }

    fn disable(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("software timer stopped");
        }
    }
}

impl Drop for SoftwareTimer {
    fn drop(&mut self) {
        self.disable();
    }
}

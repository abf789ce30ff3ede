use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{info, warn};

use crate::core::{Error, Result, StatusFlags};
use super::source::{ClockSource, TimerSetting};
use super::state::{RtcState, TickOutcome};

/// Hardware timer that produces the once-per-second periodic signal
pub trait TimerPeripheral {
    /// Returns whether the hardware can run from `source`
    fn supports(&self, source: &ClockSource) -> bool {
        let _ = source;
        true
    }

    /// Loads the prescaler setting. The timer stays stopped.
    fn configure(&mut self, setting: &TimerSetting) -> Result<()>;

    /// Starts the periodic signal. Each tick must call [`TickSink::signal`].
    fn enable(&mut self, sink: TickSink) -> Result<()>;

    /// Stops the periodic signal
    fn disable(&mut self);
}

/// Sleep/wake primitive the tick handler uses to resume the application
pub trait WakeSignal: Send + Sync {
    /// Requests that the application resume
    fn wake(&self);
}

impl WakeSignal for Notify {
    fn wake(&self) {
        self.notify_one();
    }
}

/// Never wakes anything, for applications that poll the status word
impl WakeSignal for () {
    fn wake(&self) {}
}

/// Target of the periodic signal: the shared state plus the wake primitive
#[derive(Clone)]
pub struct TickSink {
    state: Arc<RtcState>,
    waker: Arc<dyn WakeSignal>,
}

impl TickSink {
    /// Creates a sink over shared state and a wake primitive
    pub fn new(state: Arc<RtcState>, waker: Arc<dyn WakeSignal>) -> Self {
        TickSink { state, waker }
    }

    /// Handles one periodic signal
    pub fn signal(&self) -> TickOutcome {
        let outcome = self.state.on_tick();
        if outcome.wake {
            self.waker.wake();
        }
        outcome
    }

    /// Returns the shared state
    pub fn state(&self) -> &Arc<RtcState> {
        &self.state
    }
}

/// Real time clock: shared state wired to a timer peripheral
pub struct Rtc<T> {
    sink: TickSink,
    timer: T,
    setting: Option<TimerSetting>,
}

impl<T: TimerPeripheral> Rtc<T> {
    /// Creates a clock; the timer is not touched until [`Rtc::initialize`]
    pub fn new(state: Arc<RtcState>, timer: T, waker: Arc<dyn WakeSignal>) -> Self {
        Rtc {
            sink: TickSink::new(state, waker),
            timer,
            setting: None,
        }
    }

    /// Returns the shared state
    pub fn state(&self) -> &Arc<RtcState> {
        self.sink.state()
    }

    /// Returns the timer peripheral
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Returns the active timer setting, if initialization succeeded
    pub fn setting(&self) -> Option<&TimerSetting> {
        self.setting.as_ref()
    }

    /// Selects a clock source and starts the periodic signal
    ///
    /// Event flags are cleared first; the wake-on-tick bit, the counter and
    /// alarms are kept. On failure the general error flag is set and the
    /// timer is left disabled.
    pub fn initialize(&mut self, source: ClockSource) -> Result<TimerSetting> {
        let state = self.sink.state().clone();
        state.clear_status(
            StatusFlags::TICK
                | StatusFlags::ALARM0_TRIGGERED
                | StatusFlags::ALARM1_TRIGGERED
                | StatusFlags::GENERAL_ERROR,
        );
        self.timer.disable();
        self.setting = None;

        match self.start(source) {
            Ok(setting) => {
                info!(
                    ?source,
                    prescaler = setting.prescaler,
                    modulo = setting.modulo,
                    "clock initialized"
                );
                self.setting = Some(setting);
                Ok(setting)
            }
            Err(e) => {
                self.timer.disable();
                state.set_status(StatusFlags::GENERAL_ERROR);
                warn!(?source, error = %e, "clock initialization failed");
                Err(e)
            }
        }
    }

    fn start(&mut self, source: ClockSource) -> Result<TimerSetting> {
        if !self.timer.supports(&source) {
            return Err(Error::unsupported_clock_source(format!(
                "{:?} is not available on this timer",
                source
            )));
        }

        let setting = source.timer_setting()?;
        self.timer.configure(&setting)?;
        self.timer.enable(self.sink.clone())?;
        Ok(setting)
    }

    /// Handles one periodic signal for timers that do not call the sink themselves
    pub fn on_periodic_signal(&self) -> TickOutcome {
        self.sink.signal()
    }

    /// Stops the periodic signal
    pub fn shutdown(&mut self) {
        self.timer.disable();
        self.setting = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::clock::SmclkConfig;
    use crate::core::AlarmSlot;

    /// Timer that records calls and fires only when told to
    #[derive(Default)]
    struct ManualTimer {
        smclk_available: bool,
        configured: Option<TimerSetting>,
        sink: Option<TickSink>,
    }

    impl ManualTimer {
        fn fire(&self) -> Option<TickOutcome> {
            self.sink.as_ref().map(|sink| sink.signal())
        }
    }

    impl TimerPeripheral for ManualTimer {
        fn supports(&self, source: &ClockSource) -> bool {
            !matches!(source, ClockSource::Smclk(_)) || self.smclk_available
        }

        fn configure(&mut self, setting: &TimerSetting) -> Result<()> {
            self.configured = Some(*setting);
            Ok(())
        }

        fn enable(&mut self, sink: TickSink) -> Result<()> {
            self.sink = Some(sink);
            Ok(())
        }

        fn disable(&mut self) {
            self.sink = None;
        }
    }

    #[derive(Default)]
    struct CountingWake(AtomicUsize);

    impl WakeSignal for CountingWake {
        fn wake(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_initialize_enables_ticks() {
        let state = Arc::new(RtcState::new());
        state.set_epoch(94_694_400);
        let mut rtc = Rtc::new(state.clone(), ManualTimer::default(), Arc::new(()));

        let setting = rtc.initialize(ClockSource::Xt1).unwrap();
        assert_eq!(setting.modulo, 128);
        assert_eq!(rtc.timer().configured, Some(setting));
        assert_eq!(rtc.setting(), Some(&setting));
        assert!(!state.init_error());

        rtc.timer().fire().unwrap();
        rtc.timer().fire().unwrap();
        assert_eq!(state.epoch(), 94_694_402);
        assert!(state.status().contains(StatusFlags::TICK));
    }

    #[test]
    fn test_unsupported_source_sets_error_flag() {
        let state = Arc::new(RtcState::new());
        let mut rtc = Rtc::new(state.clone(), ManualTimer::default(), Arc::new(()));

        let err = rtc.initialize(ClockSource::Smclk(SmclkConfig::default())).unwrap_err();
        assert!(matches!(err, Error::UnsupportedClockSource(_)));
        assert!(state.init_error());
        assert!(rtc.timer().fire().is_none());
        assert!(rtc.setting().is_none());
        assert_eq!(rtc.timer().configured, None);
    }

    #[test]
    fn test_misconfigured_source_sets_error_flag() {
        let state = Arc::new(RtcState::new());
        let timer = ManualTimer { smclk_available: true, ..Default::default() };
        let mut rtc = Rtc::new(state.clone(), timer, Arc::new(()));

        let source = ClockSource::Smclk(SmclkConfig { dco_derived: false, ..Default::default() });
        assert!(matches!(rtc.initialize(source), Err(Error::ClockConfig(_))));
        assert!(state.init_error());
        assert!(rtc.timer().fire().is_none());

        // A later successful initialization clears the error
        rtc.initialize(ClockSource::Smclk(SmclkConfig::default())).unwrap();
        assert!(!state.init_error());
        assert!(rtc.timer().fire().is_some());
    }

    #[test]
    fn test_initialize_keeps_settings() {
        let state = Arc::new(RtcState::new());
        state.set_epoch(1_000);
        state.set_alarm(AlarmSlot::Alarm1, 1_001);
        state.set_wake_on_tick(true);
        state.set_status(StatusFlags::TICK | StatusFlags::ALARM0_TRIGGERED);

        let mut rtc = Rtc::new(state.clone(), ManualTimer::default(), Arc::new(()));
        rtc.initialize(ClockSource::Vlo).unwrap();

        assert_eq!(state.status(), StatusFlags::WAKE_ON_TICK);
        assert_eq!(state.epoch(), 1_000);
        assert_eq!(state.alarm(AlarmSlot::Alarm1), 1_001);
    }

    #[test]
    fn test_wake_on_alarm_only() {
        let state = Arc::new(RtcState::new());
        state.set_epoch(10);
        state.set_alarm(AlarmSlot::Alarm0, 13);
        let waker = Arc::new(CountingWake::default());
        let rtc = Rtc::new(state.clone(), ManualTimer::default(), waker.clone());

        for _ in 0..5 {
            rtc.on_periodic_signal();
        }
        assert_eq!(waker.0.load(Ordering::SeqCst), 1);

        state.set_wake_on_tick(true);
        for _ in 0..3 {
            rtc.on_periodic_signal();
        }
        assert_eq!(waker.0.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_shutdown_stops_ticks() {
        let state = Arc::new(RtcState::new());
        let mut rtc = Rtc::new(state, ManualTimer::default(), Arc::new(()));
        rtc.initialize(ClockSource::Xt1).unwrap();
        rtc.shutdown();
        assert!(rtc.timer().fire().is_none());
        assert!(rtc.setting().is_none());
    }

    #[test]
    fn test_notify_wakes_waiting_task() {
        let notify = Arc::new(Notify::new());
        let state = Arc::new(RtcState::new());
        state.set_wake_on_tick(true);
        let sink = TickSink::new(state, notify.clone());

        let mut waiting = tokio_test::task::spawn(notify.notified());
        tokio_test::assert_pending!(waiting.poll());

        sink.signal();
        assert!(waiting.is_woken());
        tokio_test::assert_ready!(waiting.poll());
    }
}

use std::sync::atomic::{AtomicU16, AtomicU32, Ordering};

use tracing::{debug, trace};

use crate::core::{AlarmSlot, Result, RtcConfig, StatusFlags};

/// Threshold and reschedule increment of one alarm
#[derive(Debug, Default)]
struct AlarmRegisters {
    threshold: AtomicU32,
    increment: AtomicU32,
}

/// What a single periodic signal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Counter value after the tick
    pub epoch: u32,
    /// Alarm flags raised by this tick
    pub triggered: StatusFlags,
    /// The application should be woken
    pub wake: bool,
}

/// Epoch counter, alarms and status word shared between the tick handler
/// and the application
///
/// Every field is atomic, so the state can sit in an `Arc` and be touched
/// from an interrupt-like producer and any number of readers. Status bits
/// are set and cleared with single read-modify-write operations and never
/// clobber each other.
#[derive(Debug, Default)]
pub struct RtcState {
    epoch: AtomicU32,
    alarms: [AlarmRegisters; 2],
    status: AtomicU16,
}

impl RtcState {
    /// Creates a state with the counter at 0, both alarms disabled and no flags set
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state from a validated configuration
    pub fn from_config(config: &RtcConfig) -> Result<Self> {
        config.validate()?;
        let state = Self::new();
        state.apply_config(config);
        Ok(state)
    }

    /// Applies counter, alarm and wake settings from a configuration
    pub fn apply_config(&self, config: &RtcConfig) {
        if let Some(epoch) = config.initial_time {
            self.set_epoch(epoch);
        }
        self.set_wake_on_tick(config.wake_on_tick);
        for slot in AlarmSlot::ALL {
            let alarm = config.alarm(slot);
            self.set_alarm(slot, alarm.at.unwrap_or(0));
            self.set_alarm_increment(slot, alarm.increment);
        }
    }

    /// Returns the current counter value
    pub fn epoch(&self) -> u32 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Sets the counter.
    ///
    /// Alarms compare for equality, so jumping past a threshold skips it.
    pub fn set_epoch(&self, epoch: u32) {
        self.epoch.store(epoch, Ordering::SeqCst);
    }

    /// Returns the alarm threshold; 0 means disabled
    pub fn alarm(&self, slot: AlarmSlot) -> u32 {
        self.alarms[slot.index()].threshold.load(Ordering::SeqCst)
    }

    /// Sets the alarm threshold; 0 disables the alarm
    pub fn set_alarm(&self, slot: AlarmSlot, threshold: u32) {
        self.alarms[slot.index()].threshold.store(threshold, Ordering::SeqCst);
    }

    /// Returns the alarm reschedule increment
    pub fn alarm_increment(&self, slot: AlarmSlot) -> u32 {
        self.alarms[slot.index()].increment.load(Ordering::SeqCst)
    }

    /// Sets the alarm reschedule increment; 0 makes the alarm one-shot
    pub fn set_alarm_increment(&self, slot: AlarmSlot, increment: u32) {
        self.alarms[slot.index()].increment.store(increment, Ordering::SeqCst);
    }

    /// Returns the status word
    pub fn status(&self) -> StatusFlags {
        StatusFlags(self.status.load(Ordering::SeqCst))
    }

    /// Sets the given status bits, leaving the others untouched
    pub fn set_status(&self, flags: StatusFlags) {
        self.status.fetch_or(flags.bits(), Ordering::SeqCst);
    }

    /// Clears the given status bits, leaving the others untouched
    pub fn clear_status(&self, flags: StatusFlags) {
        self.status.fetch_and(!flags.bits(), Ordering::SeqCst);
    }

    /// Clears the given status bits and returns which of them were set
    pub fn take_status(&self, flags: StatusFlags) -> StatusFlags {
        StatusFlags(self.status.fetch_and(!flags.bits(), Ordering::SeqCst)) & flags
    }

    /// Returns whether every tick wakes the application
    pub fn wake_on_tick(&self) -> bool {
        self.status().contains(StatusFlags::WAKE_ON_TICK)
    }

    /// Enables or disables waking on every tick
    pub fn set_wake_on_tick(&self, enabled: bool) {
        if enabled {
            self.set_status(StatusFlags::WAKE_ON_TICK);
        } else {
            self.clear_status(StatusFlags::WAKE_ON_TICK);
        }
    }

    /// Returns whether clock initialization failed
    pub fn init_error(&self) -> bool {
        self.status().contains(StatusFlags::GENERAL_ERROR)
    }

    /// Advances the counter by one second and evaluates both alarms
    ///
    /// Flags are only ever set here. Clearing them is up to the application.
    pub fn on_tick(&self) -> TickOutcome {
        self.set_status(StatusFlags::TICK);
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst).wrapping_add(1);

        let mut triggered = StatusFlags::empty();
        for slot in AlarmSlot::ALL {
            let alarm = &self.alarms[slot.index()];
            let threshold = alarm.threshold.load(Ordering::SeqCst);
            if threshold == 0 || threshold != epoch {
                continue;
            }

            triggered |= slot.triggered_flag();
            let increment = alarm.increment.load(Ordering::SeqCst);
            if increment > 0 {
                // Leave the threshold alone if the application rewrote it meanwhile
                let _ = alarm.threshold.compare_exchange(
                    threshold,
                    threshold.wrapping_add(increment),
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
            }
            debug!(?slot, epoch, increment, "alarm triggered");
        }

        if !triggered.is_empty() {
            self.set_status(triggered);
        }

        let wake = self.wake_on_tick() || !triggered.is_empty();
        trace!(epoch, wake, "tick");

        TickOutcome {
            epoch,
            triggered,
            wake,
        }
    }
}

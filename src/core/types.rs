use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Serialize, Deserialize};

use crate::clock::ClockSource;
use super::{Error, Result};

/// Broken-down calendar time in UTC
///
/// `month` counts from 0 (January) and `weekday` from 0 (Sunday), as in C's
/// `struct tm`. `year` is absolute, not an offset from 1900.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarTime {
    /// Seconds (0-59)
    pub second: u8,
    /// Minutes (0-59)
    pub minute: u8,
    /// Hours (0-23)
    pub hour: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Month (0-11)
    pub month: u8,
    /// Absolute year
    pub year: u16,
    /// Day of week (0-6, Sunday = 0)
    pub weekday: u8,
    /// Day of year (0-365)
    pub year_day: u16,
}

impl CalendarTime {
    /// Creates a calendar time from a date and time of day.
    ///
    /// `month` is 1-based here, the way dates are written; the stored field
    /// is 0-based. Weekday and year-day are left unset.
    pub fn from_ymd_hms(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        CalendarTime {
            second,
            minute,
            hour,
            day,
            month: month.saturating_sub(1),
            year,
            weekday: 0,
            year_day: 0,
        }
    }

    /// Creates a calendar time addressed by day of year instead of month/day
    pub fn from_year_day(year: u16, year_day: u16, hour: u8, minute: u8, second: u8) -> Self {
        CalendarTime {
            second,
            minute,
            hour,
            day: 0,
            month: 0,
            year,
            weekday: 0,
            year_day,
        }
    }
}

/// Status word shared between the tick handler and the application
///
/// Bit positions match the firmware status register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusFlags(pub u16);

impl StatusFlags {
    /// A periodic tick has fired
    pub const TICK: StatusFlags = StatusFlags(0x0001);
    /// Alarm 0 reached its threshold
    pub const ALARM0_TRIGGERED: StatusFlags = StatusFlags(0x0002);
    /// Alarm 1 reached its threshold
    pub const ALARM1_TRIGGERED: StatusFlags = StatusFlags(0x0004);
    /// Every tick wakes the application, not only alarms
    pub const WAKE_ON_TICK: StatusFlags = StatusFlags(0x0100);
    /// Clock initialization failed
    pub const GENERAL_ERROR: StatusFlags = StatusFlags(0x8000);

    /// Returns an empty flag set
    pub const fn empty() -> Self {
        StatusFlags(0)
    }

    /// Returns the raw bits
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Returns whether no flag is set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns whether every flag in `other` is set
    pub const fn contains(&self, other: StatusFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns whether any flag in `other` is set
    pub const fn intersects(&self, other: StatusFlags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for StatusFlags {
    type Output = StatusFlags;

    fn bitor(self, rhs: StatusFlags) -> StatusFlags {
        StatusFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for StatusFlags {
    fn bitor_assign(&mut self, rhs: StatusFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for StatusFlags {
    type Output = StatusFlags;

    fn bitand(self, rhs: StatusFlags) -> StatusFlags {
        StatusFlags(self.0 & rhs.0)
    }
}

impl Not for StatusFlags {
    type Output = StatusFlags;

    fn not(self) -> StatusFlags {
        StatusFlags(!self.0)
    }
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// One of the two alarm slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlarmSlot {
    Alarm0,
    Alarm1,
}

impl AlarmSlot {
    /// Both slots, in evaluation order
    pub const ALL: [AlarmSlot; 2] = [AlarmSlot::Alarm0, AlarmSlot::Alarm1];

    /// Returns the slot index
    pub fn index(&self) -> usize {
        match self {
            AlarmSlot::Alarm0 => 0,
            AlarmSlot::Alarm1 => 1,
        }
    }

    /// Returns the status flag raised when this slot triggers
    pub fn triggered_flag(&self) -> StatusFlags {
        match self {
            AlarmSlot::Alarm0 => StatusFlags::ALARM0_TRIGGERED,
            AlarmSlot::Alarm1 => StatusFlags::ALARM1_TRIGGERED,
        }
    }
}

/// Alarm settings applied at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// When the alarm first fires; `None` leaves it disabled
    #[serde(default)]
    #[serde(serialize_with = "super::serde::serialize_opt_epoch")]
    #[serde(deserialize_with = "super::serde::deserialize_opt_epoch")]
    pub at: Option<u32>,
    /// Seconds added to the threshold after each trigger; 0 makes it one-shot
    #[serde(default)]
    pub increment: u32,
}

/// Configuration for the real time clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtcConfig {
    /// Oscillator driving the periodic tick
    pub clock_source: ClockSource,
    /// Wake the application on every tick
    #[serde(default)]
    pub wake_on_tick: bool,
    /// Counter value at startup; `None` keeps the current counter
    #[serde(default)]
    #[serde(serialize_with = "super::serde::serialize_opt_epoch")]
    #[serde(deserialize_with = "super::serde::deserialize_opt_epoch")]
    pub initial_time: Option<u32>,
    /// Alarm 0 settings
    #[serde(default)]
    pub alarm0: AlarmConfig,
    /// Alarm 1 settings
    #[serde(default)]
    pub alarm1: AlarmConfig,
}

impl RtcConfig {
    /// Returns the settings for one alarm slot
    pub fn alarm(&self, slot: AlarmSlot) -> &AlarmConfig {
        match slot {
            AlarmSlot::Alarm0 => &self.alarm0,
            AlarmSlot::Alarm1 => &self.alarm1,
        }
    }

    /// Validates the configuration
    ///
    /// The clock source must produce a usable prescaler setting, and an
    /// increment is only meaningful on an alarm that is set.
    pub fn validate(&self) -> Result<()> {
        self.clock_source.timer_setting()?;

        for slot in AlarmSlot::ALL {
            let alarm = self.alarm(slot);
            if alarm.at.is_none() && alarm.increment > 0 {
                return Err(Error::config(format!(
                    "{:?} has an increment but no start time",
                    slot
                )));
            }
            if alarm.at == Some(0) {
                return Err(Error::config(format!("{:?} cannot start at epoch 0", slot)));
            }
        }

        Ok(())
    }
}

impl Default for RtcConfig {
    fn default() -> Self {
        RtcConfig {
            clock_source: ClockSource::Xt1,
            wake_on_tick: false,
            initial_time: None,
            alarm0: AlarmConfig::default(),
            alarm1: AlarmConfig::default(),
        }
    }
}

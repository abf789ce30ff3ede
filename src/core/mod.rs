//! Core types and constants for the RTC kit
//!
//! This module contains the fundamental building blocks used throughout the library.

pub mod error;
pub mod types;
pub mod serde;

pub use self::error::{Error, Result};
pub use self::types::{
    AlarmConfig,
    AlarmSlot,
    CalendarTime,
    RtcConfig,
    StatusFlags,
};

/// Seconds in one day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Seconds in a 365 day year
pub const SECONDS_PER_YEAR: u32 = 365 * SECONDS_PER_DAY;

/// Seconds in a 366 day year
pub const SECONDS_PER_LEAP_YEAR: u32 = 366 * SECONDS_PER_DAY;

/// Seconds in one four year cycle: three common years followed by a leap year
pub const SECONDS_PER_LEAP_CYCLE: u32 = 3 * SECONDS_PER_YEAR + SECONDS_PER_LEAP_YEAR;

/// Epoch of 1973-01-01T00:00:00Z, the end of the first leap year after 1970.
/// Nothing earlier is supported.
pub const EPOCH_AFTER_FIRST_LEAP: u32 = 2 * SECONDS_PER_YEAR + SECONDS_PER_LEAP_YEAR;

/// Year of epoch 0
pub const REFERENCE_YEAR: u16 = 1970;

/// Earliest year the converters accept
pub const MIN_SUPPORTED_YEAR: u16 = 1973;

/// Weekday of epoch 0 (Thursday, with Sunday = 0)
pub const EPOCH_WEEKDAY: u32 = 4;

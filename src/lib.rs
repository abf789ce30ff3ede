//! RTC kit: a one-second epoch counter with calendar conversion and alarms
//!
//! This library keeps time as a `u32` count of seconds since
//! 1970-01-01T00:00:00Z, advanced by a periodic timer signal, and converts
//! that counter to and from broken-down calendar time on demand. Two alarm
//! slots compare against the counter on every tick and raise status flags.
pub mod core;

pub mod clock;
pub mod time;
pub mod util;

// Re-export commonly used items
pub use crate::clock::{ClockSource, Rtc, RtcState};
pub use crate::core::{AlarmSlot, CalendarTime, Error, Result, StatusFlags};
pub use crate::time::{compute_epoch, interpret_epoch};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

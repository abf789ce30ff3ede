//! Calendar conversion module
//!
//! This module converts between the epoch counter (seconds since
//! 1970-01-01T00:00:00Z) and broken-down calendar time:
//!
//! - Leap cycle arithmetic anchored at 1973-01-01, the first year boundary
//!   after the 1972 leap year
//! - Epoch to calendar conversion, including weekday and day of year
//! - Calendar to epoch conversion, from month/day or from day of year
//! - Month and weekday name tables, `asctime` and ISO-8601 formatting
//!
//! Leap years follow a plain four year rule. That matches the Gregorian
//! calendar for every date up to 2100-02-28; after that point the two differ
//! by one day.
//!
//! # Examples
//!
//! ```
//! use rtc_kit::time::{compute_epoch, interpret_epoch};
//!
//! let cal = interpret_epoch(194_443_200).unwrap();
//! assert_eq!(cal.to_string(), "Sun Feb 29 12:00:00 1976");
//! assert_eq!(compute_epoch(&cal).unwrap(), 194_443_200);
//! ```

mod convert;
mod format;
mod leap;
mod tables;

pub use self::convert::{compute_epoch, interpret_epoch};
pub use self::leap::{is_leap_year, last_leap_year_boundary, LeapCycle};
pub use self::tables::{days_in_month, DayInfo, MonthInfo, DAY_INFO, MONTH_INFO};

//! Text representations of calendar time

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::core::{CalendarTime, Error, Result};
use super::convert::{compute_epoch, interpret_epoch};
use super::tables::{DayInfo, MonthInfo, DAY_INFO, MONTH_INFO};

const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

impl CalendarTime {
    /// Returns the table entry for this month, if the month is in range
    pub fn month_info(&self) -> Option<&'static MonthInfo> {
        MONTH_INFO.get(self.month as usize)
    }

    /// Returns the table entry for this weekday, if the weekday is in range
    pub fn weekday_info(&self) -> Option<&'static DayInfo> {
        DAY_INFO.get(self.weekday as usize)
    }

    /// Formats as `YYYY-MM-DDTHH:MM:SSZ`
    pub fn iso8601(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year,
            self.month as u32 + 1,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// Converts to a chrono date-time.
    ///
    /// Returns `None` when the fields do not name a real Gregorian date,
    /// which includes February 29th 2100.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32 + 1, self.day as u32)?
            .and_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)
    }
}

impl TryFrom<NaiveDateTime> for CalendarTime {
    type Error = Error;

    /// Fills weekday and year-day by round-tripping through the epoch
    fn try_from(value: NaiveDateTime) -> Result<Self> {
        let year = u16::try_from(value.year())
            .map_err(|_| Error::unsupported_date(format!("year {}", value.year())))?;
        let partial = CalendarTime::from_ymd_hms(
            year,
            value.month() as u8,
            value.day() as u8,
            value.hour() as u8,
            value.minute() as u8,
            value.second() as u8,
        );
        interpret_epoch(compute_epoch(&partial)?)
    }
}

impl FromStr for CalendarTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = NaiveDateTime::parse_from_str(s.trim(), ISO8601_FORMAT)
            .map_err(|e| Error::parse(format!("Invalid calendar time {:?}: {}", s, e)))?;
        CalendarTime::try_from(parsed)
    }
}

/// Formats in the C `asctime` layout, e.g. `Mon Jan  1 00:00:00 1973`
impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day_name = self.weekday_info().map_or("???", |d| d.short_name);
        let month_name = self.month_info().map_or("???", |m| m.short_name);
        write!(
            f,
            "{} {} {:>2} {:02}:{:02}:{:02} {}",
            day_name, month_name, self.day, self.hour, self.minute, self.second, self.year
        )
    }
}

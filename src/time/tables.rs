//! Month and weekday lookup tables

/// Days and names of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthInfo {
    /// Days in the month of a common year
    pub days: u8,
    /// Three letter name
    pub short_name: &'static str,
    /// Full name
    pub long_name: &'static str,
}

/// Names of one weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInfo {
    /// Three letter name
    pub short_name: &'static str,
    /// Full name
    pub long_name: &'static str,
}

const fn month(days: u8, short_name: &'static str, long_name: &'static str) -> MonthInfo {
    MonthInfo { days, short_name, long_name }
}

const fn day(short_name: &'static str, long_name: &'static str) -> DayInfo {
    DayInfo { short_name, long_name }
}

/// Months of the year, January first. February is listed with 28 days.
pub const MONTH_INFO: [MonthInfo; 12] = [
    month(31, "Jan", "January"),
    month(28, "Feb", "February"),
    month(31, "Mar", "March"),
    month(30, "Apr", "April"),
    month(31, "May", "May"),
    month(30, "Jun", "June"),
    month(31, "Jul", "July"),
    month(31, "Aug", "August"),
    month(30, "Sep", "September"),
    month(31, "Oct", "October"),
    month(30, "Nov", "November"),
    month(31, "Dec", "December"),
];

/// Days of the week, Sunday first
pub const DAY_INFO: [DayInfo; 7] = [
    day("Sun", "Sunday"),
    day("Mon", "Monday"),
    day("Tue", "Tuesday"),
    day("Wed", "Wednesday"),
    day("Thu", "Thursday"),
    day("Fri", "Friday"),
    day("Sat", "Saturday"),
];

/// Index of February in [`MONTH_INFO`]
pub const FEBRUARY: usize = 1;

/// Returns the length of a 0-based month, adding the leap day to February
pub fn days_in_month(month: usize, leap_year: bool) -> u32 {
    let days = MONTH_INFO[month].days as u32;
    if month == FEBRUARY && leap_year {
        days + 1
    } else {
        days
    }
}

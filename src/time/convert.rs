use crate::core::{
    CalendarTime, Error, Result, EPOCH_AFTER_FIRST_LEAP, EPOCH_WEEKDAY, MIN_SUPPORTED_YEAR,
    REFERENCE_YEAR, SECONDS_PER_DAY, SECONDS_PER_LEAP_CYCLE, SECONDS_PER_YEAR,
};
use super::leap::last_leap_year_boundary;
use super::tables::{days_in_month, MONTH_INFO};

/// Converts an epoch counter value into calendar time
///
/// Epochs before 1973-01-01T00:00:00Z are rejected. Leap years follow the
/// four year rule, so dates after 2100-02-28 differ from Gregorian by a day.
pub fn interpret_epoch(epoch: u32) -> Result<CalendarTime> {
    let cycle = last_leap_year_boundary(epoch)?;

    let mut years_into_cycle = cycle.remainder / SECONDS_PER_YEAR;
    let leap_year = years_into_cycle > 2;
    // The 366th day of the leap year divides out as a fourth whole year
    if years_into_cycle > 3 {
        years_into_cycle -= 1;
    }

    let seconds_into_year = cycle.remainder - years_into_cycle * SECONDS_PER_YEAR;
    let year_day = seconds_into_year / SECONDS_PER_DAY;
    let seconds_of_day = seconds_into_year % SECONDS_PER_DAY;
    let (month, day) = month_and_day(year_day, leap_year);

    Ok(CalendarTime {
        second: (seconds_of_day % 60) as u8,
        minute: (seconds_of_day / 60 % 60) as u8,
        hour: (seconds_of_day / 3600) as u8,
        day,
        month,
        year: (REFERENCE_YEAR as u32 + cycle.years + years_into_cycle) as u16,
        weekday: ((epoch / SECONDS_PER_DAY + EPOCH_WEEKDAY) % 7) as u8,
        year_day: year_day as u16,
    })
}

/// Converts calendar time into an epoch counter value
///
/// Only year, hour, minute and second are always read. A nonzero
/// `year_day` takes precedence over `month` and `day`; a `year_day` above
/// 366 is treated as unset. Weekday is ignored.
///
/// Fails for years before 1973 and for times past the end of the 32-bit
/// counter.
pub fn compute_epoch(calendar: &CalendarTime) -> Result<u32> {
    if calendar.year < MIN_SUPPORTED_YEAR {
        return Err(Error::unsupported_date(format!(
            "year {} is before {}",
            calendar.year, MIN_SUPPORTED_YEAR
        )));
    }

    let years = (calendar.year - MIN_SUPPORTED_YEAR) as u64;
    let cycles = years / 4;
    let years_into_cycle = years % 4;
    let leap_year = years_into_cycle == 3;

    let mut year_day = calendar.year_day as u32;
    if year_day > 366 {
        year_day = 0;
    }
    if year_day == 0 && (calendar.day > 0 || calendar.month > 0) {
        year_day = year_day_of(calendar.month, calendar.day, leap_year);
    }

    let epoch = EPOCH_AFTER_FIRST_LEAP as u64
        + cycles * SECONDS_PER_LEAP_CYCLE as u64
        + years_into_cycle * SECONDS_PER_YEAR as u64
        + year_day as u64 * SECONDS_PER_DAY as u64
        + calendar.hour as u64 * 3600
        + calendar.minute as u64 * 60
        + calendar.second as u64;

    u32::try_from(epoch).map_err(|_| {
        Error::unsupported_date(format!(
            "year {} day {} is past the end of the 32-bit epoch",
            calendar.year, year_day
        ))
    })
}

/// Returns the 0-based day of year for a 0-based month and 1-based day
fn year_day_of(month: u8, day: u8, leap_year: bool) -> u32 {
    let before: u32 = (0..(month as usize).min(MONTH_INFO.len()))
        .map(|m| days_in_month(m, leap_year))
        .sum();
    before + (day as u32).saturating_sub(1)
}

fn month_and_day(year_day: u32, leap_year: bool) -> (u8, u8) {
    let mut remaining = year_day;
    for month in 0..MONTH_INFO.len() {
        let length = days_in_month(month, leap_year);
        if remaining < length {
            return (month as u8, (remaining + 1) as u8);
        }
        remaining -= length;
    }
    // year_day is at most 365, which always lands in December
    (11, 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Datelike, Timelike};
    use rand::Rng;

    /// Last epoch before the four year rule and Gregorian diverge (2100-02-28T23:59:59Z)
    const LAST_GREGORIAN_AGREEMENT: u32 = 4_107_542_399;

    fn assert_matches_chrono(epoch: u32) {
        let cal = interpret_epoch(epoch).unwrap();
        let reference = DateTime::from_timestamp(epoch as i64, 0).unwrap();
        assert_eq!(cal.year as i32, reference.year(), "year of {}", epoch);
        assert_eq!(cal.month as u32, reference.month0(), "month of {}", epoch);
        assert_eq!(cal.day as u32, reference.day(), "day of {}", epoch);
        assert_eq!(cal.hour as u32, reference.hour(), "hour of {}", epoch);
        assert_eq!(cal.minute as u32, reference.minute(), "minute of {}", epoch);
        assert_eq!(cal.second as u32, reference.second(), "second of {}", epoch);
        assert_eq!(cal.year_day as u32, reference.ordinal0(), "year day of {}", epoch);
        assert_eq!(
            cal.weekday as u32,
            reference.weekday().num_days_from_sunday(),
            "weekday of {}",
            epoch
        );
    }

    #[test]
    fn test_rejects_unsupported_epochs() {
        assert!(matches!(interpret_epoch(0), Err(Error::UnsupportedDate(_))));
        // 1972-01-01
        assert!(interpret_epoch(63_072_000).is_err());
        assert!(interpret_epoch(EPOCH_AFTER_FIRST_LEAP - 1).is_err());
    }

    #[test]
    fn test_first_supported_day() {
        let cal = interpret_epoch(EPOCH_AFTER_FIRST_LEAP).unwrap();
        assert_eq!(cal, CalendarTime {
            second: 0,
            minute: 0,
            hour: 0,
            day: 1,
            month: 0,
            year: 1973,
            weekday: 1, // Monday
            year_day: 0,
        });
    }

    #[test]
    fn test_leap_day() {
        // 1976-02-29T12:00:00Z
        let cal = interpret_epoch(194_443_200).unwrap();
        assert_eq!(cal.year, 1976);
        assert_eq!(cal.month, 1);
        assert_eq!(cal.day, 29);
        assert_eq!(cal.hour, 12);
        assert_eq!(cal.year_day, 59);
        assert_eq!(cal.weekday, 0); // Sunday
    }

    #[test]
    fn test_end_of_leap_cycle() {
        // 1976-12-31T23:59:59Z
        let cal = interpret_epoch(220_924_799).unwrap();
        assert_eq!(cal.year, 1976);
        assert_eq!(cal.month, 11);
        assert_eq!(cal.day, 31);
        assert_eq!(cal.year_day, 365);
        assert_eq!((cal.hour, cal.minute, cal.second), (23, 59, 59));

        let cal = interpret_epoch(220_924_800).unwrap();
        assert_eq!(cal.year, 1977);
        assert_eq!(cal.month, 0);
        assert_eq!(cal.day, 1);
        assert_eq!(cal.year_day, 0);
        assert_eq!((cal.hour, cal.minute, cal.second), (0, 0, 0));
    }

    #[test]
    fn test_last_day_of_leap_year_all_day() {
        // Seconds throughout 1976-12-31 divide out to four whole years
        let start = 220_924_800 - SECONDS_PER_DAY;
        for epoch in (start..220_924_800).step_by(61) {
            let cal = interpret_epoch(epoch).unwrap();
            assert_eq!((cal.year, cal.month, cal.day, cal.year_day), (1976, 11, 31, 365));
        }
    }

    #[test]
    fn test_largest_epoch() {
        let cal = interpret_epoch(u32::MAX).unwrap();
        // 2106-02-07T06:28:15Z in Gregorian terms; the extra leap day in 2100
        // shifts the four year rule to the 6th
        assert_eq!(cal.year, 2106);
        assert_eq!(cal.month, 1);
        assert_eq!(cal.day, 6);
        assert_eq!((cal.hour, cal.minute, cal.second), (6, 28, 15));
        assert_eq!(compute_epoch(&cal).unwrap(), u32::MAX);
    }

    #[test]
    fn test_matches_chrono_at_boundaries() {
        for delta in [0u32, 1, 59, 3599, 86_399] {
            assert_matches_chrono(EPOCH_AFTER_FIRST_LEAP + delta);
        }
        for year_start in [126_230_400u32, 157_766_400, 189_302_400, 220_924_800] {
            for delta in [0u32, 1, 59, 3599, 86_399] {
                assert_matches_chrono(year_start + delta);
                assert_matches_chrono(year_start - delta - 1);
            }
        }
        assert_matches_chrono(951_825_600); // 2000-02-29T12:00:00Z
        assert_matches_chrono(LAST_GREGORIAN_AGREEMENT);
    }

    #[test]
    fn test_matches_chrono_sampled() {
        let mut rng = rand::thread_rng();
        for _ in 0..20_000 {
            assert_matches_chrono(rng.gen_range(EPOCH_AFTER_FIRST_LEAP..=LAST_GREGORIAN_AGREEMENT));
        }
    }

    #[test]
    fn test_round_trip_full_range() {
        let mut epoch = EPOCH_AFTER_FIRST_LEAP;
        loop {
            let cal = interpret_epoch(epoch).unwrap();
            assert_eq!(compute_epoch(&cal).unwrap(), epoch, "round trip of {}", epoch);
            match epoch.checked_add(7_919) {
                Some(next) => epoch = next,
                None => break,
            }
        }
    }

    #[test]
    fn test_round_trip_by_month_and_day() {
        // Same as above but forcing the month/day derivation path
        let mut rng = rand::thread_rng();
        for _ in 0..20_000 {
            let epoch = rng.gen_range(EPOCH_AFTER_FIRST_LEAP..=u32::MAX);
            let cal = CalendarTime {
                year_day: 0,
                weekday: 0,
                ..interpret_epoch(epoch).unwrap()
            };
            assert_eq!(compute_epoch(&cal).unwrap(), epoch, "round trip of {}", epoch);
        }
    }

    #[test]
    fn test_compute_rejects_before_1973() {
        let cal = CalendarTime::from_ymd_hms(1972, 12, 31, 23, 59, 59);
        assert!(matches!(compute_epoch(&cal), Err(Error::UnsupportedDate(_))));
    }

    #[test]
    fn test_compute_rejects_overflow() {
        let cal = CalendarTime::from_ymd_hms(2106, 2, 7, 0, 0, 0);
        assert!(compute_epoch(&cal).is_err());
        let cal = CalendarTime::from_ymd_hms(u16::MAX, 1, 1, 0, 0, 0);
        assert!(compute_epoch(&cal).is_err());
    }

    #[test]
    fn test_compute_leap_day() {
        let cal = CalendarTime::from_ymd_hms(1976, 2, 29, 12, 0, 0);
        assert_eq!(compute_epoch(&cal).unwrap(), 194_443_200);
        let cal = CalendarTime::from_ymd_hms(1976, 3, 1, 0, 0, 0);
        assert_eq!(compute_epoch(&cal).unwrap(), 194_486_400);
    }

    #[test]
    fn test_year_day_takes_precedence() {
        // Day 59 of 1976 is February 29th, whatever month/day say
        let mut cal = CalendarTime::from_ymd_hms(1976, 7, 4, 12, 0, 0);
        cal.year_day = 59;
        assert_eq!(compute_epoch(&cal).unwrap(), 194_443_200);

        let cal = CalendarTime::from_year_day(1976, 59, 12, 0, 0);
        assert_eq!(compute_epoch(&cal).unwrap(), 194_443_200);
    }

    #[test]
    fn test_oversized_year_day_is_unset() {
        let mut cal = CalendarTime::from_ymd_hms(1976, 3, 1, 0, 0, 0);
        cal.year_day = 367;
        assert_eq!(compute_epoch(&cal).unwrap(), 194_486_400);

        // With no month/day to fall back on it lands on January 1st
        let cal = CalendarTime::from_year_day(1977, 400, 0, 0, 0);
        assert_eq!(compute_epoch(&cal).unwrap(), 220_924_800);
    }

    #[test]
    fn test_year_day_366_is_accepted() {
        // Day 366 runs past December 31st of a leap year into the next year
        let cal = CalendarTime::from_year_day(1976, 366, 0, 0, 0);
        assert_eq!(compute_epoch(&cal).unwrap(), 220_924_800);
    }

    #[test]
    fn test_weekday_anchor() {
        for day in 0..28u32 {
            let epoch = EPOCH_AFTER_FIRST_LEAP + day * SECONDS_PER_DAY;
            let cal = interpret_epoch(epoch).unwrap();
            assert_eq!(cal.weekday as u32, (1 + day) % 7);
        }
    }
}

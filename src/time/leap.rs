use crate::core::{
    Error, Result, EPOCH_AFTER_FIRST_LEAP, MIN_SUPPORTED_YEAR, SECONDS_PER_LEAP_CYCLE,
};

/// Position of an epoch inside the four year leap cycle
///
/// Cycles start on January 1st of 1973, 1977, 1981 and so on; the fourth
/// year of each cycle is the leap year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeapCycle {
    /// Epoch at the start of the current cycle
    pub start_of_cycle: u32,
    /// Seconds elapsed inside the current cycle
    pub remainder: u32,
    /// Whole years between 1970 and the start of the current cycle
    pub years: u32,
}

/// Finds the start of the leap cycle containing `epoch`
///
/// Fails for anything before 1973-01-01T00:00:00Z.
pub fn last_leap_year_boundary(epoch: u32) -> Result<LeapCycle> {
    if epoch < EPOCH_AFTER_FIRST_LEAP {
        return Err(Error::unsupported_date(format!(
            "epoch {} is before {}-01-01",
            epoch, MIN_SUPPORTED_YEAR
        )));
    }

    let since_first_cycle = epoch - EPOCH_AFTER_FIRST_LEAP;
    let cycles = since_first_cycle / SECONDS_PER_LEAP_CYCLE;

    Ok(LeapCycle {
        start_of_cycle: EPOCH_AFTER_FIRST_LEAP + cycles * SECONDS_PER_LEAP_CYCLE,
        remainder: since_first_cycle % SECONDS_PER_LEAP_CYCLE,
        years: 3 + cycles * 4,
    })
}

/// Returns whether `year` is a leap year under the four year rule.
///
/// Century years are not special cased, so 2100 counts as a leap year.
pub fn is_leap_year(year: u16) -> bool {
    year % 4 == 0
}

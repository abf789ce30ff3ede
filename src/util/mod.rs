//! Utility module
//!
//! Helpers for seeding the epoch counter from the host clock.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::{Error, Result};

/// Converts a system time to an epoch counter value, truncating sub-second precision
pub fn epoch_from_system_time(time: SystemTime) -> Result<u32> {
    let since_epoch = time
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::unsupported_date(format!("time is before 1970: {}", e)))?;
    u32::try_from(since_epoch.as_secs())
        .map_err(|_| Error::unsupported_date("time is past the end of the 32-bit epoch"))
}

/// Converts an epoch counter value to a system time
pub fn system_time_from_epoch(epoch: u32) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(epoch as u64)
}

/// Returns the host clock as an epoch counter value
pub fn epoch_now() -> Result<u32> {
    epoch_from_system_time(SystemTime::now())
}

use thiserror::Error;

/// Custom error types for the RTC kit
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported date: {0}")]
    UnsupportedDate(String),

    #[error("Unsupported clock source: {0}")]
    UnsupportedClockSource(String),

    #[error("Clock configuration error: {0}")]
    ClockConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new unsupported date error
    pub fn unsupported_date(msg: impl Into<String>) -> Self {
        Error::UnsupportedDate(msg.into())
    }

    /// Creates a new unsupported clock source error
    pub fn unsupported_clock_source(msg: impl Into<String>) -> Self {
        Error::UnsupportedClockSource(msg.into())
    }

    /// Creates a new clock configuration error
    pub fn clock_config(msg: impl Into<String>) -> Self {
        Error::ClockConfig(msg.into())
    }

    /// Creates a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Creates a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates a new invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Error::InvalidState(msg.into())
    }

    /// Returns true for errors raised by clock source selection or setup
    pub fn is_clock_error(&self) -> bool {
        matches!(self, Error::UnsupportedClockSource(_) | Error::ClockConfig(_))
    }
}

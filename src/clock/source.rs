use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::core::{Error, Result};

/// Frequency of the XT1 watch crystal in Hz
pub const XT1_HZ: u32 = 32_768;

/// Nominal frequency of the VLO oscillator in Hz
pub const VLO_HZ: u32 = 10_000;

/// Oscillator feeding the periodic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockSource {
    /// External 32768 Hz crystal
    Xt1,
    /// Internal very-low-power oscillator
    Vlo,
    /// Sub-main clock
    Smclk(SmclkConfig),
}

/// Sub-main clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SmclkConfig {
    /// SMCLK is sourced from the DCO. Other SMCLK sources are not supported.
    pub dco_derived: bool,
    /// DCO frequency range
    pub dco_range: DcoRange,
    /// SMCLK divider applied to the DCO
    pub divider: SmclkDivider,
}

impl SmclkConfig {
    /// Returns the SMCLK frequency in Hz
    pub fn frequency_hz(&self) -> u32 {
        self.dco_range.hz() / self.divider.value()
    }
}

impl Default for SmclkConfig {
    fn default() -> Self {
        SmclkConfig {
            dco_derived: true,
            dco_range: DcoRange::Mhz1,
            divider: SmclkDivider::Div1,
        }
    }
}

/// DCO frequency range selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DcoRange {
    Mhz1,
    Mhz2,
    Mhz4,
    Mhz8,
    Mhz12,
    Mhz16,
    Mhz20,
    Mhz24,
}

impl DcoRange {
    /// Returns the nominal DCO frequency in Hz
    pub fn hz(&self) -> u32 {
        match self {
            DcoRange::Mhz1 => 1_000_000,
            DcoRange::Mhz2 => 2_000_000,
            DcoRange::Mhz4 => 4_000_000,
            DcoRange::Mhz8 => 8_000_000,
            DcoRange::Mhz12 => 12_000_000,
            DcoRange::Mhz16 => 16_000_000,
            DcoRange::Mhz20 => 20_000_000,
            DcoRange::Mhz24 => 24_000_000,
        }
    }
}

/// SMCLK divider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmclkDivider {
    Div1,
    Div2,
    Div4,
    Div8,
}

impl SmclkDivider {
    /// Returns the division factor
    pub fn value(&self) -> u32 {
        match self {
            SmclkDivider::Div1 => 1,
            SmclkDivider::Div2 => 2,
            SmclkDivider::Div4 => 4,
            SmclkDivider::Div8 => 8,
        }
    }
}

/// Prescaler and modulo producing one tick per second from a clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSetting {
    /// Selected source
    pub source: ClockSource,
    /// Source frequency in Hz
    pub source_hz: u32,
    /// Prescaler divider
    pub prescaler: u16,
    /// Prescaled counts per tick
    pub modulo: u16,
}

impl TimerSetting {
    fn divide(source: ClockSource, source_hz: u32, prescaler: u16) -> Result<Self> {
        let modulo = source_hz / prescaler as u32;
        let modulo = u16::try_from(modulo)
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                Error::clock_config(format!(
                    "{} Hz over prescaler {} gives modulo {} outside 1..=65535",
                    source_hz, prescaler, modulo
                ))
            })?;

        Ok(TimerSetting {
            source,
            source_hz,
            prescaler,
            modulo,
        })
    }

    /// Returns the time between two ticks
    pub fn tick_period(&self) -> Duration {
        let counts = self.prescaler as u64 * self.modulo as u64;
        Duration::from_nanos(counts * 1_000_000_000 / self.source_hz as u64)
    }
}

impl ClockSource {
    /// Computes the prescaler setting for a one second tick
    ///
    /// Fails when SMCLK is not derived from the DCO.
    pub fn timer_setting(&self) -> Result<TimerSetting> {
        match self {
            ClockSource::Xt1 => TimerSetting::divide(*self, XT1_HZ, 256),
            ClockSource::Vlo => TimerSetting::divide(*self, VLO_HZ, 100),
            ClockSource::Smclk(config) => {
                if !config.dco_derived {
                    return Err(Error::clock_config("SMCLK must be derived from the DCO"));
                }
                TimerSetting::divide(*self, config.frequency_hz(), 1000)
            }
        }
    }
}

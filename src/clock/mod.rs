//! Tick and alarm module
//!
//! This module owns the epoch counter and everything that drives it:
//!
//! - Shared counter, alarm and status state advanced once per periodic signal
//! - Clock source selection and the prescaler math for a one second tick
//! - The timer peripheral and wake primitive seams
//! - A tokio based software timer for hosted use
//!
//! The periodic signal is the only producer. Application code reads the
//! counter, converts it with [`crate::time`], and observes and clears status
//! flags.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use rtc_kit::clock::{ClockSource, Rtc, RtcState, SoftwareTimer};
//! use rtc_kit::core::AlarmSlot;
//! use tokio::sync::Notify;
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = Arc::new(RtcState::new());
//!     state.set_epoch(rtc_kit::util::epoch_now().unwrap());
//!     state.set_alarm(AlarmSlot::Alarm0, state.epoch() + 60);
//!
//!     let wake = Arc::new(Notify::new());
//!     let mut rtc = Rtc::new(state.clone(), SoftwareTimer::new(), wake.clone());
//!     rtc.initialize(ClockSource::Xt1).unwrap();
//!
//!     wake.notified().await;
//!     println!("alarm at {}", rtc_kit::time::interpret_epoch(state.epoch()).unwrap());
//! }
//! ```

mod rtc;
mod software;
mod source;
mod state;

pub use self::rtc::{Rtc, TickSink, TimerPeripheral, WakeSignal};
pub use self::software::SoftwareTimer;
pub use self::source::{
    ClockSource, DcoRange, SmclkConfig, SmclkDivider, TimerSetting, VLO_HZ, XT1_HZ,
};
pub use self::state::{RtcState, TickOutcome};

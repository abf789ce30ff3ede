use std::sync::Arc;
use std::time::Duration;

use rtc_kit::clock::{Rtc, RtcState, SoftwareTimer};
use rtc_kit::core::{AlarmSlot, RtcConfig, StatusFlags};
use rtc_kit::time::interpret_epoch;
use tokio::sync::Notify;
use tracing::{error, info};

const CONFIG: &str = r#"{
    "clock_source": "xt1",
    "initial_time": "1976-12-31T23:59:50Z",
    "alarm0": { "at": "1976-12-31T23:59:55Z", "increment": 5 },
    "alarm1": { "at": "1977-01-01T00:00:00Z" }
}"#;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config: RtcConfig = match serde_json::from_str(CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    let state = match RtcState::from_config(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    println!("Starting simulated clock:");
    println!("- Clock source: {:?}", config.clock_source);
    println!("- Tick period: 100ms (10x real time)");

    // Run ten times faster than real time
    let wake = Arc::new(Notify::new());
    let timer = SoftwareTimer::with_period(Duration::from_millis(100));
    let mut rtc = Rtc::new(state.clone(), timer, wake.clone());
    if let Err(e) = rtc.initialize(config.clock_source) {
        error!("Clock initialization failed: {}", e);
        return;
    }

    let mut alarms = 0;
    while alarms < 4 {
        wake.notified().await;

        let now = state.epoch();
        let flags = state.take_status(
            StatusFlags::TICK | StatusFlags::ALARM0_TRIGGERED | StatusFlags::ALARM1_TRIGGERED,
        );
        let calendar = match interpret_epoch(now) {
            Ok(calendar) => calendar,
            Err(e) => {
                error!("Cannot interpret epoch {}: {}", now, e);
                continue;
            }
        };

        for slot in AlarmSlot::ALL {
            if flags.contains(slot.triggered_flag()) {
                alarms += 1;
                info!(
                    ?slot,
                    next = state.alarm(slot),
                    "{} (day {} of {})",
                    calendar,
                    calendar.year_day + 1,
                    calendar.year
                );
            }
        }
    }

    rtc.shutdown();
    println!("\nDone");
}

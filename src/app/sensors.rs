use core::sync::atomic::Ordering;

use bold_hour::{
    battery::{
        cell_millivolts_from_pin, percent_from_millivolts, pin_millivolts_from_raw,
        BatteryTracker,
    },
    face::BatteryReading,
};
use embassy_time::Timer;

use super::{
    config::{APP_EVENTS, BATTERY_SAMPLE_MS, LATEST_BATTERY, LINK_CONNECTED, LINK_DEBOUNCE_MS},
    types::{AppEvent, BatteryMonitor, LinkMonitor},
};

impl BatteryMonitor {
    pub(crate) fn sample(&mut self) -> BatteryReading {
        let raw = nb::block!(self.adc.read_oneshot(&mut self.sense)).unwrap_or(0);
        let cell_mv = cell_millivolts_from_pin(pin_millivolts_from_raw(raw));
        BatteryReading::new(percent_from_millivolts(cell_mv), self.charge_status.is_low())
    }
}

impl LinkMonitor {
    pub(crate) fn is_connected(&self) -> bool {
        self.state.is_high()
    }
}

pub(crate) fn publish_battery(reading: BatteryReading) {
    LATEST_BATTERY.lock(|latest| latest.set(reading));
}

pub(crate) fn latest_battery() -> BatteryReading {
    LATEST_BATTERY.lock(|latest| latest.get())
}

pub(crate) fn publish_link(connected: bool) {
    LINK_CONNECTED.store(connected, Ordering::Relaxed);
}

pub(crate) fn link_connected() -> bool {
    LINK_CONNECTED.load(Ordering::Relaxed)
}

#[embassy_executor::task]
pub(crate) async fn battery_task(mut monitor: BatteryMonitor) {
    let mut tracker = BatteryTracker::new();
    let _ = tracker.observe(latest_battery());

    loop {
        Timer::after_millis(BATTERY_SAMPLE_MS).await;
        let reading = monitor.sample();
        publish_battery(reading);
        if tracker.observe(reading) {
            log::debug!(
                "battery {}% charging={}",
                reading.charge_percent,
                reading.is_charging
            );
            APP_EVENTS.send(AppEvent::BatteryChanged(reading)).await;
        }
    }
}

#[embassy_executor::task]
pub(crate) async fn link_task(mut monitor: LinkMonitor) {
    let mut connected = link_connected();

    loop {
        monitor.state.wait_for_any_edge().await;
        Timer::after_millis(LINK_DEBOUNCE_MS).await;
        let now_connected = monitor.is_connected();
        if now_connected == connected {
            continue;
        }
        connected = now_connected;
        publish_link(connected);
        APP_EVENTS.send(AppEvent::LinkChanged(connected)).await;
    }
}

use super::{
    actions::{ActionBuffer, FaceAction},
    assets::{BatteryIconSlot, HourGlyphSlot},
    layout::minute_origin_x,
    status_bar::{StatusBar, StatusBarStyle},
    text::{format_battery_text, BatteryText, ClockReading, DateDayText},
    types::{BatteryReading, FaceConfig, FaceVariant},
};
use crate::calendar::CalendarTime;
use crate::config::MINUTE_LABEL_BASE_X;

#[derive(Clone, Debug, Default)]
pub struct FaceOutput {
    pub actions: ActionBuffer,
}

/// What is currently on screen, so handlers only touch widgets that change.
#[derive(Clone, Debug)]
pub struct DisplayCache {
    pub hour_slot: HourGlyphSlot,
    pub last_date_day: Option<DateDayText>,
    pub last_battery_text: Option<BatteryText>,
    pub minute_origin_x: i32,
    pub battery_slot: BatteryIconSlot,
}

impl DisplayCache {
    pub const fn new() -> Self {
        Self {
            hour_slot: HourGlyphSlot::new(),
            last_date_day: None,
            last_battery_text: None,
            minute_origin_x: MINUTE_LABEL_BASE_X,
            battery_slot: BatteryIconSlot::new(),
        }
    }
}

impl Default for DisplayCache {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FaceEngine {
    config: FaceConfig,
    cache: DisplayCache,
    status_bar: Option<StatusBar>,
    initialized: bool,
}

impl FaceEngine {
    pub fn new(config: FaceConfig) -> Self {
        let status_bar = config.variant.has_status_bar().then(StatusBar::new);
        Self {
            config,
            cache: DisplayCache::new(),
            status_bar,
            initialized: false,
        }
    }

    pub fn variant(&self) -> FaceVariant {
        self.config.variant
    }

    pub fn cache(&self) -> &DisplayCache {
        &self.cache
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// First paint. A disconnected `link` here is shown without alerting.
    pub fn initialize(
        &mut self,
        time: &CalendarTime,
        battery: BatteryReading,
        link: Option<bool>,
    ) -> FaceOutput {
        let mut output = FaceOutput::default();
        self.display_time(time, &mut output.actions);
        self.handle_battery(battery, &mut output.actions);
        if let (Some(bar), Some(connected)) = (self.status_bar.as_mut(), link) {
            bar.link_changed(connected, false, &mut output.actions);
        }
        self.initialized = true;
        output
    }

    pub fn minute_tick(&mut self, time: &CalendarTime, battery: BatteryReading) -> FaceOutput {
        let mut output = FaceOutput::default();
        self.display_time(time, &mut output.actions);
        self.handle_battery(battery, &mut output.actions);
        output
    }

    pub fn battery_changed(&mut self, battery: BatteryReading) -> FaceOutput {
        let mut output = FaceOutput::default();
        self.handle_battery(battery, &mut output.actions);
        output
    }

    pub fn link_changed(&mut self, connected: bool) -> FaceOutput {
        let mut output = FaceOutput::default();
        let alert = self.initialized;
        if let Some(bar) = self.status_bar.as_mut() {
            bar.link_changed(connected, alert, &mut output.actions);
        }
        output
    }

    pub fn blink_timer_fired(&mut self, generation: u16) -> FaceOutput {
        let mut output = FaceOutput::default();
        if let Some(bar) = self.status_bar.as_mut() {
            bar.blink_fired(generation, &mut output.actions);
        }
        output
    }

    /// Releases both resident images.
    pub fn shutdown(&mut self) -> FaceOutput {
        let mut output = FaceOutput::default();
        let glyphs = &self.config.glyphs;
        self.cache.hour_slot.unload(glyphs, &mut output.actions);
        self.cache.battery_slot.unload(glyphs, &mut output.actions);
        self.initialized = false;
        output
    }

    pub fn status_bar(&self) -> Option<StatusBarStyle> {
        self.status_bar.as_ref().map(StatusBar::style)
    }

    pub fn link_connected(&self) -> Option<bool> {
        self.status_bar.as_ref().map(StatusBar::is_connected)
    }

    fn display_time(&mut self, time: &CalendarTime, actions: &mut ActionBuffer) {
        let reading = ClockReading::from_time(time);

        if self.cache.last_date_day.as_ref() != Some(&reading.date_day) {
            actions.push(FaceAction::SetDateText(reading.date_text.clone()));
            actions.push(FaceAction::SetDayText(reading.day_text.clone()));
            self.cache.last_date_day = Some(reading.date_day.clone());
        }

        let glyphs = &self.config.glyphs;
        if reading.hour.get() != self.cache.hour_slot.loaded_hour() {
            log::debug!(
                "hour glyph {} -> {}",
                self.cache.hour_slot.loaded_hour(),
                reading.hour.get()
            );
            self.cache.hour_slot.unload(glyphs, actions);
            self.cache.hour_slot.load(reading.hour.get(), glyphs, actions);
        }

        let x = minute_origin_x(reading.hour, reading.narrow_ones());
        if x != self.cache.minute_origin_x {
            self.cache.minute_origin_x = x;
            actions.push(FaceAction::MoveMinuteLabel { x });
        }

        actions.push(FaceAction::SetMinuteText(reading.minute_text));
    }

    fn handle_battery(&mut self, battery: BatteryReading, actions: &mut ActionBuffer) {
        let text = format_battery_text(battery.charge_percent);
        if self.cache.last_battery_text.as_ref() != Some(&text) {
            actions.push(FaceAction::SetBatteryText(text.clone()));
            self.cache.last_battery_text = Some(text);
        }
        self.cache
            .battery_slot
            .update(battery.is_charging, &self.config.glyphs, actions);
    }
}

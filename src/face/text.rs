use core::fmt::Write;

use heapless::String;

use super::types::HourDigit;
use crate::calendar::CalendarTime;

pub const DATE_DAY_LEN: usize = 9;
pub const DATE_LEN: usize = 6;
pub const DAY_LEN: usize = 3;

/// `"%b %e%a"`, e.g. `"Mar  3Tue"`.
pub type DateDayText = String<DATE_DAY_LEN>;
pub type DateText = String<DATE_LEN>;
pub type DayText = String<DAY_LEN>;
pub type MinuteText = String<2>;
pub type BatteryText = String<3>;

/// Everything the face derives from one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockReading {
    pub hour: HourDigit,
    pub minute_text: MinuteText,
    pub date_day: DateDayText,
    pub date_text: DateText,
    pub day_text: DayText,
}

impl ClockReading {
    pub fn from_time(time: &CalendarTime) -> Self {
        let date_day = format_date_day(time);
        let (date_text, day_text) = split_date_day(&date_day);
        Self {
            hour: HourDigit::from_hour_of_day(time.hour),
            minute_text: format_minute_text(time.minute),
            date_day,
            date_text,
            day_text,
        }
    }

    pub fn narrow_ones(&self) -> u8 {
        count_narrow_ones(&self.minute_text)
    }
}

pub fn format_date_day(time: &CalendarTime) -> DateDayText {
    let mut out = DateDayText::new();
    let _ = write!(
        &mut out,
        "{} {:>2}{}",
        time.month_abbreviation(),
        time.day,
        time.weekday_abbreviation()
    );
    out
}

pub fn split_date_day(date_day: &DateDayText) -> (DateText, DayText) {
    let split = DATE_LEN.min(date_day.len());
    let (date, day) = date_day.as_str().split_at(split);
    let mut date_text = DateText::new();
    let mut day_text = DayText::new();
    let _ = date_text.push_str(date);
    let _ = day_text.push_str(day);
    (date_text, day_text)
}

pub fn format_minute_text(minute: u8) -> MinuteText {
    let mut out = MinuteText::new();
    let _ = write!(&mut out, "{:02}", minute % 60);
    out
}

/// The minute font draws `1` narrower than the other digits.
pub fn count_narrow_ones(minute_text: &str) -> u8 {
    minute_text.bytes().filter(|&byte| byte == b'1').count() as u8
}

pub fn format_battery_text(charge_percent: u8) -> BatteryText {
    let mut out = BatteryText::new();
    let _ = write!(&mut out, "{}", charge_percent.min(100));
    out
}

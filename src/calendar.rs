//! Wall-clock helpers: civil calendar conversion, the abbreviations the face
//! prints, and a clock anchored to the last serial time sync.

const SECONDS_PER_DAY: i64 = 86_400;
const MS_PER_MINUTE: u64 = 60_000;

/// Largest sync epoch whose millisecond count still fits an `i64`.
pub const MAX_SYNC_EPOCH_SECONDS: u64 = i64::MAX as u64 / 1_000;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const fn from_days_since_sunday(days: u8) -> Self {
        match days % 7 {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            _ => Self::Saturday,
        }
    }

    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }
}

/// Broken-down local time, the equivalent of a `struct tm` for the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarTime {
    pub year: i32,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    pub weekday: Weekday,
    /// 0..=23
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CalendarTime {
    /// Converts seconds since 1970-01-01T00:00 local time.
    pub fn from_local_seconds(local_seconds: i64) -> Self {
        let days = local_seconds.div_euclid(SECONDS_PER_DAY);
        let seconds_of_day = local_seconds.rem_euclid(SECONDS_PER_DAY) as u32;
        let (year, month, day) = civil_from_days(days);
        // 1970-01-01 was a Thursday.
        let weekday = Weekday::from_days_since_sunday((days + 4).rem_euclid(7) as u8);

        Self {
            year,
            month,
            day,
            weekday,
            hour: (seconds_of_day / 3_600) as u8,
            minute: ((seconds_of_day / 60) % 60) as u8,
            second: (seconds_of_day % 60) as u8,
        }
    }

    pub fn month_abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month.clamp(1, 12) - 1) as usize]
    }

    pub fn weekday_abbreviation(&self) -> &'static str {
        self.weekday.abbreviation()
    }
}

// Howard Hinnant's days -> civil date algorithm.
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year as i32, month, day)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSync {
    pub unix_epoch_utc_seconds: u64,
    pub tz_offset_minutes: i32,
}

/// Wall clock derived from uptime plus the last accepted [`TimeSync`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock {
    anchor: Option<(TimeSync, u64)>,
}

impl LocalClock {
    pub const fn new() -> Self {
        Self { anchor: None }
    }

    pub fn sync(&mut self, sync: TimeSync, uptime_ms: u64) {
        self.anchor = Some((sync, uptime_ms));
    }

    pub fn is_synced(&self) -> bool {
        self.anchor.is_some()
    }

    /// Milliseconds since the local epoch. Unsynced clocks count from boot.
    pub fn local_ms(&self, uptime_ms: u64) -> u64 {
        match self.anchor {
            Some((sync, synced_at_ms)) => {
                let elapsed_ms = uptime_ms.saturating_sub(synced_at_ms);
                let utc_ms = sync
                    .unix_epoch_utc_seconds
                    .saturating_mul(1_000)
                    .saturating_add(elapsed_ms);
                let offset_ms = sync.tz_offset_minutes as i64 * 60_000;
                i64::try_from(utc_ms)
                    .unwrap_or(i64::MAX)
                    .saturating_add(offset_ms)
                    .max(0) as u64
            }
            None => uptime_ms,
        }
    }

    pub fn now(&self, uptime_ms: u64) -> CalendarTime {
        CalendarTime::from_local_seconds((self.local_ms(uptime_ms) / 1_000) as i64)
    }
}

/// Delay until the wall clock crosses into the next minute.
pub fn ms_until_next_minute(local_ms: u64) -> u64 {
    MS_PER_MINUTE - (local_ms % MS_PER_MINUTE)
}

use core::str::FromStr;

use super::SerialCommand;
use crate::calendar::{TimeSync, MAX_SYNC_EPOCH_SECONDS};
use crate::config::{TZ_OFFSET_MAX_MINUTES, TZ_OFFSET_MIN_MINUTES};

const TIMESET: &str = "TIMESET";

pub fn parse_serial_command(line: &str) -> Option<SerialCommand> {
    if parse_repaint_command(line) {
        return Some(SerialCommand::Repaint);
    }
    parse_timeset_command(line).map(SerialCommand::TimeSync)
}

/// `TIMESET <unix_utc_seconds> <tz_offset_minutes>`. Anything the host
/// terminal printed before the keyword is ignored.
pub fn parse_timeset_command(line: &str) -> Option<TimeSync> {
    let (_, args) = line.split_once(TIMESET)?;
    if args.starts_with(|c: char| !c.is_ascii_whitespace()) {
        return None;
    }

    let mut fields = args.split_ascii_whitespace();
    let unix_epoch_utc_seconds = u64::from_str(fields.next()?).ok()?;
    let tz_offset_minutes = i32::from_str(fields.next()?).ok()?;
    if fields.next().is_some() {
        return None;
    }
    if unix_epoch_utc_seconds > MAX_SYNC_EPOCH_SECONDS {
        return None;
    }
    if !(TZ_OFFSET_MIN_MINUTES..=TZ_OFFSET_MAX_MINUTES).contains(&tz_offset_minutes) {
        return None;
    }

    Some(TimeSync {
        unix_epoch_utc_seconds,
        tz_offset_minutes,
    })
}

pub fn parse_repaint_command(line: &str) -> bool {
    matches!(line.trim_ascii(), "REPAINT" | "REFRESH")
}

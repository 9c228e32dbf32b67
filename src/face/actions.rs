use heapless::Vec;

use super::assets::AssetId;
use super::text::{BatteryText, DateText, DayText, MinuteText};
use super::types::HourDigit;

/// Widget mutation requested by the face engine, applied in order by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaceAction {
    SetDateText(DateText),
    SetDayText(DayText),
    ReleaseHourGlyph { asset: AssetId },
    BindHourGlyph { digit: HourDigit, asset: AssetId },
    MoveMinuteLabel { x: i32 },
    SetMinuteText(MinuteText),
    SetBatteryText(BatteryText),
    ReleaseBatteryIcon { asset: AssetId },
    BindBatteryIcon { asset: AssetId, charging: bool },
    RedrawStatusBar,
    LongPulse,
    ScheduleBlink { delay_ms: u32, generation: u16 },
}

/// Largest handler output: a first paint touching every widget.
const ACTION_CAPACITY: usize = 12;

#[derive(Clone, Debug, Default)]
pub struct ActionBuffer {
    slots: Vec<FaceAction, ACTION_CAPACITY>,
}

impl ActionBuffer {
    pub const MAX: usize = ACTION_CAPACITY;

    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn push(&mut self, action: FaceAction) {
        if self.slots.push(action).is_err() {
            log::warn!("face action buffer full, dropping action");
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaceAction> {
        self.slots.iter()
    }

    pub fn touches_hour_glyph(&self) -> bool {
        self.iter().any(|action| {
            matches!(
                action,
                FaceAction::ReleaseHourGlyph { .. } | FaceAction::BindHourGlyph { .. }
            )
        })
    }

    pub fn contains_long_pulse(&self) -> bool {
        self.iter()
            .any(|action| matches!(action, FaceAction::LongPulse))
    }

    pub fn scheduled_blink(&self) -> Option<(u32, u16)> {
        self.iter().find_map(|action| match action {
            FaceAction::ScheduleBlink {
                delay_ms,
                generation,
            } => Some((*delay_ms, *generation)),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a ActionBuffer {
    type Item = &'a FaceAction;
    type IntoIter = core::slice::Iter<'a, FaceAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

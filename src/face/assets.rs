//! Bundled face art addressed by numeric id, and the single-slot holders that
//! keep at most one hour glyph and one battery icon resident.

use super::actions::{ActionBuffer, FaceAction};
use super::types::{ChargeState, HourDigit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetId(u16);

impl AssetId {
    pub const FIRST_HOUR: u16 = 1;
    pub const BATTERY: AssetId = AssetId(13);
    pub const BATTERY_CHARGING: AssetId = AssetId(14);

    pub const fn get(self) -> u16 {
        self.0
    }

    const fn hour(digit: HourDigit) -> Self {
        Self(Self::FIRST_HOUR + digit.get() as u16 - 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourGlyph {
    pub asset: AssetId,
    pub digit: HourDigit,
    pub numeral: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryIcon {
    pub asset: AssetId,
    pub charging: bool,
}

const HOUR_NUMERALS: [&str; 12] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

/// Digit and battery art, indexed once at startup.
#[derive(Clone, Copy, Debug)]
pub struct GlyphTable {
    hours: [HourGlyph; 12],
    battery: BatteryIcon,
    charging: BatteryIcon,
}

impl GlyphTable {
    pub const fn bundled() -> Self {
        let placeholder = HourGlyph {
            asset: AssetId(0),
            digit: HourDigit::from_hour_of_day(1),
            numeral: "",
        };
        let mut hours = [placeholder; 12];
        let mut idx = 0;
        while idx < hours.len() {
            let digit = HourDigit::from_hour_of_day(idx as u8 + 1);
            hours[idx] = HourGlyph {
                asset: AssetId::hour(digit),
                digit,
                numeral: HOUR_NUMERALS[idx],
            };
            idx += 1;
        }

        Self {
            hours,
            battery: BatteryIcon {
                asset: AssetId::BATTERY,
                charging: false,
            },
            charging: BatteryIcon {
                asset: AssetId::BATTERY_CHARGING,
                charging: true,
            },
        }
    }

    pub fn hour_glyph(&self, digit: HourDigit) -> &HourGlyph {
        &self.hours[digit.get() as usize - 1]
    }

    pub fn battery_icon(&self, charging: bool) -> &BatteryIcon {
        if charging {
            &self.charging
        } else {
            &self.battery
        }
    }

    pub fn resolve_hour(&self, asset: AssetId) -> Option<&HourGlyph> {
        self.hours.iter().find(|glyph| glyph.asset == asset)
    }

    pub fn resolve_battery(&self, asset: AssetId) -> Option<&BatteryIcon> {
        [&self.battery, &self.charging]
            .into_iter()
            .find(|icon| icon.asset == asset)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HourGlyphSlot {
    loaded: Option<HourDigit>,
}

impl HourGlyphSlot {
    pub const fn new() -> Self {
        Self { loaded: None }
    }

    pub fn loaded(&self) -> Option<HourDigit> {
        self.loaded
    }

    /// Loaded hour, 0 when the slot is empty.
    pub fn loaded_hour(&self) -> u8 {
        self.loaded.map_or(0, HourDigit::get)
    }

    /// Binds the glyph for `value`. Out-of-range values and an occupied slot
    /// leave everything untouched.
    pub fn load(&mut self, value: u8, table: &GlyphTable, actions: &mut ActionBuffer) {
        if self.loaded.is_some() {
            return;
        }
        let Some(digit) = HourDigit::new(value) else {
            return;
        };
        let glyph = table.hour_glyph(digit);
        actions.push(FaceAction::BindHourGlyph {
            digit,
            asset: glyph.asset,
        });
        self.loaded = Some(digit);
    }

    pub fn unload(&mut self, table: &GlyphTable, actions: &mut ActionBuffer) {
        if let Some(digit) = self.loaded.take() {
            actions.push(FaceAction::ReleaseHourGlyph {
                asset: table.hour_glyph(digit).asset,
            });
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BatteryIconSlot {
    state: ChargeState,
}

impl Default for BatteryIconSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryIconSlot {
    pub const fn new() -> Self {
        Self {
            state: ChargeState::Unknown,
        }
    }

    pub fn state(&self) -> ChargeState {
        self.state
    }

    /// Swaps the icon when the charging state differs from the resident one,
    /// including the first transition out of `Unknown`.
    pub fn update(&mut self, is_charging: bool, table: &GlyphTable, actions: &mut ActionBuffer) {
        let next = ChargeState::from_charging(is_charging);
        if next == self.state {
            return;
        }
        self.release(table, actions);
        let icon = table.battery_icon(is_charging);
        actions.push(FaceAction::BindBatteryIcon {
            asset: icon.asset,
            charging: icon.charging,
        });
        self.state = next;
    }

    pub fn unload(&mut self, table: &GlyphTable, actions: &mut ActionBuffer) {
        self.release(table, actions);
        self.state = ChargeState::Unknown;
    }

    fn release(&self, table: &GlyphTable, actions: &mut ActionBuffer) {
        let resident = match self.state {
            ChargeState::Unknown => return,
            ChargeState::Charging => table.battery_icon(true),
            ChargeState::Discharging => table.battery_icon(false),
        };
        actions.push(FaceAction::ReleaseBatteryIcon {
            asset: resident.asset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_maps_hours_to_distinct_ids() {
        let table = GlyphTable::bundled();
        for hour in 1..=12u8 {
            let digit = HourDigit::new(hour).unwrap();
            let glyph = table.hour_glyph(digit);
            assert_eq!(glyph.asset.get(), hour as u16);
            assert_eq!(glyph.digit, digit);
            assert_eq!(table.resolve_hour(glyph.asset), Some(glyph));
        }
        assert_eq!(table.hour_glyph(HourDigit::new(10).unwrap()).numeral, "10");
        assert!(table.resolve_hour(AssetId::BATTERY).is_none());
        assert!(table.resolve_battery(AssetId::BATTERY_CHARGING).unwrap().charging);
    }

    #[test]
    fn load_ignores_out_of_range_values() {
        let table = GlyphTable::bundled();
        let mut slot = HourGlyphSlot::new();
        let mut actions = ActionBuffer::new();
        slot.load(0, &table, &mut actions);
        slot.load(13, &table, &mut actions);
        assert!(actions.is_empty());
        assert_eq!(slot.loaded_hour(), 0);
    }

    #[test]
    fn load_is_noop_while_occupied() {
        let table = GlyphTable::bundled();
        let mut slot = HourGlyphSlot::new();
        let mut actions = ActionBuffer::new();
        slot.load(3, &table, &mut actions);
        slot.load(4, &table, &mut actions);
        assert_eq!(actions.len(), 1);
        assert_eq!(slot.loaded_hour(), 3);

        slot.unload(&table, &mut actions);
        slot.unload(&table, &mut actions);
        assert_eq!(actions.len(), 2);
        assert_eq!(slot.loaded_hour(), 0);
    }

    #[test]
    fn battery_icon_swaps_only_on_state_change() {
        let table = GlyphTable::bundled();
        let mut slot = BatteryIconSlot::new();
        let mut actions = ActionBuffer::new();

        slot.update(false, &table, &mut actions);
        assert_eq!(actions.len(), 1);
        slot.update(false, &table, &mut actions);
        assert_eq!(actions.len(), 1);

        slot.update(true, &table, &mut actions);
        let swapped: std::vec::Vec<_> = actions.iter().skip(1).cloned().collect();
        assert_eq!(
            swapped,
            [
                FaceAction::ReleaseBatteryIcon {
                    asset: AssetId::BATTERY
                },
                FaceAction::BindBatteryIcon {
                    asset: AssetId::BATTERY_CHARGING,
                    charging: true
                },
            ]
        );
        assert_eq!(slot.state(), ChargeState::Charging);
    }
}

//! Cell voltage to charge percentage, and change detection for the monitor.

use crate::face::BatteryReading;

/// Resting LiPo discharge curve, (millivolts, percent), descending.
const LIPO_CURVE: [(u32, u8); 11] = [
    (4_200, 100),
    (4_100, 90),
    (4_000, 80),
    (3_920, 70),
    (3_870, 60),
    (3_820, 50),
    (3_790, 40),
    (3_770, 30),
    (3_740, 20),
    (3_680, 10),
    (3_300, 0),
];

/// The battery sense pin sits behind a 2:1 divider.
pub const DIVIDER_RATIO: u32 = 2;
/// 12-bit ADC at 11 dB attenuation.
pub const ADC_FULL_SCALE_RAW: u32 = 4_095;
pub const ADC_FULL_SCALE_MV: u32 = 3_300;

pub fn pin_millivolts_from_raw(raw: u16) -> u16 {
    ((raw as u32).min(ADC_FULL_SCALE_RAW) * ADC_FULL_SCALE_MV / ADC_FULL_SCALE_RAW) as u16
}

pub fn cell_millivolts_from_pin(pin_millivolts: u16) -> u32 {
    pin_millivolts as u32 * DIVIDER_RATIO
}

pub fn percent_from_millivolts(cell_millivolts: u32) -> u8 {
    let (full_mv, _) = LIPO_CURVE[0];
    let (empty_mv, _) = LIPO_CURVE[LIPO_CURVE.len() - 1];
    if cell_millivolts >= full_mv {
        return 100;
    }
    if cell_millivolts <= empty_mv {
        return 0;
    }

    for pair in LIPO_CURVE.windows(2) {
        let (upper_mv, upper_pct) = pair[0];
        let (lower_mv, lower_pct) = pair[1];
        if cell_millivolts >= lower_mv {
            let span_mv = upper_mv - lower_mv;
            let span_pct = (upper_pct - lower_pct) as u32;
            let above = cell_millivolts - lower_mv;
            return lower_pct + ((above * span_pct) / span_mv) as u8;
        }
    }
    0
}

/// Remembers the last published reading so the monitor only notifies on change.
#[derive(Default)]
pub struct BatteryTracker {
    last: Option<BatteryReading>,
}

impl BatteryTracker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns `true` when `reading` differs from the previous one.
    pub fn observe(&mut self, reading: BatteryReading) -> bool {
        let changed = self.last != Some(reading);
        self.last = Some(reading);
        changed
    }

    pub fn last(&self) -> Option<BatteryReading> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_outside_curve() {
        assert_eq!(percent_from_millivolts(4_350), 100);
        assert_eq!(percent_from_millivolts(4_200), 100);
        assert_eq!(percent_from_millivolts(3_300), 0);
        assert_eq!(percent_from_millivolts(2_900), 0);
    }

    #[test]
    fn hits_table_points_and_interpolates() {
        assert_eq!(percent_from_millivolts(3_820), 50);
        assert_eq!(percent_from_millivolts(4_150), 95);
        assert_eq!(percent_from_millivolts(3_490), 5);
    }

    #[test]
    fn never_increases_as_voltage_drops() {
        let mut previous = 100;
        for mv in (3_200..=4_300).rev() {
            let pct = percent_from_millivolts(mv);
            assert!(pct <= previous, "{mv} mV gave {pct} after {previous}");
            previous = pct;
        }
    }

    #[test]
    fn divider_doubles_pin_voltage() {
        assert_eq!(cell_millivolts_from_pin(1_900), 3_800);
    }

    #[test]
    fn raw_adc_scales_to_full_range() {
        assert_eq!(pin_millivolts_from_raw(0), 0);
        assert_eq!(pin_millivolts_from_raw(4_095), 3_300);
        assert_eq!(pin_millivolts_from_raw(u16::MAX), 3_300);
        assert_eq!(pin_millivolts_from_raw(2_048), 1_650);
    }

    #[test]
    fn tracker_reports_only_changes() {
        let mut tracker = BatteryTracker::new();
        assert!(tracker.observe(BatteryReading::new(80, false)));
        assert!(!tracker.observe(BatteryReading::new(80, false)));
        assert!(tracker.observe(BatteryReading::new(80, true)));
        assert!(tracker.observe(BatteryReading::new(79, true)));
        assert_eq!(tracker.last(), Some(BatteryReading::new(79, true)));
    }
}

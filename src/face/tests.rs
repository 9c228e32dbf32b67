use heapless::String;

use super::*;
use crate::calendar::CalendarTime;
use crate::config::{BLINK_INTERVAL_MS, MINUTE_LABEL_BASE_X};

// 2026-03-03T14:05:00, a Tuesday
const TUESDAY_14_05: i64 = 1_772_546_700;
// 2026-03-03T22:11:00
const TUESDAY_22_11: i64 = 1_772_575_860;
// 2026-03-03T23:59:00
const TUESDAY_23_59: i64 = 1_772_582_340;

fn at(local_seconds: i64) -> CalendarTime {
    CalendarTime::from_local_seconds(local_seconds)
}

fn text<const N: usize>(value: &str) -> String<N> {
    let mut out = String::new();
    out.push_str(value).unwrap();
    out
}

fn digit(value: u8) -> HourDigit {
    HourDigit::new(value).unwrap()
}

fn collect(output: &FaceOutput) -> std::vec::Vec<FaceAction> {
    output.actions.iter().cloned().collect()
}

fn enhanced_after_init(link: bool) -> FaceEngine {
    let mut engine = FaceEngine::new(FaceConfig::new(FaceVariant::Enhanced));
    let _ = engine.initialize(&at(TUESDAY_14_05), BatteryReading::new(80, false), Some(link));
    engine
}

fn redraw_count(output: &FaceOutput) -> usize {
    output
        .actions
        .iter()
        .filter(|action| matches!(action, FaceAction::RedrawStatusBar))
        .count()
}

#[test]
fn first_paint_on_tuesday_afternoon() {
    let mut engine = FaceEngine::new(FaceConfig::new(FaceVariant::Enhanced));
    let output = engine.initialize(&at(TUESDAY_14_05), BatteryReading::new(80, false), Some(true));

    assert_eq!(
        collect(&output),
        [
            FaceAction::SetDateText(text("Mar  3")),
            FaceAction::SetDayText(text("Tue")),
            FaceAction::BindHourGlyph {
                digit: digit(2),
                asset: GlyphTable::bundled().hour_glyph(digit(2)).asset,
            },
            FaceAction::SetMinuteText(text("05")),
            FaceAction::SetBatteryText(text("80")),
            FaceAction::BindBatteryIcon {
                asset: AssetId::BATTERY,
                charging: false,
            },
        ]
    );
    assert!(engine.is_initialized());
    assert_eq!(engine.cache().minute_origin_x, MINUTE_LABEL_BASE_X);
    assert_eq!(engine.cache().hour_slot.loaded_hour(), 2);
    assert_eq!(engine.status_bar(), Some(StatusBarStyle::Line));
}

#[test]
fn ten_eleven_swaps_glyph_and_shifts_minute_label() {
    let mut engine = enhanced_after_init(true);
    let output = engine.minute_tick(&at(TUESDAY_22_11), BatteryReading::new(80, false));

    assert_eq!(
        collect(&output),
        [
            FaceAction::ReleaseHourGlyph {
                asset: GlyphTable::bundled().hour_glyph(digit(2)).asset,
            },
            FaceAction::BindHourGlyph {
                digit: digit(10),
                asset: GlyphTable::bundled().hour_glyph(digit(10)).asset,
            },
            FaceAction::MoveMinuteLabel { x: 76 },
            FaceAction::SetMinuteText(text("11")),
        ]
    );
    assert_eq!(engine.cache().minute_origin_x, 76);
}

#[test]
fn repeated_tick_only_rewrites_minute_text() {
    let mut engine = enhanced_after_init(true);
    let battery = BatteryReading::new(80, false);
    let _ = engine.minute_tick(&at(TUESDAY_22_11), battery);
    let again = engine.minute_tick(&at(TUESDAY_22_11), battery);

    assert_eq!(collect(&again), [FaceAction::SetMinuteText(text("11"))]);
    assert!(!again.actions.touches_hour_glyph());
}

#[test]
fn midnight_rolls_date_and_folds_hour_to_twelve() {
    let mut engine = enhanced_after_init(true);
    let battery = BatteryReading::new(80, false);
    let _ = engine.minute_tick(&at(TUESDAY_23_59), battery);
    let output = engine.minute_tick(&at(TUESDAY_23_59 + 60), battery);
    let actions = collect(&output);

    assert!(actions.contains(&FaceAction::SetDateText(text("Mar  4"))));
    assert!(actions.contains(&FaceAction::SetDayText(text("Wed"))));
    assert!(actions.contains(&FaceAction::MoveMinuteLabel { x: 70 }));
    assert_eq!(engine.cache().hour_slot.loaded_hour(), 12);
}

#[test]
fn every_hour_of_day_maps_onto_dial() {
    for hour in 0..24u8 {
        let folded = HourDigit::from_hour_of_day(hour).get();
        assert!((1..=12).contains(&folded), "hour {hour}");
        assert_eq!(folded, if hour % 12 == 0 { 12 } else { hour % 12 });
    }
}

#[test]
fn minute_offset_matches_rule_for_whole_day() {
    let mut engine = FaceEngine::new(FaceConfig::new(FaceVariant::Plain));
    let midnight = TUESDAY_14_05 - (14 * 3_600 + 5 * 60);
    let battery = BatteryReading::new(50, false);
    let _ = engine.initialize(&at(midnight), battery, None);

    for minute_of_day in 0..24 * 60i64 {
        let time = at(midnight + minute_of_day * 60);
        let _ = engine.minute_tick(&time, battery);
        let hour = HourDigit::from_hour_of_day(time.hour);
        let ones = (time.minute / 10 == 1) as i32 + (time.minute % 10 == 1) as i32;
        let base = if hour.is_wide() { 70 } else { 53 };
        assert_eq!(engine.cache().minute_origin_x, base + 3 * ones, "{time:?}");
    }
}

#[test]
fn scene_never_holds_two_images_of_a_kind() {
    let config = FaceConfig::new(FaceVariant::Enhanced);
    let mut engine = FaceEngine::new(config);
    let mut scene = FaceScene::new(config);
    let midnight = TUESDAY_14_05 - (14 * 3_600 + 5 * 60);

    let output = engine.initialize(&at(midnight), BatteryReading::new(100, true), Some(true));
    scene.apply_output(&output, engine.status_bar());
    for minute_of_day in 0..24 * 60i64 {
        let charging = (minute_of_day / 37) % 2 == 0;
        let percent = 100 - (minute_of_day / 15) as u8;
        let battery = BatteryReading::new(percent, charging);
        let output = engine.minute_tick(&at(midnight + minute_of_day * 60), battery);
        scene.apply_output(&output, engine.status_bar());
    }

    let residency = scene.residency();
    assert_eq!(residency.peak_hour_glyphs, 1);
    assert_eq!(residency.peak_battery_icons, 1);
    assert_eq!(residency.hour_glyphs, 1);
    assert_eq!(residency.battery_icons, 1);
    assert_eq!(residency.binds - residency.releases, 2);

    let output = engine.shutdown();
    scene.apply_output(&output, engine.status_bar());
    assert_eq!(scene.residency().hour_glyphs, 0);
    assert_eq!(scene.residency().battery_icons, 0);
    assert!(scene.hour_glyph().is_none());
}

#[test]
fn battery_text_and_icon_update_independently() {
    let mut engine = enhanced_after_init(true);

    let same = engine.battery_changed(BatteryReading::new(80, false));
    assert!(same.actions.is_empty());

    let plugged = engine.battery_changed(BatteryReading::new(80, true));
    assert_eq!(
        collect(&plugged),
        [
            FaceAction::ReleaseBatteryIcon {
                asset: AssetId::BATTERY
            },
            FaceAction::BindBatteryIcon {
                asset: AssetId::BATTERY_CHARGING,
                charging: true,
            },
        ]
    );

    let charged = engine.battery_changed(BatteryReading::new(81, true));
    assert_eq!(collect(&charged), [FaceAction::SetBatteryText(text("81"))]);
}

#[test]
fn disconnect_after_init_pulses_and_blinks_five_times() {
    let mut engine = enhanced_after_init(true);
    let lost = engine.link_changed(false);
    assert!(lost.actions.contains_long_pulse());
    assert_eq!(redraw_count(&lost), 1);
    let (delay_ms, mut generation) = lost.actions.scheduled_blink().unwrap();
    assert_eq!(delay_ms, BLINK_INTERVAL_MS);

    let mut firings = 0;
    loop {
        let fired = engine.blink_timer_fired(generation);
        firings += 1;
        assert_eq!(redraw_count(&fired), 1);
        match fired.actions.scheduled_blink() {
            Some((_, next)) => generation = next,
            None => break,
        }
    }
    assert_eq!(firings, 5);
    assert_eq!(
        engine.status_bar(),
        Some(StatusBarStyle::Box {
            border: BorderTone::Foreground
        })
    );
    assert!(engine.blink_timer_fired(generation).actions.is_empty());
}

#[test]
fn reconnect_wins_over_pending_blinks() {
    let mut engine = enhanced_after_init(true);
    let lost = engine.link_changed(false);
    let (_, generation) = lost.actions.scheduled_blink().unwrap();
    let _ = engine.blink_timer_fired(generation);

    let back = engine.link_changed(true);
    assert_eq!(collect(&back), [FaceAction::RedrawStatusBar]);
    assert_eq!(engine.status_bar(), Some(StatusBarStyle::Line));

    for _ in 0..6 {
        assert!(engine.blink_timer_fired(generation).actions.is_empty());
        assert_eq!(engine.status_bar(), Some(StatusBarStyle::Line));
    }
}

#[test]
fn unchanged_link_is_a_noop() {
    let mut engine = enhanced_after_init(true);
    assert!(engine.link_changed(true).actions.is_empty());
    let _ = engine.link_changed(false);
    assert!(engine.link_changed(false).actions.is_empty());
}

#[test]
fn disconnected_at_boot_shows_box_without_alert() {
    let mut engine = FaceEngine::new(FaceConfig::new(FaceVariant::Enhanced));
    let output = engine.initialize(&at(TUESDAY_14_05), BatteryReading::new(80, false), Some(false));

    assert!(!output.actions.contains_long_pulse());
    assert!(output.actions.scheduled_blink().is_none());
    assert_eq!(redraw_count(&output), 1);
    assert_eq!(
        engine.status_bar(),
        Some(StatusBarStyle::Box {
            border: BorderTone::Foreground
        })
    );
}

#[test]
fn plain_face_has_no_link_indicator() {
    let mut engine = FaceEngine::new(FaceConfig::new(FaceVariant::Plain));
    let _ = engine.initialize(&at(TUESDAY_14_05), BatteryReading::new(80, false), None);
    assert!(engine.link_changed(false).actions.is_empty());
    assert!(engine.blink_timer_fired(1).actions.is_empty());
    assert_eq!(engine.status_bar(), None);
}

#[test]
fn scene_tracks_dirty_regions() {
    let config = FaceConfig::new(FaceVariant::Enhanced);
    let mut engine = FaceEngine::new(config);
    let mut scene = FaceScene::new(config);
    let output = engine.initialize(&at(TUESDAY_14_05), BatteryReading::new(80, false), Some(true));
    scene.apply_output(&output, engine.status_bar());
    assert_eq!(scene.take_dirty(), DirtyRegions::ALL);
    assert!(!scene.is_dirty());

    let output = engine.minute_tick(&at(TUESDAY_14_05 + 60), BatteryReading::new(80, false));
    scene.apply_output(&output, engine.status_bar());
    let dirty = scene.take_dirty();
    assert!(dirty.contains(DirtyRegions::MINUTE));
    assert!(!dirty.contains(DirtyRegions::HOUR));
    assert!(!dirty.contains(DirtyRegions::DATE));
    assert_eq!(scene.minute_text(), "06");

    let output = engine.minute_tick(&at(TUESDAY_14_05 + 60), BatteryReading::new(80, false));
    scene.apply_output(&output, engine.status_bar());
    assert!(!scene.is_dirty());

    let output = engine.link_changed(false);
    scene.apply_output(&output, engine.status_bar());
    assert!(scene.take_dirty().contains(DirtyRegions::STATUS_BAR));
    assert!(matches!(scene.status_bar(), Some(StatusBarStyle::Box { .. })));
}

#[test]
fn scene_refuses_bind_over_resident_image() {
    let config = FaceConfig::new(FaceVariant::Enhanced);
    let mut scene = FaceScene::new(config);
    let two = config.glyphs.hour_glyph(digit(2)).asset;
    let three = config.glyphs.hour_glyph(digit(3)).asset;

    scene.apply(&FaceAction::BindHourGlyph { digit: digit(2), asset: two }, None);
    scene.apply(&FaceAction::BindHourGlyph { digit: digit(3), asset: three }, None);
    assert!(scene.is_resident(two));
    assert!(!scene.is_resident(three));
    assert_eq!(scene.residency().hour_glyphs, 1);
    assert_eq!(scene.residency().binds, 1);

    scene.apply(&FaceAction::BindBatteryIcon { asset: AssetId::BATTERY, charging: false }, None);
    scene.apply(
        &FaceAction::BindBatteryIcon { asset: AssetId::BATTERY_CHARGING, charging: true },
        None,
    );
    assert!(scene.is_resident(AssetId::BATTERY));
    assert_eq!(scene.residency().battery_icons, 1);
    assert_eq!(scene.residency().peak_battery_icons, 1);
}

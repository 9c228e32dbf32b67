//! Widget model the host mutates with engine actions and the renderer reads.

use super::{
    actions::FaceAction,
    assets::{AssetId, BatteryIcon, GlyphTable, HourGlyph},
    engine::FaceOutput,
    layout::FaceLayout,
    status_bar::StatusBarStyle,
    text::{BatteryText, DateText, DayText, MinuteText},
    types::FaceConfig,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyRegions(u8);

impl DirtyRegions {
    pub const NONE: Self = Self(0);
    pub const HOUR: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const DATE: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const BATTERY_TEXT: Self = Self(1 << 4);
    pub const BATTERY_ICON: Self = Self(1 << 5);
    pub const STATUS_BAR: Self = Self(1 << 6);
    pub const ALL: Self = Self(0x7F);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

/// Bind/release bookkeeping for the two image slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Residency {
    pub hour_glyphs: u8,
    pub battery_icons: u8,
    pub peak_hour_glyphs: u8,
    pub peak_battery_icons: u8,
    pub binds: u32,
    pub releases: u32,
}

pub struct FaceScene {
    layout: &'static FaceLayout,
    glyphs: GlyphTable,
    date_text: DateText,
    day_text: DayText,
    hour_glyph: Option<HourGlyph>,
    minute_x: i32,
    minute_text: MinuteText,
    battery_text: BatteryText,
    battery_icon: Option<BatteryIcon>,
    status_bar: Option<StatusBarStyle>,
    residency: Residency,
    dirty: DirtyRegions,
}

impl FaceScene {
    pub fn new(config: FaceConfig) -> Self {
        let layout = FaceLayout::for_variant(config.variant);
        Self {
            layout,
            glyphs: config.glyphs,
            date_text: DateText::new(),
            day_text: DayText::new(),
            hour_glyph: None,
            minute_x: layout.minute.x,
            minute_text: MinuteText::new(),
            battery_text: BatteryText::new(),
            battery_icon: None,
            status_bar: config
                .variant
                .has_status_bar()
                .then_some(StatusBarStyle::Line),
            residency: Residency::default(),
            dirty: DirtyRegions::ALL,
        }
    }

    pub fn layout(&self) -> &'static FaceLayout {
        self.layout
    }

    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    pub fn day_text(&self) -> &str {
        &self.day_text
    }

    pub fn hour_glyph(&self) -> Option<&HourGlyph> {
        self.hour_glyph.as_ref()
    }

    pub fn minute_x(&self) -> i32 {
        self.minute_x
    }

    pub fn minute_text(&self) -> &str {
        &self.minute_text
    }

    pub fn battery_text(&self) -> &str {
        &self.battery_text
    }

    pub fn battery_icon(&self) -> Option<&BatteryIcon> {
        self.battery_icon.as_ref()
    }

    pub fn status_bar(&self) -> Option<StatusBarStyle> {
        self.status_bar
    }

    pub fn residency(&self) -> Residency {
        self.residency
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn take_dirty(&mut self) -> DirtyRegions {
        core::mem::take(&mut self.dirty)
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty = DirtyRegions::ALL;
    }

    /// Applies every widget action of `output`. `status_bar` is the engine's
    /// live style, read when the output asks for a status bar redraw.
    pub fn apply_output(&mut self, output: &FaceOutput, status_bar: Option<StatusBarStyle>) {
        for action in output.actions.iter() {
            self.apply(action, status_bar);
        }
    }

    pub fn apply(&mut self, action: &FaceAction, status_bar: Option<StatusBarStyle>) {
        match action {
            FaceAction::SetDateText(text) => {
                self.date_text = text.clone();
                self.dirty.insert(DirtyRegions::DATE);
            }
            FaceAction::SetDayText(text) => {
                self.day_text = text.clone();
                self.dirty.insert(DirtyRegions::DAY);
            }
            FaceAction::ReleaseHourGlyph { asset } => {
                if self.hour_glyph.map(|glyph| glyph.asset) != Some(*asset) {
                    log::warn!("release of non-resident hour glyph {}", asset.get());
                    return;
                }
                self.hour_glyph = None;
                self.residency.hour_glyphs -= 1;
                self.residency.releases += 1;
                self.dirty.insert(DirtyRegions::HOUR);
            }
            FaceAction::BindHourGlyph { asset, .. } => {
                if let Some(resident) = self.hour_glyph {
                    log::warn!(
                        "bind of hour glyph {} over resident {}",
                        asset.get(),
                        resident.asset.get()
                    );
                    return;
                }
                let Some(glyph) = self.glyphs.resolve_hour(*asset).copied() else {
                    log::warn!("unknown hour glyph {}", asset.get());
                    return;
                };
                self.hour_glyph = Some(glyph);
                self.residency.hour_glyphs += 1;
                self.residency.peak_hour_glyphs = self
                    .residency
                    .peak_hour_glyphs
                    .max(self.residency.hour_glyphs);
                self.residency.binds += 1;
                self.dirty.insert(DirtyRegions::HOUR);
            }
            FaceAction::MoveMinuteLabel { x } => {
                self.minute_x = *x;
                self.dirty.insert(DirtyRegions::MINUTE);
            }
            FaceAction::SetMinuteText(text) => {
                if self.minute_text != *text {
                    self.minute_text = text.clone();
                    self.dirty.insert(DirtyRegions::MINUTE);
                }
            }
            FaceAction::SetBatteryText(text) => {
                self.battery_text = text.clone();
                self.dirty.insert(DirtyRegions::BATTERY_TEXT);
            }
            FaceAction::ReleaseBatteryIcon { asset } => {
                if self.battery_icon.map(|icon| icon.asset) != Some(*asset) {
                    log::warn!("release of non-resident battery icon {}", asset.get());
                    return;
                }
                self.battery_icon = None;
                self.residency.battery_icons -= 1;
                self.residency.releases += 1;
                self.dirty.insert(DirtyRegions::BATTERY_ICON);
            }
            FaceAction::BindBatteryIcon { asset, .. } => {
                if let Some(resident) = self.battery_icon {
                    log::warn!(
                        "bind of battery icon {} over resident {}",
                        asset.get(),
                        resident.asset.get()
                    );
                    return;
                }
                let Some(icon) = self.glyphs.resolve_battery(*asset).copied() else {
                    log::warn!("unknown battery icon {}", asset.get());
                    return;
                };
                self.battery_icon = Some(icon);
                self.residency.battery_icons += 1;
                self.residency.peak_battery_icons = self
                    .residency
                    .peak_battery_icons
                    .max(self.residency.battery_icons);
                self.residency.binds += 1;
                self.dirty.insert(DirtyRegions::BATTERY_ICON);
            }
            FaceAction::RedrawStatusBar => {
                if self.status_bar.is_some() {
                    self.status_bar = status_bar;
                    self.dirty.insert(DirtyRegions::STATUS_BAR);
                }
            }
            FaceAction::LongPulse | FaceAction::ScheduleBlink { .. } => {}
        }
    }

    pub fn is_resident(&self, asset: AssetId) -> bool {
        self.hour_glyph.is_some_and(|glyph| glyph.asset == asset)
            || self.battery_icon.is_some_and(|icon| icon.asset == asset)
    }
}

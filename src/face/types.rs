use super::assets::GlyphTable;

/// Hour value as the face shows it: 1..=12, no AM/PM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct HourDigit(u8);

impl HourDigit {
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 12 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Folds a 0..=23 hour onto the 12-hour dial, 0 becoming 12.
    pub const fn from_hour_of_day(hour: u8) -> Self {
        match hour % 12 {
            0 => Self(12),
            folded => Self(folded),
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Glyphs whose negative space sits further right.
    pub const fn is_wide(self) -> bool {
        matches!(self.0, 10 | 12)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargeState {
    Unknown,
    Charging,
    Discharging,
}

impl ChargeState {
    pub const fn from_charging(is_charging: bool) -> Self {
        if is_charging {
            Self::Charging
        } else {
            Self::Discharging
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryReading {
    pub charge_percent: u8,
    pub is_charging: bool,
}

impl BatteryReading {
    pub const fn new(charge_percent: u8, is_charging: bool) -> Self {
        Self {
            charge_percent: if charge_percent > 100 {
                100
            } else {
                charge_percent
            },
            is_charging,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceVariant {
    /// Date, battery and a plain separator line.
    Plain,
    /// Adds the Bluetooth status bar with disconnect alert.
    Enhanced,
}

impl FaceVariant {
    pub const fn has_status_bar(self) -> bool {
        matches!(self, Self::Enhanced)
    }

    /// Scheme a build gets when no text-colour feature is set: the plain face
    /// ships white on black, the enhanced one black on white.
    pub const fn default_scheme(self) -> ColorScheme {
        match self {
            Self::Plain => ColorScheme::Dark,
            Self::Enhanced => ColorScheme::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// Black text on white.
    Light,
    /// White text on black.
    Dark,
}

#[derive(Clone, Copy, Debug)]
pub struct FaceConfig {
    pub variant: FaceVariant,
    pub glyphs: GlyphTable,
}

impl FaceConfig {
    pub const fn new(variant: FaceVariant) -> Self {
        Self {
            variant,
            glyphs: GlyphTable::bundled(),
        }
    }
}

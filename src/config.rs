use crate::face::{ColorScheme, FaceVariant};

pub const SCREEN_WIDTH: i32 = 144;
pub const SCREEN_HEIGHT: i32 = 168;

pub const BLINK_INTERVAL_MS: u32 = 200;
pub const BLINK_REPEAT_START: i8 = 4;
pub const LONG_PULSE_MS: u64 = 500;

pub const MINUTE_LABEL_BASE_X: i32 = 53;
pub const MINUTE_LABEL_WIDE_BASE_X: i32 = 70;
pub const NARROW_ONE_COMPENSATION_PX: i32 = 3;

pub const TIMESET_CMD_BUF_LEN: usize = 64;
pub const TZ_OFFSET_MIN_MINUTES: i32 = -720;
pub const TZ_OFFSET_MAX_MINUTES: i32 = 840;

pub const FACE_VARIANT: FaceVariant = if cfg!(feature = "plain-face") {
    FaceVariant::Plain
} else {
    FaceVariant::Enhanced
};

pub const COLOR_SCHEME: ColorScheme = if cfg!(feature = "white-text") {
    ColorScheme::Dark
} else if cfg!(feature = "black-text") {
    ColorScheme::Light
} else {
    FACE_VARIANT.default_scheme()
};

#[cfg(feature = "graphics")]
pub use fonts::*;

#[cfg(feature = "graphics")]
mod fonts {
    use u8g2_fonts::{fonts, FontRenderer};

    pub const HOUR_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso92_tn>();
    pub const MINUTE_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso38_tn>();
    pub const STATUS_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_helvB10_tf>();
}

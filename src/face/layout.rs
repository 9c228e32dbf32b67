use super::types::{FaceVariant, HourDigit};
use crate::config::{
    MINUTE_LABEL_BASE_X, MINUTE_LABEL_WIDE_BASE_X, NARROW_ONE_COMPENSATION_PX, SCREEN_WIDTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn with_x(self, x: i32) -> Self {
        Self { x, ..self }
    }

    pub const fn right(self) -> i32 {
        self.x + self.width as i32
    }

    pub const fn bottom(self) -> i32 {
        self.y + self.height as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BottomBar {
    /// Filled 2px rule above the status row.
    Separator(Frame),
    /// Connectivity bar, line or bordered box depending on the link.
    StatusBar(Frame),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceLayout {
    pub hour: Frame,
    pub minute: Frame,
    pub battery_icon: Frame,
    pub battery_percent: Frame,
    pub date: Frame,
    pub day: Frame,
    pub day_align: TextAlign,
    pub bottom_bar: BottomBar,
}

const HOUR_FRAME: Frame = Frame::new(0, 0, SCREEN_WIDTH as u32, 148);
const MINUTE_FRAME: Frame = Frame::new(MINUTE_LABEL_BASE_X, 16, 40, 40);

impl FaceLayout {
    pub const PLAIN: FaceLayout = FaceLayout {
        hour: HOUR_FRAME,
        minute: MINUTE_FRAME,
        battery_icon: Frame::new(65, 153, 10, 15),
        battery_percent: Frame::new(78, 151, 30, 17),
        date: Frame::new(3, 151, 38, 17),
        day: Frame::new(SCREEN_WIDTH - 25, 151, SCREEN_WIDTH as u32 - 3, 17),
        day_align: TextAlign::Left,
        bottom_bar: BottomBar::Separator(Frame::new(0, 150, SCREEN_WIDTH as u32, 2)),
    };

    pub const ENHANCED: FaceLayout = FaceLayout {
        hour: HOUR_FRAME,
        minute: MINUTE_FRAME,
        battery_icon: Frame::new(65, 151, 10, 15),
        battery_percent: Frame::new(78, 150, 30, 17),
        date: Frame::new(3, 150, 38, 17),
        day: Frame::new(141 - 30, 150, 30, 17),
        day_align: TextAlign::Right,
        bottom_bar: BottomBar::StatusBar(Frame::new(1, 149, 142, 18)),
    };

    pub const fn for_variant(variant: FaceVariant) -> &'static FaceLayout {
        match variant {
            FaceVariant::Plain => &Self::PLAIN,
            FaceVariant::Enhanced => &Self::ENHANCED,
        }
    }
}

/// Minute label x: the wide hour glyphs push it right, and every narrow `1`
/// in the minute text nudges it a little further.
pub fn minute_origin_x(hour: HourDigit, narrow_ones: u8) -> i32 {
    let base = if hour.is_wide() {
        MINUTE_LABEL_WIDE_BASE_X
    } else {
        MINUTE_LABEL_BASE_X
    };
    base + NARROW_ONE_COMPENSATION_PX * narrow_ones as i32
}

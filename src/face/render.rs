use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, Polyline, PrimitiveStyle, Rectangle},
};
use u8g2_fonts::{
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use super::{
    layout::{BottomBar, Frame, TextAlign},
    scene::FaceScene,
    status_bar::{BorderTone, StatusBarStyle},
    types::ColorScheme,
};
use crate::config::{HOUR_FONT, MINUTE_FONT, STATUS_FONT};

const HOUR_BASELINE_INSET: i32 = 6;

/// Paints a [`FaceScene`] onto a 1bpp target. `BinaryColor::On` is a lit pixel.
#[derive(Clone, Copy, Debug)]
pub struct FaceRenderer {
    scheme: ColorScheme,
}

impl FaceRenderer {
    pub const fn new(scheme: ColorScheme) -> Self {
        Self { scheme }
    }

    pub const fn text_color(&self) -> BinaryColor {
        match self.scheme {
            ColorScheme::Dark => BinaryColor::On,
            ColorScheme::Light => BinaryColor::Off,
        }
    }

    pub const fn background_color(&self) -> BinaryColor {
        match self.scheme {
            ColorScheme::Dark => BinaryColor::Off,
            ColorScheme::Light => BinaryColor::On,
        }
    }

    pub fn draw<T>(&self, scene: &FaceScene, display: &mut T)
    where
        T: DrawTarget<Color = BinaryColor>,
    {
        let layout = scene.layout();
        let _ = display.clear(self.background_color());

        if let Some(glyph) = scene.hour_glyph() {
            let hour = layout.hour;
            self.draw_text(
                display,
                &HOUR_FONT,
                glyph.numeral,
                Point::new(hour.x + hour.width as i32 / 2, hour.bottom() - HOUR_BASELINE_INSET),
                VerticalPosition::Baseline,
                HorizontalAlignment::Center,
            );
        }

        self.draw_text(
            display,
            &MINUTE_FONT,
            scene.minute_text(),
            Point::new(scene.minute_x(), layout.minute.y),
            VerticalPosition::Top,
            HorizontalAlignment::Left,
        );

        match layout.bottom_bar {
            BottomBar::Separator(frame) => {
                let _ = rectangle(frame)
                    .into_styled(PrimitiveStyle::with_fill(self.text_color()))
                    .draw(display);
            }
            BottomBar::StatusBar(frame) => {
                if let Some(style) = scene.status_bar() {
                    self.draw_status_bar(display, frame, style);
                }
            }
        }

        if let Some(icon) = scene.battery_icon() {
            self.draw_battery_icon(display, layout.battery_icon, icon.charging);
        }

        self.draw_status_text(display, layout.battery_percent, TextAlign::Left, scene.battery_text());
        self.draw_status_text(display, layout.date, TextAlign::Left, scene.date_text());
        self.draw_status_text(display, layout.day, layout.day_align, scene.day_text());
    }

    fn draw_status_bar<T>(&self, display: &mut T, frame: Frame, style: StatusBarStyle)
    where
        T: DrawTarget<Color = BinaryColor>,
    {
        match style {
            StatusBarStyle::Line => {
                let _ = Line::new(
                    Point::new(frame.x, frame.y),
                    Point::new(frame.right(), frame.y),
                )
                .into_styled(PrimitiveStyle::with_stroke(self.text_color(), 1))
                .draw(display);
            }
            StatusBarStyle::Box { border } => {
                let color = match border {
                    BorderTone::Foreground => self.text_color(),
                    BorderTone::Background => self.background_color(),
                };
                let _ = rectangle(frame)
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(display);
            }
        }
    }

    fn draw_battery_icon<T>(&self, display: &mut T, frame: Frame, charging: bool)
    where
        T: DrawTarget<Color = BinaryColor>,
    {
        let color = self.text_color();
        let nub_width = frame.width / 2;
        let nub = Rectangle::new(
            Point::new(frame.x + (frame.width - nub_width) as i32 / 2, frame.y),
            Size::new(nub_width, 2),
        );
        let body = Rectangle::new(
            Point::new(frame.x, frame.y + 2),
            Size::new(frame.width, frame.height.saturating_sub(2)),
        );
        let _ = nub
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display);
        let _ = body
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display);

        if charging {
            let x = frame.x;
            let y = frame.y;
            let bolt = [
                Point::new(x + 6, y + 4),
                Point::new(x + 3, y + 9),
                Point::new(x + 6, y + 9),
                Point::new(x + 3, y + 13),
            ];
            let _ = Polyline::new(&bolt)
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(display);
        }
    }

    fn draw_status_text<T>(&self, display: &mut T, frame: Frame, align: TextAlign, text: &str)
    where
        T: DrawTarget<Color = BinaryColor>,
    {
        if text.is_empty() {
            return;
        }
        let center_y = frame.y + frame.height as i32 / 2;
        let (x, horizontal) = match align {
            TextAlign::Left => (frame.x, HorizontalAlignment::Left),
            TextAlign::Right => (frame.right(), HorizontalAlignment::Right),
        };
        self.draw_text(
            display,
            &STATUS_FONT,
            text,
            Point::new(x, center_y),
            VerticalPosition::Center,
            horizontal,
        );
    }

    fn draw_text<T>(
        &self,
        display: &mut T,
        renderer: &FontRenderer,
        text: &str,
        position: Point,
        vertical: VerticalPosition,
        horizontal: HorizontalAlignment,
    ) where
        T: DrawTarget<Color = BinaryColor>,
    {
        let _ = renderer.render_aligned(
            text,
            position,
            vertical,
            horizontal,
            FontColor::Transparent(self.text_color()),
            display,
        );
    }
}

fn rectangle(frame: Frame) -> Rectangle {
    Rectangle::new(
        Point::new(frame.x, frame.y),
        Size::new(frame.width, frame.height),
    )
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::calendar::CalendarTime;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::face::{BatteryReading, FaceConfig, FaceEngine, FaceVariant};

    const W: usize = SCREEN_WIDTH as usize;
    const H: usize = SCREEN_HEIGHT as usize;

    struct Canvas {
        pixels: std::vec::Vec<BinaryColor>,
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                pixels: std::vec![BinaryColor::Off; W * H],
            }
        }

        fn at(&self, x: i32, y: i32) -> BinaryColor {
            self.pixels[y as usize * W + x as usize]
        }

        fn count_in(&self, frame: Frame, color: BinaryColor) -> usize {
            let mut count = 0;
            for y in frame.y..frame.bottom().min(H as i32) {
                for x in frame.x..frame.right().min(W as i32) {
                    if self.at(x, y) == color {
                        count += 1;
                    }
                }
            }
            count
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for Canvas {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..W as i32).contains(&point.x) && (0..H as i32).contains(&point.y) {
                    self.pixels[point.y as usize * W + point.x as usize] = color;
                }
            }
            Ok(())
        }
    }

    fn painted(variant: FaceVariant, link: Option<bool>) -> (FaceEngine, FaceScene) {
        let config = FaceConfig::new(variant);
        let mut engine = FaceEngine::new(config);
        let mut scene = FaceScene::new(config);
        // 2026-03-03T14:05:00
        let time = CalendarTime::from_local_seconds(1_772_546_700);
        let output = engine.initialize(&time, BatteryReading::new(80, true), link);
        scene.apply_output(&output, engine.status_bar());
        (engine, scene)
    }

    #[test]
    fn dark_scheme_draws_text_pixels_on_black() {
        let (_, scene) = painted(FaceVariant::Enhanced, Some(true));
        let renderer = FaceRenderer::new(ColorScheme::Dark);
        let mut canvas = Canvas::new();
        renderer.draw(&scene, &mut canvas);

        let layout = scene.layout();
        assert!(canvas.count_in(layout.hour, BinaryColor::On) > 500);
        assert!(canvas.count_in(layout.date, BinaryColor::On) > 0);
        assert!(canvas.count_in(layout.battery_icon, BinaryColor::On) > 0);
        assert_eq!(canvas.at(0, H as i32 - 1), BinaryColor::Off);
    }

    #[test]
    fn connected_bar_is_a_single_top_line() {
        let (_, scene) = painted(FaceVariant::Enhanced, Some(true));
        let renderer = FaceRenderer::new(ColorScheme::Dark);
        let mut canvas = Canvas::new();
        renderer.draw(&scene, &mut canvas);

        let BottomBar::StatusBar(bar) = scene.layout().bottom_bar else {
            panic!("enhanced layout has a status bar");
        };
        assert_eq!(canvas.at(bar.x + 1, bar.y), BinaryColor::On);
        assert_eq!(canvas.at(bar.x, bar.bottom() - 1), BinaryColor::Off);
    }

    #[test]
    fn disconnected_bar_draws_box_border() {
        let (_, scene) = painted(FaceVariant::Enhanced, Some(false));
        let renderer = FaceRenderer::new(ColorScheme::Light);
        let mut canvas = Canvas::new();
        renderer.draw(&scene, &mut canvas);

        let BottomBar::StatusBar(bar) = scene.layout().bottom_bar else {
            panic!("enhanced layout has a status bar");
        };
        assert_eq!(canvas.at(bar.x, bar.bottom() - 1), BinaryColor::Off);
        assert_eq!(canvas.at(bar.right() - 1, bar.y + 8), BinaryColor::Off);
    }

    #[test]
    fn blinking_border_alternates_between_background_and_text() {
        let (mut engine, mut scene) = painted(FaceVariant::Enhanced, Some(true));
        let renderer = FaceRenderer::new(ColorScheme::Dark);
        let BottomBar::StatusBar(bar) = scene.layout().bottom_bar else {
            panic!("enhanced layout has a status bar");
        };
        let left_edge = (bar.x, bar.y + bar.height as i32 / 2);

        let output = engine.link_changed(false);
        scene.apply_output(&output, engine.status_bar());
        let mut generation = output.actions.scheduled_blink().expect("blink armed").1;

        let expected = [renderer.background_color(), renderer.text_color()];
        for (firing, color) in expected.iter().enumerate() {
            let output = engine.blink_timer_fired(generation);
            scene.apply_output(&output, engine.status_bar());
            generation = output.actions.scheduled_blink().expect("blink re-armed").1;

            let mut canvas = Canvas::new();
            renderer.draw(&scene, &mut canvas);
            assert_eq!(canvas.at(left_edge.0, left_edge.1), *color, "firing {firing}");
        }
    }

    #[test]
    fn plain_separator_is_filled() {
        let (_, scene) = painted(FaceVariant::Plain, None);
        let renderer = FaceRenderer::new(ColorScheme::Dark);
        let mut canvas = Canvas::new();
        renderer.draw(&scene, &mut canvas);

        let BottomBar::Separator(rule) = scene.layout().bottom_bar else {
            panic!("plain layout has a separator");
        };
        assert_eq!(
            canvas.count_in(rule, BinaryColor::On),
            (rule.width * rule.height) as usize
        );
    }
}

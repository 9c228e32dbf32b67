use std::{
    convert::Infallible,
    env, fs,
    path::{Path, PathBuf},
};

use bold_hour::{
    calendar::CalendarTime,
    config::{SCREEN_HEIGHT, SCREEN_WIDTH},
    face::{
        BatteryReading, ColorScheme, FaceConfig, FaceEngine, FaceOutput, FaceRenderer, FaceScene,
        FaceVariant,
    },
};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Tuesday 2026-03-03 14:05 local.
const DEFAULT_START_SECONDS: i64 = 1_772_546_700;

struct Config {
    out_dir: PathBuf,
    start_seconds: i64,
    variant: FaceVariant,
    scheme: Option<ColorScheme>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("tools/face_preview/out"),
            start_seconds: DEFAULT_START_SECONDS,
            variant: FaceVariant::Enhanced,
            scheme: None,
        }
    }
}

#[derive(Clone, Copy)]
enum Step {
    Minutes(i64),
    JumpTo { hour: i64, minute: i64 },
    Battery(BatteryReading),
    Link(bool),
    BlinkFired,
}

const SCRIPT: &[(&str, Step)] = &[
    ("tick", Step::Minutes(1)),
    ("battery_drop", Step::Battery(BatteryReading::new(35, false))),
    ("charging", Step::Battery(BatteryReading::new(35, true))),
    ("unplugged", Step::Battery(BatteryReading::new(100, false))),
    ("disconnect", Step::Link(false)),
    ("blink", Step::BlinkFired),
    ("blink", Step::BlinkFired),
    ("blink", Step::BlinkFired),
    ("blink", Step::BlinkFired),
    ("blink", Step::BlinkFired),
    ("reconnect", Step::Link(true)),
    ("evening", Step::JumpTo { hour: 22, minute: 11 }),
    ("before_midnight", Step::JumpTo { hour: 23, minute: 59 }),
    ("midnight", Step::Minutes(1)),
    ("one_am", Step::JumpTo { hour: 1, minute: 11 }),
];

struct Preview {
    engine: FaceEngine,
    scene: FaceScene,
    renderer: FaceRenderer,
    local_seconds: i64,
    battery: BatteryReading,
    pending_blink: Option<u16>,
}

impl Preview {
    fn new(cfg: &Config) -> Self {
        let config = FaceConfig::new(cfg.variant);
        Self {
            engine: FaceEngine::new(config),
            scene: FaceScene::new(config),
            renderer: FaceRenderer::new(
                cfg.scheme.unwrap_or_else(|| cfg.variant.default_scheme()),
            ),
            local_seconds: cfg.start_seconds,
            battery: BatteryReading::new(80, false),
            pending_blink: None,
        }
    }

    fn boot(&mut self) {
        let link = self.engine.variant().has_status_bar().then_some(true);
        let time = CalendarTime::from_local_seconds(self.local_seconds);
        let output = self.engine.initialize(&time, self.battery, link);
        self.apply(&output);
    }

    fn step(&mut self, step: Step) {
        let output = match step {
            Step::Minutes(minutes) => {
                self.local_seconds += minutes * 60;
                self.tick()
            }
            Step::JumpTo { hour, minute } => {
                let day_start = self.local_seconds - self.local_seconds.rem_euclid(86_400);
                let mut target = day_start + hour * 3_600 + minute * 60;
                if target <= self.local_seconds {
                    target += 86_400;
                }
                self.local_seconds = target;
                self.tick()
            }
            Step::Battery(reading) => {
                self.battery = reading;
                self.engine.battery_changed(reading)
            }
            Step::Link(connected) => self.engine.link_changed(connected),
            Step::BlinkFired => match self.pending_blink.take() {
                Some(generation) => self.engine.blink_timer_fired(generation),
                None => FaceOutput::default(),
            },
        };
        self.apply(&output);
    }

    fn tick(&mut self) -> FaceOutput {
        let time = CalendarTime::from_local_seconds(self.local_seconds);
        self.engine.minute_tick(&time, self.battery)
    }

    fn apply(&mut self, output: &FaceOutput) {
        self.scene.apply_output(output, self.engine.status_bar());
        if let Some((_, generation)) = output.actions.scheduled_blink() {
            self.pending_blink = Some(generation);
        }
    }

    fn render(&mut self, canvas: &mut Canvas) {
        let _ = self.scene.take_dirty();
        self.renderer.draw(&self.scene, canvas);
    }
}

struct Canvas {
    luma: Vec<u8>,
}

impl Canvas {
    fn new() -> Self {
        Self {
            luma: vec![255; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
        }
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
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
            if point.x < 0 || point.y < 0 || point.x >= SCREEN_WIDTH || point.y >= SCREEN_HEIGHT {
                continue;
            }
            let index = (point.y * SCREEN_WIDTH + point.x) as usize;
            self.luma[index] = if color.is_on() { 255 } else { 0 };
        }
        Ok(())
    }
}

fn main() -> Result<(), String> {
    let cfg = parse_args(env::args().skip(1))?;
    fs::create_dir_all(&cfg.out_dir).map_err(|e| format!("create output dir: {e}"))?;

    let mut preview = Preview::new(&cfg);
    let mut canvas = Canvas::new();

    preview.boot();
    save_frame(&cfg, &mut preview, &mut canvas, 0, "boot")?;
    for (index, (label, step)) in SCRIPT.iter().enumerate() {
        preview.step(*step);
        save_frame(&cfg, &mut preview, &mut canvas, index + 1, label)?;
    }

    Ok(())
}

fn save_frame(
    cfg: &Config,
    preview: &mut Preview,
    canvas: &mut Canvas,
    index: usize,
    label: &str,
) -> Result<(), String> {
    preview.render(canvas);
    let path = cfg.out_dir.join(format!("face_{index:02}_{label}.png"));
    image::save_buffer(
        &path,
        &canvas.luma,
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
        image::ColorType::L8,
    )
    .map_err(|e| format!("save {}: {e}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn parse_args<I>(args: I) -> Result<Config, String>
where
    I: IntoIterator<Item = String>,
{
    let mut cfg = Config::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--out" => cfg.out_dir = PathBuf::from(next_value("--out", &mut it)?),
            "--start" => {
                let raw = next_value("--start", &mut it)?;
                cfg.start_seconds = raw
                    .parse::<i64>()
                    .map_err(|_| format!("invalid numeric value for --start: {raw}"))?;
            }
            "--plain" => cfg.variant = FaceVariant::Plain,
            "--white-text" => cfg.scheme = Some(ColorScheme::Dark),
            "--black-text" => cfg.scheme = Some(ColorScheme::Light),
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(format!("unknown arg: {arg}")),
        }
    }
    Ok(cfg)
}

fn next_value<I>(flag: &str, it: &mut I) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    it.next().ok_or_else(|| format!("missing value for {flag}"))
}

fn print_help() {
    let exe = env::args()
        .next()
        .and_then(|p| {
            Path::new(&p)
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.to_owned())
        })
        .unwrap_or_else(|| "face_preview".to_owned());
    println!("Usage: {exe} [--out DIR] [--start LOCAL_SECONDS] [--plain] [--white-text|--black-text]");
}

//! The watch face: time formatting, the hour glyph slot, minute label
//! placement, battery and link indicators.

pub mod actions;
pub mod assets;
pub mod engine;
pub mod layout;
#[cfg(feature = "graphics")]
pub mod render;
pub mod scene;
pub mod status_bar;
#[cfg(test)]
mod tests;
pub mod text;
pub mod types;

pub use actions::{ActionBuffer, FaceAction};
pub use assets::{AssetId, GlyphTable};
pub use engine::{DisplayCache, FaceEngine, FaceOutput};
pub use layout::{minute_origin_x, FaceLayout, Frame};
#[cfg(feature = "graphics")]
pub use render::FaceRenderer;
pub use scene::{DirtyRegions, FaceScene, Residency};
pub use status_bar::{BorderTone, StatusBarStyle};
pub use text::ClockReading;
pub use types::{BatteryReading, ChargeState, ColorScheme, FaceConfig, FaceVariant, HourDigit};

use bold_hour::{calendar::TimeSync, face::BatteryReading};
use embedded_graphics::{
    framebuffer::{buffer_size, Framebuffer},
    pixelcolor::{
        raw::{BigEndian, RawU1},
        BinaryColor,
    },
};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::{
    analog::adc::{Adc, AdcPin},
    gpio::{Input, Output},
    peripherals::{ADC1, GPIO35},
    spi::master::Spi,
    uart::Uart,
    Async, Blocking,
};
use mipidsi::{interface::SpiInterface, models::GC9A01};

use super::config::{FRAME_HEIGHT, FRAME_WIDTH};

pub(crate) type SerialUart = Uart<'static, Async>;
pub(crate) type PanelSpi = ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, NoDelay>;
pub(crate) type PanelDriver =
    mipidsi::Display<SpiInterface<'static, PanelSpi, Output<'static>>, GC9A01, Output<'static>>;
pub(crate) type FaceFrame = Framebuffer<
    BinaryColor,
    RawU1,
    BigEndian,
    FRAME_WIDTH,
    FRAME_HEIGHT,
    { buffer_size::<BinaryColor>(FRAME_WIDTH, FRAME_HEIGHT) },
>;

#[derive(Clone, Copy)]
pub(crate) enum AppEvent {
    MinuteTick,
    BatteryChanged(BatteryReading),
    LinkChanged(bool),
    BlinkTimerFired { generation: u16 },
    TimeSync(TimeSync),
    ForceRepaint,
}

#[derive(Clone, Copy)]
pub(crate) struct BlinkRequest {
    pub(crate) delay_ms: u32,
    pub(crate) generation: u16,
}

pub(crate) struct DisplayContext {
    pub(crate) panel: PanelDriver,
    pub(crate) _backlight: Output<'static>,
}

pub(crate) struct BatteryMonitor {
    pub(crate) adc: Adc<'static, ADC1<'static>, Blocking>,
    pub(crate) sense: AdcPin<GPIO35<'static>, ADC1<'static>>,
    /// Charger STAT output, low while charging.
    pub(crate) charge_status: Input<'static>,
}

pub(crate) struct LinkMonitor {
    /// BLE module STATE pin, high while a central is connected.
    pub(crate) state: Input<'static>,
}

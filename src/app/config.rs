use core::{cell::Cell, sync::atomic::AtomicBool};

use bold_hour::{
    calendar::LocalClock,
    config::{SCREEN_HEIGHT, SCREEN_WIDTH},
    face::BatteryReading,
};
use embassy_sync::{
    blocking_mutex::{raw::CriticalSectionRawMutex, Mutex},
    channel::Channel,
    signal::Signal,
};

use super::types::{AppEvent, BlinkRequest};

pub(crate) const UART_BAUD: u32 = 115_200;
pub(crate) const PANEL_SPI_MHZ: u32 = 40;
pub(crate) const PANEL_SIZE: u16 = 240;
pub(crate) const PANEL_SPI_BUF_LEN: usize = 512;
pub(crate) const FACE_OFFSET_X: i32 = (PANEL_SIZE as i32 - SCREEN_WIDTH) / 2;
pub(crate) const FACE_OFFSET_Y: i32 = (PANEL_SIZE as i32 - SCREEN_HEIGHT) / 2;
pub(crate) const FRAME_WIDTH: usize = SCREEN_WIDTH as usize;
pub(crate) const FRAME_HEIGHT: usize = SCREEN_HEIGHT as usize;

pub(crate) const BATTERY_SAMPLE_MS: u64 = 30_000;
pub(crate) const LINK_DEBOUNCE_MS: u64 = 50;
pub(crate) const APP_EVENT_ENQUEUE_MAX_RETRIES: usize = 5;
pub(crate) const APP_EVENT_ENQUEUE_RETRY_MS: u64 = 20;

pub(crate) static APP_EVENTS: Channel<CriticalSectionRawMutex, AppEvent, 8> = Channel::new();
pub(crate) static BLINK_REQUESTS: Signal<CriticalSectionRawMutex, BlinkRequest> = Signal::new();
pub(crate) static HAPTIC_REQUESTS: Signal<CriticalSectionRawMutex, u64> = Signal::new();
pub(crate) static CLOCK_RESYNC: Signal<CriticalSectionRawMutex, ()> = Signal::new();

pub(crate) static LOCAL_CLOCK: Mutex<CriticalSectionRawMutex, Cell<LocalClock>> =
    Mutex::new(Cell::new(LocalClock::new()));
pub(crate) static LATEST_BATTERY: Mutex<CriticalSectionRawMutex, Cell<BatteryReading>> =
    Mutex::new(Cell::new(BatteryReading::new(0, false)));
pub(crate) static LINK_CONNECTED: AtomicBool = AtomicBool::new(false);

pub(crate) mod config;
mod display;
mod haptics;
mod sensors;
mod serial;
pub(crate) mod types;

use bold_hour::calendar::{ms_until_next_minute, CalendarTime, LocalClock};
use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};
use esp_hal::{
    analog::adc::{Adc, AdcConfig, Attenuation},
    delay::Delay,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    spi::{
        master::{Config as SpiConfig, Spi},
        Mode as SpiMode,
    },
    time::Rate,
    timer::timg::TimerGroup,
    uart::{Config as UartConfig, Uart},
};
use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_rtos::embassy::Executor;
use mipidsi::{
    interface::SpiInterface,
    models::GC9A01,
    options::{ColorInversion, ColorOrder},
    Builder as DisplayBuilder,
};
use static_cell::StaticCell;

use self::{
    config::{
        APP_EVENTS, BLINK_REQUESTS, CLOCK_RESYNC, LOCAL_CLOCK, PANEL_SIZE, PANEL_SPI_BUF_LEN,
        PANEL_SPI_MHZ, UART_BAUD,
    },
    types::{AppEvent, BatteryMonitor, DisplayContext, LinkMonitor, PanelDriver, PanelSpi},
};

static EXECUTOR: StaticCell<Executor> = StaticCell::new();
static PANEL_SPI_BUF: StaticCell<[u8; PANEL_SPI_BUF_LEN]> = StaticCell::new();

pub(crate) fn run() -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);

    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let uart_cfg = UartConfig::default().with_baudrate(UART_BAUD);
    let uart = match Uart::new(peripherals.UART0, uart_cfg) {
        Ok(uart) => uart
            .with_rx(peripherals.GPIO3)
            .with_tx(peripherals.GPIO1)
            .into_async(),
        Err(_) => halt_forever(),
    };

    let panel_spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_mhz(PANEL_SPI_MHZ))
        .with_mode(SpiMode::_0);
    let panel_spi = match Spi::new(peripherals.SPI2, panel_spi_cfg) {
        Ok(spi) => spi
            .with_sck(peripherals.GPIO18)
            .with_mosi(peripherals.GPIO23),
        Err(_) => halt_forever(),
    };
    let panel_cs = Output::new(peripherals.GPIO5, Level::High, OutputConfig::default());
    let panel_dc = Output::new(peripherals.GPIO16, Level::Low, OutputConfig::default());
    let panel_rst = Output::new(peripherals.GPIO17, Level::High, OutputConfig::default());
    let backlight = Output::new(peripherals.GPIO4, Level::High, OutputConfig::default());
    let Ok(panel_dev) = ExclusiveDevice::new(panel_spi, panel_cs, NoDelay) else {
        halt_forever();
    };
    let panel_buf = PANEL_SPI_BUF.init([0; PANEL_SPI_BUF_LEN]);
    let Some(panel) = init_panel(panel_dev, panel_dc, panel_rst, panel_buf, &mut Delay::new())
    else {
        esp_println::println!("panel: init_failed");
        halt_forever();
    };

    let mut adc_cfg = AdcConfig::new();
    let sense = adc_cfg.enable_pin(peripherals.GPIO35, Attenuation::_11dB);
    let mut battery = BatteryMonitor {
        adc: Adc::new(peripherals.ADC1, adc_cfg),
        sense,
        charge_status: Input::new(peripherals.GPIO34, InputConfig::default()),
    };
    sensors::publish_battery(battery.sample());

    let link = LinkMonitor {
        state: Input::new(
            peripherals.GPIO27,
            InputConfig::default().with_pull(Pull::Down),
        ),
    };
    sensors::publish_link(link.is_connected());

    let motor = Output::new(peripherals.GPIO26, Level::Low, OutputConfig::default());

    let display_context = DisplayContext {
        panel,
        _backlight: backlight,
    };

    esp_println::println!("bold-hour: boot");
    let executor = EXECUTOR.init(Executor::new());
    executor.run(move |spawner| {
        spawner.must_spawn(display::display_task(display_context));
        spawner.must_spawn(clock_task());
        spawner.must_spawn(blink_timer_task());
        spawner.must_spawn(sensors::battery_task(battery));
        spawner.must_spawn(sensors::link_task(link));
        spawner.must_spawn(haptics::haptics_task(motor));
        spawner.must_spawn(serial::time_sync_task(uart));
    });
}

/// GC9A01 bring-up: hardware reset, then colour inversion and BGR order for
/// the round module.
fn init_panel<D: DelayNs>(
    device: PanelSpi,
    dc: Output<'static>,
    rst: Output<'static>,
    buffer: &'static mut [u8],
    delay: &mut D,
) -> Option<PanelDriver> {
    DisplayBuilder::new(GC9A01, SpiInterface::new(device, dc, buffer))
        .display_size(PANEL_SIZE, PANEL_SIZE)
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(rst)
        .init(delay)
        .ok()
}

pub(crate) fn uptime_ms() -> u64 {
    Instant::now().as_millis()
}

pub(crate) fn local_clock() -> LocalClock {
    LOCAL_CLOCK.lock(|clock| clock.get())
}

pub(crate) fn local_now() -> CalendarTime {
    local_clock().now(uptime_ms())
}

#[embassy_executor::task]
async fn clock_task() {
    loop {
        let delay_ms = ms_until_next_minute(local_clock().local_ms(uptime_ms()));
        match select(Timer::after_millis(delay_ms), CLOCK_RESYNC.wait()).await {
            Either::First(()) => APP_EVENTS.send(AppEvent::MinuteTick).await,
            Either::Second(()) => {}
        }
    }
}

/// One-shot blink delays. A newer request replaces the one in flight.
#[embassy_executor::task]
async fn blink_timer_task() {
    let mut pending = BLINK_REQUESTS.wait().await;
    loop {
        match select(
            Timer::after_millis(pending.delay_ms as u64),
            BLINK_REQUESTS.wait(),
        )
        .await
        {
            Either::First(()) => {
                APP_EVENTS
                    .send(AppEvent::BlinkTimerFired {
                        generation: pending.generation,
                    })
                    .await;
                pending = BLINK_REQUESTS.wait().await;
            }
            Either::Second(next) => pending = next,
        }
    }
}

pub(crate) fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

#![no_std]
#![no_main]

mod app;

use esp_backtrace as _;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal::main]
fn main() -> ! {
    app::run()
}

use embassy_time::Timer;
use esp_hal::gpio::Output;

use super::config::HAPTIC_REQUESTS;

#[embassy_executor::task]
pub(crate) async fn haptics_task(mut motor: Output<'static>) {
    loop {
        let pulse_ms = HAPTIC_REQUESTS.wait().await;
        motor.set_high();
        Timer::after_millis(pulse_ms).await;
        motor.set_low();
    }
}

use bold_hour::serial::{
    parse_serial_command, LineReadEvent, SerialCommand, SerialLineReader, CMD_ERR, LINE_OVERFLOW,
};
use embassy_time::Timer;

use super::{
    config::{APP_EVENTS, APP_EVENT_ENQUEUE_MAX_RETRIES, APP_EVENT_ENQUEUE_RETRY_MS},
    types::{AppEvent, SerialUart},
};

#[embassy_executor::task]
pub(crate) async fn time_sync_task(mut uart: SerialUart) {
    let mut reader = SerialLineReader::new();
    let mut rx = [0u8; 16];

    loop {
        let read = match uart.read_async(&mut rx).await {
            Ok(read) => read,
            Err(_) => continue,
        };

        for &byte in &rx[..read] {
            let command = match reader.push_byte(byte) {
                LineReadEvent::Pending => continue,
                LineReadEvent::Overflow => {
                    let _ = uart_write_all(&mut uart, LINE_OVERFLOW).await;
                    continue;
                }
                LineReadEvent::Garbled => None,
                LineReadEvent::Line(line) => parse_serial_command(line),
            };

            let Some(command) = command else {
                let _ = uart_write_all(&mut uart, CMD_ERR).await;
                continue;
            };
            let (ok_response, busy_response) = command.responses();
            let response = if enqueue_app_event_with_retry(app_event(command)).await {
                ok_response
            } else {
                busy_response
            };
            let _ = uart_write_all(&mut uart, response).await;
        }
    }
}

fn app_event(command: SerialCommand) -> AppEvent {
    match command {
        SerialCommand::TimeSync(sync) => AppEvent::TimeSync(sync),
        SerialCommand::Repaint => AppEvent::ForceRepaint,
    }
}

async fn enqueue_app_event_with_retry(event: AppEvent) -> bool {
    for attempt in 0..=APP_EVENT_ENQUEUE_MAX_RETRIES {
        if APP_EVENTS.try_send(event).is_ok() {
            return true;
        }
        if attempt < APP_EVENT_ENQUEUE_MAX_RETRIES {
            Timer::after_millis(APP_EVENT_ENQUEUE_RETRY_MS).await;
        }
    }
    false
}

async fn uart_write_all(uart: &mut SerialUart, mut bytes: &[u8]) -> bool {
    while !bytes.is_empty() {
        match uart.write_async(bytes).await {
            Ok(0) => return false,
            Ok(written) => bytes = &bytes[written..],
            Err(_) => return false,
        }
    }
    true
}

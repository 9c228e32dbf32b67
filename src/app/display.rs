use bold_hour::{
    calendar::LocalClock,
    config::{COLOR_SCHEME, FACE_VARIANT, LONG_PULSE_MS},
    face::{FaceAction, FaceConfig, FaceEngine, FaceOutput, FaceRenderer, FaceScene},
};
use embedded_graphics::{image::Image, pixelcolor::Rgb565, prelude::*};

use super::{
    config::{
        APP_EVENTS, BLINK_REQUESTS, CLOCK_RESYNC, FACE_OFFSET_X, FACE_OFFSET_Y, HAPTIC_REQUESTS,
        LOCAL_CLOCK,
    },
    local_now,
    sensors::{latest_battery, link_connected},
    types::{AppEvent, BlinkRequest, DisplayContext, FaceFrame, PanelDriver},
    uptime_ms,
};

#[embassy_executor::task]
pub(crate) async fn display_task(mut context: DisplayContext) {
    let config = FaceConfig::new(FACE_VARIANT);
    let mut engine = FaceEngine::new(config);
    let mut scene = FaceScene::new(config);
    let renderer = FaceRenderer::new(COLOR_SCHEME);
    let mut frame = FaceFrame::new();

    let _ = context
        .panel
        .clear(Rgb565::from(renderer.background_color()));

    let link = config.variant.has_status_bar().then(link_connected);
    let output = engine.initialize(&local_now(), latest_battery(), link);
    dispatch_output(&mut scene, &engine, &output);
    flush_if_dirty(&mut context.panel, &mut frame, &mut scene, &renderer);

    loop {
        let output = match APP_EVENTS.receive().await {
            AppEvent::MinuteTick => engine.minute_tick(&local_now(), latest_battery()),
            AppEvent::BatteryChanged(reading) => engine.battery_changed(reading),
            AppEvent::LinkChanged(connected) => engine.link_changed(connected),
            AppEvent::BlinkTimerFired { generation } => engine.blink_timer_fired(generation),
            AppEvent::TimeSync(sync) => {
                LOCAL_CLOCK.lock(|clock| {
                    let mut synced = LocalClock::new();
                    synced.sync(sync, uptime_ms());
                    clock.set(synced);
                });
                CLOCK_RESYNC.signal(());
                log::info!(
                    "time synced: {} tz {:+}",
                    sync.unix_epoch_utc_seconds,
                    sync.tz_offset_minutes
                );
                engine.minute_tick(&local_now(), latest_battery())
            }
            AppEvent::ForceRepaint => {
                scene.mark_all_dirty();
                FaceOutput::default()
            }
        };

        dispatch_output(&mut scene, &engine, &output);
        flush_if_dirty(&mut context.panel, &mut frame, &mut scene, &renderer);
    }
}

fn dispatch_output(scene: &mut FaceScene, engine: &FaceEngine, output: &FaceOutput) {
    scene.apply_output(output, engine.status_bar());
    for action in output.actions.iter() {
        match action {
            FaceAction::LongPulse => HAPTIC_REQUESTS.signal(LONG_PULSE_MS),
            FaceAction::ScheduleBlink {
                delay_ms,
                generation,
            } => BLINK_REQUESTS.signal(BlinkRequest {
                delay_ms: *delay_ms,
                generation: *generation,
            }),
            _ => {}
        }
    }
}

fn flush_if_dirty(
    panel: &mut PanelDriver,
    frame: &mut FaceFrame,
    scene: &mut FaceScene,
    renderer: &FaceRenderer,
) {
    if scene.take_dirty().is_empty() {
        return;
    }
    renderer.draw(scene, frame);
    let raw = frame.as_image();
    let _ = Image::new(&raw, Point::new(FACE_OFFSET_X, FACE_OFFSET_Y))
        .draw(&mut panel.color_converted());
}

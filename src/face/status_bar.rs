use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::actions::{ActionBuffer, FaceAction};
use crate::config::{BLINK_INTERVAL_MS, BLINK_REPEAT_START};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderTone {
    Foreground,
    Background,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusBarStyle {
    /// Connected: a single line along the top edge of the bar.
    Line,
    /// Disconnected: the bar outline, blinking while the alert runs.
    Box { border: BorderTone },
}

#[derive(Clone, Copy, Debug)]
enum StatusBarEvent {
    LinkChanged { connected: bool, alert: bool },
    BlinkFired { generation: u16 },
}

#[derive(Default)]
struct DispatchContext {
    actions: ActionBuffer,
}

/// Bluetooth indicator of the enhanced face.
pub struct StatusBar {
    machine: statig::blocking::StateMachine<StatusBarHsm>,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            machine: StatusBarHsm::default().state_machine(),
        }
    }

    /// `alert` selects the haptic pulse and blink sequence on disconnect.
    pub fn link_changed(&mut self, connected: bool, alert: bool, actions: &mut ActionBuffer) {
        self.dispatch(StatusBarEvent::LinkChanged { connected, alert }, actions);
    }

    pub fn blink_fired(&mut self, generation: u16, actions: &mut ActionBuffer) {
        self.dispatch(StatusBarEvent::BlinkFired { generation }, actions);
    }

    pub fn is_connected(&self) -> bool {
        self.machine.inner().connected
    }

    pub fn remaining_blinks(&self) -> i8 {
        self.machine.inner().remaining_blinks
    }

    pub fn generation(&self) -> u16 {
        self.machine.inner().generation
    }

    pub fn style(&self) -> StatusBarStyle {
        let hsm = self.machine.inner();
        if hsm.connected {
            return StatusBarStyle::Line;
        }
        // Truncating remainder: -1 keeps the foreground border once the
        // sequence is spent.
        let border = if hsm.remaining_blinks % 2 == 1 {
            BorderTone::Background
        } else {
            BorderTone::Foreground
        };
        StatusBarStyle::Box { border }
    }

    fn dispatch(&mut self, event: StatusBarEvent, actions: &mut ActionBuffer) {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        for action in context.actions.iter() {
            actions.push(action.clone());
        }
    }
}

struct StatusBarHsm {
    connected: bool,
    remaining_blinks: i8,
    generation: u16,
}

impl Default for StatusBarHsm {
    fn default() -> Self {
        Self {
            connected: true,
            remaining_blinks: 0,
            generation: 0,
        }
    }
}

impl StatusBarHsm {
    fn schedule_blink(&self, context: &mut DispatchContext) {
        context.actions.push(FaceAction::ScheduleBlink {
            delay_ms: BLINK_INTERVAL_MS,
            generation: self.generation,
        });
    }

    fn reconnect(&mut self, context: &mut DispatchContext) -> Outcome<State> {
        log::info!("link restored");
        self.connected = true;
        self.remaining_blinks = 0;
        context.actions.push(FaceAction::RedrawStatusBar);
        Transition(State::connected())
    }
}

#[state_machine(initial = "State::connected()")]
impl StatusBarHsm {
    #[state]
    fn connected(&mut self, context: &mut DispatchContext, event: &StatusBarEvent) -> Outcome<State> {
        match event {
            StatusBarEvent::LinkChanged {
                connected: false,
                alert,
            } => {
                self.connected = false;
                self.remaining_blinks = 0;
                context.actions.push(FaceAction::RedrawStatusBar);
                if !*alert {
                    log::info!("link down");
                    return Transition(State::disconnected());
                }

                log::info!("link lost, alerting");
                context.actions.push(FaceAction::LongPulse);
                self.remaining_blinks = BLINK_REPEAT_START;
                self.generation = self.generation.wrapping_add(1);
                self.schedule_blink(context);
                Transition(State::blinking())
            }
            _ => Handled,
        }
    }

    #[state(superstate = "link_down")]
    fn blinking(&mut self, context: &mut DispatchContext, event: &StatusBarEvent) -> Outcome<State> {
        match event {
            StatusBarEvent::BlinkFired { generation } if *generation == self.generation => {
                self.remaining_blinks -= 1;
                context.actions.push(FaceAction::RedrawStatusBar);
                if self.remaining_blinks >= 0 {
                    self.schedule_blink(context);
                    Handled
                } else {
                    log::debug!("blink sequence finished");
                    Transition(State::disconnected())
                }
            }
            _ => Super,
        }
    }

    #[state(superstate = "link_down")]
    fn disconnected(event: &StatusBarEvent) -> Outcome<State> {
        match event {
            StatusBarEvent::LinkChanged {
                connected: false, ..
            } => Handled,
            _ => Super,
        }
    }

    #[superstate]
    fn link_down(&mut self, context: &mut DispatchContext, event: &StatusBarEvent) -> Outcome<State> {
        match event {
            StatusBarEvent::LinkChanged {
                connected: true, ..
            } => self.reconnect(context),
            StatusBarEvent::BlinkFired { generation } => {
                log::debug!("ignoring stale blink {generation}");
                Handled
            }
            _ => Handled,
        }
    }
}

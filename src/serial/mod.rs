//! Host console protocol: newline-terminated ASCII commands over UART.

mod line_reader;
mod parser;

pub use line_reader::{LineReadEvent, SerialLineReader};
pub use parser::{parse_repaint_command, parse_serial_command, parse_timeset_command};

use crate::calendar::TimeSync;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerialCommand {
    TimeSync(TimeSync),
    Repaint,
}

impl SerialCommand {
    /// `(accepted, busy)` replies for a command handed to the display task.
    pub const fn responses(self) -> (&'static [u8], &'static [u8]) {
        match self {
            Self::TimeSync(_) => (TIMESET_OK, TIMESET_BUSY),
            Self::Repaint => (REPAINT_OK, REPAINT_BUSY),
        }
    }
}

pub const TIMESET_OK: &[u8] = b"TIMESET OK\r\n";
pub const TIMESET_BUSY: &[u8] = b"TIMESET BUSY\r\n";
pub const REPAINT_OK: &[u8] = b"REPAINT OK\r\n";
pub const REPAINT_BUSY: &[u8] = b"REPAINT BUSY\r\n";
pub const CMD_ERR: &[u8] = b"CMD ERR\r\n";
pub const LINE_OVERFLOW: &[u8] = b"CMD ERR overflow\r\n";

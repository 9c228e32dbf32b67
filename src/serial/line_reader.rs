use heapless::Vec;

use crate::config::TIMESET_CMD_BUF_LEN;

#[derive(Debug, PartialEq, Eq)]
pub enum LineReadEvent<'a> {
    Pending,
    Line(&'a str),
    /// The line outgrew the buffer; the rest of it is skipped.
    Overflow,
    /// A terminated line that is not valid UTF-8.
    Garbled,
}

/// Console line assembly. Control bytes other than tab are dropped so a
/// stray NUL or escape from the host terminal never reaches the parser.
pub struct SerialLineReader {
    line: Vec<u8, TIMESET_CMD_BUF_LEN>,
    skipping: bool,
    delivered: bool,
}

impl SerialLineReader {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            skipping: false,
            delivered: false,
        }
    }

    pub fn push_byte(&mut self, byte: u8) -> LineReadEvent<'_> {
        if core::mem::take(&mut self.delivered) {
            self.line.clear();
        }

        match byte {
            b'\r' | b'\n' => {
                if core::mem::take(&mut self.skipping) || self.line.is_empty() {
                    self.line.clear();
                    return LineReadEvent::Pending;
                }
                self.delivered = true;
                match core::str::from_utf8(&self.line) {
                    Ok(text) => LineReadEvent::Line(text),
                    Err(_) => LineReadEvent::Garbled,
                }
            }
            _ if self.skipping => LineReadEvent::Pending,
            _ if byte.is_ascii_control() && byte != b'\t' => LineReadEvent::Pending,
            _ => match self.line.push(byte) {
                Ok(()) => LineReadEvent::Pending,
                Err(_) => {
                    self.line.clear();
                    self.skipping = true;
                    LineReadEvent::Overflow
                }
            },
        }
    }
}

impl Default for SerialLineReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed<'a>(reader: &'a mut SerialLineReader, bytes: &[u8]) -> LineReadEvent<'a> {
        let (last, head) = bytes.split_last().expect("non-empty input");
        for &byte in head {
            assert_eq!(reader.push_byte(byte), LineReadEvent::Pending);
        }
        reader.push_byte(*last)
    }

    #[test]
    fn crlf_yields_one_line() {
        let mut reader = SerialLineReader::new();
        assert_eq!(feed(&mut reader, b"REPAINT\r"), LineReadEvent::Line("REPAINT"));
        assert_eq!(reader.push_byte(b'\n'), LineReadEvent::Pending);
        assert_eq!(feed(&mut reader, b"REFRESH\n"), LineReadEvent::Line("REFRESH"));
    }

    #[test]
    fn control_bytes_are_dropped() {
        let mut reader = SerialLineReader::new();
        assert_eq!(
            feed(&mut reader, b"\x00TIME\x1bSET 5\t0\n"),
            LineReadEvent::Line("TIMESET 5\t0")
        );
    }

    #[test]
    fn overlong_line_is_skipped_until_terminator() {
        let mut reader = SerialLineReader::new();
        for _ in 0..TIMESET_CMD_BUF_LEN {
            assert_eq!(reader.push_byte(b'9'), LineReadEvent::Pending);
        }
        assert_eq!(reader.push_byte(b'9'), LineReadEvent::Overflow);
        assert_eq!(reader.push_byte(b'9'), LineReadEvent::Pending);
        assert_eq!(reader.push_byte(b'\n'), LineReadEvent::Pending);
        assert_eq!(feed(&mut reader, b"T\n"), LineReadEvent::Line("T"));
    }

    #[test]
    fn invalid_utf8_is_reported_and_cleared() {
        let mut reader = SerialLineReader::new();
        assert_eq!(feed(&mut reader, b"TIME\xffSET\n"), LineReadEvent::Garbled);
        assert_eq!(feed(&mut reader, b"REPAINT\n"), LineReadEvent::Line("REPAINT"));
    }
}

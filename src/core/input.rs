//! Raw byte stream decoding into logical input events.
//!
//! The decoder owns a byte buffer that survives across reads, so a
//! multi-byte code point or escape sequence split between two reads is
//! reassembled instead of dropped. Unknown escape sequences are consumed
//! and swallowed without producing an event.

use std::collections::VecDeque;

use tracing::trace;

const ESC: u8 = 0x1b;

/// One logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Tab,
    Enter,
    Backspace,
    /// In-band quit request (raw mode delivers Ctrl+C as byte 0x03, not as
    /// a signal).
    CtrlC,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

/// Outcome of one decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Event(InputEvent),
    /// The buffer holds no complete event yet; wait for the next read.
    Incomplete,
}

enum EscapeStep {
    Event(InputEvent, usize),
    Swallow(usize),
    Incomplete,
}

/// Stateful decoder over a chunked byte stream.
#[derive(Debug, Default)]
pub struct Decoder {
    pending: VecDeque<u8>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends freshly read bytes to the pending buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes.iter().copied());
    }

    /// Bytes buffered but not yet decoded.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Decodes the next event, consuming swallowed prefixes along the way.
    pub fn next_event(&mut self) -> Decoded {
        loop {
            let Some(&lead) = self.pending.front() else {
                return Decoded::Incomplete;
            };

            match lead {
                ESC => match self.decode_escape() {
                    EscapeStep::Event(event, len) => {
                        self.consume(len);
                        return Decoded::Event(event);
                    }
                    EscapeStep::Swallow(len) => {
                        trace!(len, "swallowing unknown escape sequence");
                        self.consume(len);
                    }
                    EscapeStep::Incomplete => return Decoded::Incomplete,
                },
                0x03 => return self.take_event(1, InputEvent::CtrlC),
                0x09 => return self.take_event(1, InputEvent::Tab),
                0x0a | 0x0d => return self.take_event(1, InputEvent::Enter),
                0x7f => return self.take_event(1, InputEvent::Backspace),
                byte if byte < 0x80 => {
                    return self.take_event(1, InputEvent::Char(byte as char));
                }
                byte => {
                    let Some(need) = utf8_sequence_len(byte) else {
                        // Stray continuation byte; drop it and keep going.
                        trace!(byte, "dropping invalid UTF-8 lead byte");
                        self.consume(1);
                        continue;
                    };
                    if self.pending.len() < need {
                        return Decoded::Incomplete;
                    }
                    let bytes: Vec<u8> = self.pending.iter().take(need).copied().collect();
                    self.consume(need);
                    match std::str::from_utf8(&bytes)
                        .ok()
                        .and_then(|s| s.chars().next())
                    {
                        Some(ch) => return Decoded::Event(InputEvent::Char(ch)),
                        // Malformed multi-byte sequence; swallow it whole.
                        None => trace!(?bytes, "dropping malformed UTF-8 sequence"),
                    }
                }
            }
        }
    }

    fn take_event(&mut self, len: usize, event: InputEvent) -> Decoded {
        self.consume(len);
        Decoded::Event(event)
    }

    fn consume(&mut self, len: usize) {
        for _ in 0..len {
            self.pending.pop_front();
        }
    }

    /// Inspects a buffered `ESC ...` prefix without consuming it.
    fn decode_escape(&self) -> EscapeStep {
        let Some(&second) = self.pending.get(1) else {
            return EscapeStep::Incomplete;
        };
        if second != b'[' {
            // Not a CSI introducer; discard ESC plus the stray byte.
            return EscapeStep::Swallow(2);
        }
        let Some(&third) = self.pending.get(2) else {
            return EscapeStep::Incomplete;
        };
        match third {
            b'A' => EscapeStep::Event(InputEvent::Up, 3),
            b'B' => EscapeStep::Event(InputEvent::Down, 3),
            b'C' => EscapeStep::Event(InputEvent::Right, 3),
            b'D' => EscapeStep::Event(InputEvent::Left, 3),
            b'5' | b'6' => {
                let Some(&fourth) = self.pending.get(3) else {
                    return EscapeStep::Incomplete;
                };
                if fourth == b'~' {
                    let event = if third == b'5' {
                        InputEvent::PageUp
                    } else {
                        InputEvent::PageDown
                    };
                    EscapeStep::Event(event, 4)
                } else {
                    EscapeStep::Swallow(4)
                }
            }
            _ => EscapeStep::Swallow(3),
        }
    }
}

fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xff => Some(4),
        _ => None,
    }
}

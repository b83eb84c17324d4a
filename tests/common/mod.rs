//! Scripted terminal for end-to-end session tests.

use std::collections::VecDeque;

use dash_tui::Terminal;

/// Plays back queued input chunks and captures everything written.
///
/// Polling reports ready whenever a chunk is queued; once the script is
/// exhausted, reads return 0 so the session exits through its
/// end-of-input path. An optional scheduled resize changes the reported
/// size after a given number of polls.
pub struct ScriptTerminal {
    chunks: VecDeque<Vec<u8>>,
    pub written: String,
    pub starts: usize,
    pub stops: usize,
    size: (u16, u16),
    resize_after_polls: Option<(usize, (u16, u16))>,
    polls: usize,
}

impl ScriptTerminal {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            chunks: VecDeque::new(),
            written: String::new(),
            starts: 0,
            stops: 0,
            size: (columns, rows),
            resize_after_polls: None,
            polls: 0,
        }
    }

    /// Queues one read's worth of bytes.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.chunks.push_back(bytes.to_vec());
    }

    /// Schedules the reported size to change once `polls` polls have
    /// happened.
    pub fn resize_after(&mut self, polls: usize, columns: u16, rows: u16) {
        self.resize_after_polls = Some((polls, (columns, rows)));
    }
}

impl Terminal for ScriptTerminal {
    fn start(&mut self) -> std::io::Result<()> {
        self.starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> std::io::Result<()> {
        self.stops += 1;
        Ok(())
    }

    fn poll_input(&mut self, _timeout_ms: i32) -> std::io::Result<bool> {
        self.polls += 1;
        if let Some((at, size)) = self.resize_after_polls {
            if self.polls >= at {
                self.size = size;
                self.resize_after_polls = None;
            }
        }
        Ok(true)
    }

    fn read_input(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }

    fn write(&mut self, data: &str) {
        self.written.push_str(data);
    }

    fn columns(&self) -> u16 {
        self.size.0
    }

    fn rows(&self) -> u16 {
        self.size.1
    }
}

//! The session: one synchronous loop tying input, state, and painting
//! together.
//!
//! Each tick re-queries the terminal size, repaints (fully when focus,
//! scroll, size, or history changed; incrementally otherwise), then polls
//! for input with a bounded timeout and dispatches at most one decoded
//! event. Everything runs on the calling thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::core::editor::EditBuffer;
use crate::core::geometry::{Layout, TerminalSize};
use crate::core::history::{wrap_messages, HistoryScroll};
use crate::core::input::{Decoded, Decoder, InputEvent};
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::status::{CursorPositionStatus, MessageCountStatus, ModeStatus, StatusBar};
use crate::core::terminal::{Terminal, TerminalGuard};
use crate::error::DashError;
use crate::render::renderer::{Frame, Renderer};

const READ_CHUNK: usize = 64;
const POLL_ERROR_BACKOFF: Duration = Duration::from_millis(10);

fn query_size<T: Terminal>(terminal: &T) -> TerminalSize {
    TerminalSize {
        columns: terminal.columns(),
        rows: terminal.rows(),
    }
}

/// Which panel receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Output,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::Output,
            Focus::Output => Focus::Input,
        }
    }
}

/// Called with each submitted message; a returned string is appended to
/// the history as a response.
pub type SubmitHandler = Box<dyn FnMut(&str) -> Option<String>>;

/// Dashboard state plus the event loop driving it.
pub struct Session {
    config: DashboardConfig,
    decoder: Decoder,
    editor: EditBuffer,
    scroll: HistoryScroll,
    messages: Vec<String>,
    focus: Focus,
    needs_full_redraw: bool,
    renderer: Renderer,
    running: bool,
    shutdown: Option<Arc<AtomicBool>>,
    on_submit: Option<SubmitHandler>,
}

impl Session {
    pub fn new(config: DashboardConfig) -> Self {
        let renderer = Renderer::new(config.active_color, config.dim_color);
        Self {
            config,
            decoder: Decoder::new(),
            editor: EditBuffer::new(),
            scroll: HistoryScroll::new(),
            messages: Vec::new(),
            focus: Focus::Input,
            needs_full_redraw: true,
            renderer,
            running: false,
            shutdown: None,
            on_submit: None,
        }
    }

    /// External shutdown request, typically registered on SIGTERM/SIGINT.
    /// Checked once per tick; the session then exits through the normal
    /// teardown path.
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = Some(flag);
        self
    }

    pub fn with_submit_handler(mut self, handler: SubmitHandler) -> Self {
        self.on_submit = Some(handler);
        self
    }

    /// Appends a message to the history without going through the
    /// composer, e.g. a greeting painted before the first keystroke.
    pub fn push_message(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
        self.needs_full_redraw = true;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset()
    }

    pub fn input_lines(&self) -> &[String; crate::core::editor::INPUT_LINES] {
        self.editor.lines()
    }

    /// Runs the dashboard until Ctrl+C, end of input, or a shutdown
    /// signal. The terminal is restored on every exit path; the size is
    /// validated before raw mode is entered.
    pub fn run<T: Terminal>(&mut self, terminal: &mut T) -> Result<(), DashError> {
        let mut size = query_size(terminal);
        let mut layout = Layout::compute(size)?;

        terminal.start()?;
        let mut guard = TerminalGuard::new(terminal);

        let mut gate = OutputGate::new();
        gate.push(TerminalCmd::EnterAltScreen);
        gate.push(TerminalCmd::HideCursor);
        gate.flush(guard.terminal_mut());

        info!(columns = size.columns, rows = size.rows, "session started");
        self.running = true;
        self.needs_full_redraw = true;

        let result = loop {
            if self.shutdown_requested() {
                info!("shutdown signal observed");
                break Ok(());
            }

            let current = query_size(guard.terminal_mut());
            if current != size {
                debug!(
                    columns = current.columns,
                    rows = current.rows,
                    "terminal resized"
                );
                size = current;
                layout = match Layout::compute(size) {
                    Ok(layout) => layout,
                    Err(err) => break Err(err),
                };
                self.needs_full_redraw = true;
            }

            self.paint(&mut gate, guard.terminal_mut(), &layout);

            if !self.tick_input(guard.terminal_mut(), &layout) {
                break Ok(());
            }
            if !self.running {
                break Ok(());
            }
        };

        gate.push(TerminalCmd::ShowCursor);
        gate.push(TerminalCmd::LeaveAltScreen);
        gate.flush(guard.terminal_mut());
        drop(guard);

        info!(messages = self.messages.len(), "session ended");
        result
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn paint<T: Terminal>(&mut self, gate: &mut OutputGate, terminal: &mut T, layout: &Layout) {
        let display_lines = wrap_messages(&self.messages, layout.inner_width());
        self.scroll
            .clamp(display_lines.len(), layout.visible_lines());

        let (cursor_row, cursor_col) = self.editor.cursor();
        let mut bar = StatusBar::new();
        bar.add_status(Box::new(ModeStatus::new(self.focus)));
        bar.add_status(Box::new(CursorPositionStatus::new(cursor_row, cursor_col)));
        bar.add_status(Box::new(MessageCountStatus::new(self.messages.len())));
        let status_line = format!("{}{}", bar.render(), self.config.status_legend);

        let frame = Frame {
            layout,
            focus: self.focus,
            input_lines: self.editor.lines(),
            cursor: (cursor_row, cursor_col),
            display_lines: &display_lines,
            scroll_offset: self.scroll.offset(),
            status_line: &status_line,
        };

        if self.needs_full_redraw {
            self.renderer.render_full(gate, &frame);
            self.needs_full_redraw = false;
        } else {
            self.renderer.render_partial(gate, &frame);
        }
        // The cursor stays hidden for the whole run; teardown shows it.
        gate.flush(terminal);
    }

    /// Polls, reads, and dispatches at most one event. Returns `false`
    /// when the input stream is exhausted.
    ///
    /// Decode is attempted before polling: a buffered complete event is
    /// dispatched without touching the terminal, while an incomplete
    /// prefix (a lone ESC, a split multi-byte code point) falls through
    /// to the bounded poll so the remaining bytes can arrive.
    fn tick_input<T: Terminal>(&mut self, terminal: &mut T, layout: &Layout) -> bool {
        if let Decoded::Event(event) = self.decoder.next_event() {
            self.dispatch(event, layout);
            return true;
        }

        let ready = match terminal.poll_input(self.config.poll_timeout_ms) {
            Ok(ready) => ready,
            Err(err) => {
                warn!(%err, "input poll failed, backing off");
                std::thread::sleep(POLL_ERROR_BACKOFF);
                return true;
            }
        };
        if !ready {
            return true;
        }

        let mut buf = [0u8; READ_CHUNK];
        match terminal.read_input(&mut buf) {
            Ok(0) => {
                debug!("input stream closed");
                return false;
            }
            Ok(len) => self.decoder.feed(&buf[..len]),
            Err(err) => {
                warn!(%err, "input read failed, backing off");
                std::thread::sleep(POLL_ERROR_BACKOFF);
                return true;
            }
        }

        if let Decoded::Event(event) = self.decoder.next_event() {
            self.dispatch(event, layout);
        }
        true
    }

    fn dispatch(&mut self, event: InputEvent, layout: &Layout) {
        let total = wrap_messages(&self.messages, layout.inner_width()).len();
        let visible = layout.visible_lines();

        match event {
            InputEvent::CtrlC => {
                info!("quit requested");
                self.running = false;
            }
            InputEvent::Tab => {
                self.focus = self.focus.toggle();
                self.needs_full_redraw = true;
            }
            InputEvent::Enter => {
                if self.focus == Focus::Input {
                    self.submit(layout);
                }
            }
            InputEvent::Char(ch) => {
                if self.focus == Focus::Input {
                    self.editor.insert(ch);
                }
            }
            InputEvent::Backspace => {
                if self.focus == Focus::Input {
                    self.editor.backspace();
                }
            }
            InputEvent::Up => match self.focus {
                Focus::Input => self.editor.move_up(),
                Focus::Output => self.scroll_with(|scroll| scroll.line_up()),
            },
            InputEvent::Down => match self.focus {
                Focus::Input => self.editor.move_down(),
                Focus::Output => self.scroll_with(|scroll| scroll.line_down(total, visible)),
            },
            InputEvent::Left => {
                if self.focus == Focus::Input {
                    self.editor.move_left();
                }
            }
            InputEvent::Right => {
                if self.focus == Focus::Input {
                    self.editor.move_right();
                }
            }
            InputEvent::PageUp => {
                if self.focus == Focus::Output {
                    self.scroll_with(|scroll| scroll.page_up(layout.page_size()));
                }
            }
            InputEvent::PageDown => {
                if self.focus == Focus::Output {
                    self.scroll_with(|scroll| {
                        scroll.page_down(layout.page_size(), total, visible)
                    });
                }
            }
        }
    }

    /// Runs a scroll operation and flags a full repaint only when the
    /// offset actually moved; a key pressed at a boundary repaints
    /// nothing.
    fn scroll_with(&mut self, op: impl FnOnce(&mut HistoryScroll)) {
        let before = self.scroll.offset();
        op(&mut self.scroll);
        if self.scroll.offset() != before {
            self.needs_full_redraw = true;
        }
    }

    fn submit(&mut self, layout: &Layout) {
        let message = self.editor.take_and_clear();
        debug!(len = message.len(), "message submitted");
        self.messages.push(message);

        if let Some(handler) = self.on_submit.as_mut() {
            let submitted = self.messages.last().map(String::as_str).unwrap_or("");
            if let Some(response) = handler(submitted) {
                self.messages.push(response);
            }
        }

        let total = wrap_messages(&self.messages, layout.inner_width()).len();
        self.scroll.jump_to_bottom(total, layout.visible_lines());
        self.needs_full_redraw = true;
    }
}

//! Terminal trait and lifecycle guard.

/// Minimal terminal interface for the dashboard.
///
/// The session owns the only value implementing this for the duration of
/// its loop; the renderer and decoder receive it as an argument and never
/// store it.
pub trait Terminal {
    /// Put the input stream into raw mode (no line buffering, no echo).
    fn start(&mut self) -> std::io::Result<()>;

    /// Restore the original input mode.
    fn stop(&mut self) -> std::io::Result<()>;

    /// Block until input is readable or `timeout_ms` elapses. Returns
    /// whether input is ready.
    fn poll_input(&mut self, timeout_ms: i32) -> std::io::Result<bool>;

    /// Non-blocking read of whatever bytes are available.
    fn read_input(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;

    /// Best-effort write; a failed write must not take the session down.
    fn write(&mut self, data: &str);

    /// Terminal dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
}

/// RAII guard that restores the terminal mode on drop, so teardown runs
/// even when the session loop errors out early.
pub struct TerminalGuard<'a, T: Terminal> {
    terminal: &'a mut T,
}

impl<'a, T: Terminal> TerminalGuard<'a, T> {
    pub fn new(terminal: &'a mut T) -> Self {
        Self { terminal }
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: Terminal> Drop for TerminalGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(err) = self.terminal.stop() {
            tracing::warn!(%err, "failed to restore terminal mode");
        }
    }
}

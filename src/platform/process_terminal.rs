//! Process terminal backed by libc: termios raw mode, poll readiness,
//! winsize queries, and best-effort fd writes.
//!
//! Unlike a threaded input pump, everything here is synchronous: the
//! session polls for readiness with a bounded timeout and reads on the
//! same thread, so resize detection works by re-querying the size each
//! tick instead of trapping SIGWINCH.

use crate::core::terminal::Terminal;

#[cfg(unix)]
use libc::c_int;

#[cfg(unix)]
pub(crate) fn get_termios(fd: c_int) -> std::io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
pub(crate) fn set_termios(fd: c_int, termios: &libc::termios) -> std::io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(unix)]
fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

/// Waits for readable input. `Ok(false)` on timeout or EINTR.
#[cfg(unix)]
fn poll_readable(fd: c_int, timeout_ms: i32) -> std::io::Result<bool> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    if result < 0 {
        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    Ok(result > 0 && (fds.revents & libc::POLLIN) != 0)
}

/// Writes all bytes, retrying on EINTR and partial writes. Any other
/// failure drops the remainder: a failed paint must not take the session
/// down, teardown still restores the terminal.
#[cfg(unix)]
fn write_fd_best_effort(fd: c_int, data: &str) {
    let bytes = data.as_bytes();
    let mut written = 0;
    while written < bytes.len() {
        let remaining = &bytes[written..];
        let result = unsafe {
            libc::write(
                fd,
                remaining.as_ptr() as *const libc::c_void,
                remaining.len(),
            )
        };
        if result > 0 {
            written = written.saturating_add(result as usize);
            continue;
        }
        if result == 0 {
            break;
        }
        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::Interrupted {
            continue;
        }
        tracing::warn!(%err, "dropping terminal write");
        break;
    }
}

/// Terminal bound to the process stdin/stdout.
#[cfg(unix)]
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
}

#[cfg(unix)]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: None,
        }
    }

    /// Original termios captured when raw mode was enabled, for crash
    /// restoration hooks.
    pub fn original_termios(&self) -> Option<libc::termios> {
        self.original_termios
    }

    pub fn stdin_fd(&self) -> c_int {
        self.stdin_fd
    }
}

#[cfg(unix)]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl Terminal for ProcessTerminal {
    fn start(&mut self) -> std::io::Result<()> {
        if self.original_termios.is_none() {
            self.original_termios = Some(get_termios(self.stdin_fd)?);
        }
        let original = self.original_termios.unwrap_or(unsafe { std::mem::zeroed() });
        crate::platform::cleanup::arm_panic_restore(self.stdin_fd, original);
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(self.stdin_fd, &raw)
    }

    fn stop(&mut self) -> std::io::Result<()> {
        crate::platform::cleanup::disarm_panic_restore();
        if let Some(original) = self.original_termios.as_ref() {
            set_termios(self.stdin_fd, original)?;
        }
        Ok(())
    }

    fn poll_input(&mut self, timeout_ms: i32) -> std::io::Result<bool> {
        poll_readable(self.stdin_fd, timeout_ms)
    }

    fn read_input(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let result =
            unsafe { libc::read(self.stdin_fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
        if result < 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(result as usize)
    }

    fn write(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        write_fd_best_effort(self.stdout_fd, data);
    }

    fn columns(&self) -> u16 {
        read_winsize(self.stdout_fd).map(|(cols, _)| cols).unwrap_or(80)
    }

    fn rows(&self) -> u16 {
        read_winsize(self.stdout_fd).map(|(_, rows)| rows).unwrap_or(24)
    }
}

#[cfg(not(unix))]
pub struct ProcessTerminal;

#[cfg(not(unix))]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(unix))]
impl Terminal for ProcessTerminal {
    fn start(&mut self) -> std::io::Result<()> {
        panic!("ProcessTerminal is only supported on Unix platforms");
    }

    fn stop(&mut self) -> std::io::Result<()> {
        panic!("ProcessTerminal is only supported on Unix platforms");
    }

    fn poll_input(&mut self, _timeout_ms: i32) -> std::io::Result<bool> {
        panic!("ProcessTerminal is only supported on Unix platforms");
    }

    fn read_input(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        panic!("ProcessTerminal is only supported on Unix platforms");
    }

    fn write(&mut self, _data: &str) {
        panic!("ProcessTerminal is only supported on Unix platforms");
    }

    fn columns(&self) -> u16 {
        80
    }

    fn rows(&self) -> u16 {
        24
    }
}

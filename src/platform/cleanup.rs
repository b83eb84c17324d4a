//! Crash-path terminal restoration.
//!
//! Two pieces: a signal-registered shutdown flag the session checks each
//! tick (SIGTERM/SIGINT shut down through the normal teardown path, not a
//! handler), and a panic hook that restores the screen and termios before
//! the default hook prints its report onto a usable terminal.

#[cfg(unix)]
use std::sync::atomic::AtomicBool;
#[cfg(unix)]
use std::sync::{Arc, Mutex, Once};

#[cfg(unix)]
use libc::c_int;

#[cfg(unix)]
use crate::platform::process_terminal::set_termios;

/// Registers SIGTERM and SIGINT to set the returned flag. No handler
/// thread is spawned; the session polls the flag in its loop.
#[cfg(unix)]
pub fn shutdown_flag() -> std::io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&flag))?;
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&flag))?;
    Ok(flag)
}

#[cfg(unix)]
struct RestoreState {
    fd: c_int,
    termios: libc::termios,
}

// libc::termios is plain bytes; safe to move across the panic boundary.
#[cfg(unix)]
unsafe impl Send for RestoreState {}

#[cfg(unix)]
static RESTORE_STATE: Mutex<Option<RestoreState>> = Mutex::new(None);

#[cfg(unix)]
static HOOK_INSTALL: Once = Once::new();

/// Arms the panic hook to leave the alt screen, show the cursor, and
/// restore `termios` on `fd`. Disarm after a clean shutdown so a later
/// panic does not re-touch the terminal.
#[cfg(unix)]
pub fn arm_panic_restore(fd: c_int, termios: libc::termios) {
    {
        let mut state = match RESTORE_STATE.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *state = Some(RestoreState { fd, termios });
    }

    HOOK_INSTALL.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_now();
            previous(info);
        }));
    });
}

#[cfg(unix)]
pub fn disarm_panic_restore() {
    let mut state = match RESTORE_STATE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *state = None;
}

#[cfg(unix)]
fn restore_now() {
    let state = {
        let mut guard = match RESTORE_STATE.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.take()
    };
    let Some(state) = state else {
        return;
    };

    // Best-effort: never panic inside the panic hook.
    let sequences = b"\x1b[?1049l\x1b[?25h";
    unsafe {
        libc::write(
            state.fd,
            sequences.as_ptr() as *const libc::c_void,
            sequences.len(),
        );
    }
    let _ = set_termios(state.fd, &state.termios);
}

#[cfg(all(test, unix))]
mod tests {
    use super::{arm_panic_restore, disarm_panic_restore};
    use crate::platform::process_terminal::get_termios;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn disarmed_hook_leaves_terminal_alone() {
        // With no armed state a panic must not attempt any restore.
        let hit = Arc::new(AtomicBool::new(false));
        disarm_panic_restore();
        let hit_clone = Arc::clone(&hit);
        let result = std::panic::catch_unwind(move || {
            hit_clone.store(true, Ordering::SeqCst);
        });
        assert!(result.is_ok());
        assert!(hit.load(Ordering::SeqCst));
    }

    #[test]
    fn arm_and_disarm_round_trip() {
        let mut master: libc::c_int = 0;
        let mut slave: libc::c_int = 0;
        let result = unsafe {
            libc::openpty(
                &mut master,
                &mut slave,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
            )
        };
        assert_eq!(result, 0, "openpty failed");

        let termios = get_termios(slave).expect("get termios");
        arm_panic_restore(slave, termios);
        disarm_panic_restore();

        unsafe {
            libc::close(master);
            libc::close(slave);
        }
    }
}

//! Crate error taxonomy.
//!
//! Only conditions that abort the session surface here. Transient faults
//! (incomplete decode, unknown escape sequences, poll failures) are
//! absorbed where they occur and retried or discarded.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    /// The terminal cannot hold both panels plus the status row. Fatal at
    /// startup; the session never enters its loop.
    #[error("terminal too small: {rows} rows, need at least {min}")]
    TerminalTooSmall { rows: u16, min: u16 },

    /// Raw-mode enable/restore or another terminal lifecycle call failed.
    #[error("terminal setup failed: {0}")]
    Terminal(#[from] std::io::Error),
}

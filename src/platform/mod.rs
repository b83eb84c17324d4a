//! Platform bindings: the libc-backed terminal and crash restoration.

pub mod cleanup;
pub mod process_terminal;

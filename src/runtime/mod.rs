//! The event loop and session state.

pub mod session;

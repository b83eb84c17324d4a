//! Adaptive full-screen terminal dashboard.
//!
//! Two bordered panels and a status line: a scrolling message history on
//! top, a fixed three-line composer below. Tab moves focus between them,
//! Enter submits the composer as one message, Ctrl+C quits. The layout
//! adapts to the terminal size each tick and refuses to run below nine
//! rows.
//!
//! Everything runs on one thread: a poll loop reads raw bytes, a stateful
//! decoder reassembles keystrokes split across reads, and a diffing
//! renderer repaints only the rows that changed. All terminal writes flow
//! through a single output gate so a frame hits the wire as one write.
//!
//! ```no_run
//! use dash_tui::config::DashboardConfig;
//! use dash_tui::platform::process_terminal::ProcessTerminal;
//! use dash_tui::runtime::session::Session;
//!
//! let mut terminal = ProcessTerminal::new();
//! let mut session = Session::new(DashboardConfig::default())
//!     .with_submit_handler(Box::new(|text| Some(format!("you said: {}", text.trim()))));
//! session.run(&mut terminal)?;
//! # Ok::<(), dash_tui::error::DashError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod platform;
pub mod render;
pub mod runtime;

pub use crate::config::DashboardConfig;
pub use crate::core::input::InputEvent;
pub use crate::core::terminal::Terminal;
pub use crate::error::DashError;
pub use crate::platform::process_terminal::ProcessTerminal;
pub use crate::runtime::session::{Focus, Session};

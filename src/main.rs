//! Demo dashboard: echoes every submitted message back into the history.
//!
//! Set `DASH_TUI_LOG` to a file path to capture tracing output; the
//! screen itself belongs to the dashboard while it runs.

use std::process::ExitCode;

use dash_tui::error::DashError;
use dash_tui::{DashboardConfig, ProcessTerminal, Session};

fn main() -> ExitCode {
    if let Ok(path) = std::env::var("DASH_TUI_LOG") {
        if let Err(err) = dash_tui::logging::init_file_logging(&path) {
            eprintln!("warning: cannot open log file {path}: {err}");
        }
    }

    let mut session = Session::new(DashboardConfig::default()).with_submit_handler(Box::new(
        |text: &str| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(format!("you said: {trimmed}"))
            }
        },
    ));

    #[cfg(unix)]
    {
        match dash_tui::platform::cleanup::shutdown_flag() {
            Ok(flag) => session = session.with_shutdown_flag(flag),
            Err(err) => eprintln!("warning: cannot register signal handlers: {err}"),
        }
    }

    session.push_message(
        "Welcome! Type below and press Enter to send.\n\
         Tab switches focus, arrows and PgUp/PgDn scroll the history, Ctrl+C quits.",
    );

    let mut terminal = ProcessTerminal::new();
    match session.run(&mut terminal) {
        Ok(()) => ExitCode::SUCCESS,
        Err(DashError::TerminalTooSmall { rows, min }) => {
            eprintln!("terminal too small: {rows} rows, need at least {min}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("dashboard error: {err}");
            ExitCode::FAILURE
        }
    }
}

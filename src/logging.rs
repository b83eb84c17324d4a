//! File-backed tracing setup.
//!
//! The dashboard owns stdout while it runs, so logs go to a file. The
//! filter honors `RUST_LOG` and defaults to `info`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to `path` (appending).
///
/// Call at most once, before the session starts. Skipping it entirely is
/// fine: tracing events then go nowhere.
pub fn init_file_logging(path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = File::options().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

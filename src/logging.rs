//! Tracing subscriber setup.
//!
//! The interactive view owns the terminal, so it logs to a file in the data
//! directory. One-shot commands log to stderr.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "caltodo.log";

/// Where log events are written.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    pub fn file_in(dir: &Path) -> Self {
        LogTarget::File(dir.join(LOG_FILE_NAME))
    }
}

/// Map `-v`/`-q` counts to a filter directive. `configured` (from the config
/// file) is used when neither flag is given.
pub fn default_level(verbose: u8, quiet: u8, configured: Option<&str>) -> String {
    let level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        return configured.unwrap_or("warn").to_string();
    };
    level.to_string()
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str, target: &LogTarget) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true);

    let init_result = match target {
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_pick_level() {
        assert_eq!(default_level(0, 0, None), "warn");
        assert_eq!(default_level(0, 0, Some("debug")), "debug");
        assert_eq!(default_level(1, 0, Some("error")), "info");
        assert_eq!(default_level(2, 0, None), "debug");
        assert_eq!(default_level(5, 0, None), "trace");
        assert_eq!(default_level(0, 1, Some("trace")), "warn");
        assert_eq!(default_level(3, 2, None), "error");
    }
}

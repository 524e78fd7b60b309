//! Diagnostic logging setup
//!
//! The UI owns the terminal, so interactive sessions only log when a file is
//! given. Headless runs log to stderr.

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where diagnostics go for this session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    Disabled,
}

impl<'a> LogTarget<'a> {
    pub fn select(log_file: Option<&'a Path>, headless: bool) -> Self {
        match (log_file, headless) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::Disabled,
        }
    }
}

/// `RUST_LOG` wins over the configured directives when it is set
fn env_filter(directives: &str) -> Result<EnvFilter> {
    let parsed = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) if !from_env.is_empty() => EnvFilter::try_new(from_env),
        _ => EnvFilter::try_new(directives),
    };
    parsed.with_context(|| format!("invalid log filter '{}'", directives))
}

/// Install the global subscriber
pub fn init(target: LogTarget<'_>, directives: &str) -> Result<()> {
    let filter = env_filter(directives)?;

    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("failed to install logger: {}", e)),
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!("failed to install logger: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_selection() {
        let path = Path::new("console.log");
        assert_eq!(LogTarget::select(Some(path), false), LogTarget::File(path));
        assert_eq!(LogTarget::select(Some(path), true), LogTarget::File(path));
        assert_eq!(LogTarget::select(None, true), LogTarget::Stderr);
        assert_eq!(LogTarget::select(None, false), LogTarget::Disabled);
    }
}

//! Command-line configuration

use crate::interpreter::DEFAULT_STEP_LIMIT;
use anyhow::{bail, Context, Result};
use argh::FromArgs;
use std::fs;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Interactive script console for the terminal.
pub struct Args {
    #[argh(positional)]
    /// script file to preload into the input area
    pub file: Option<PathBuf>,

    #[argh(option)]
    /// run this snippet without the UI and print its log entry; may be repeated
    pub eval: Vec<String>,

    #[argh(option, default = "DEFAULT_STEP_LIMIT")]
    /// maximum statements plus loop iterations per evaluation
    pub step_limit: usize,

    #[argh(option)]
    /// write diagnostic logs to this file
    pub log_file: Option<PathBuf>,

    #[argh(option, default = "String::from(\"info\")")]
    /// log filter directives, e.g. "quikconsole=debug"; RUST_LOG takes precedence
    pub log_filter: String,
}

/// Resolved settings for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Initial contents of the input area
    pub preload: Option<String>,
    /// Snippets to run headless; empty means start the UI
    pub eval: Vec<String>,
    pub step_limit: usize,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl ConsoleConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.step_limit == 0 {
            bail!("--step-limit must be greater than zero");
        }

        let preload = match &args.file {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read script file '{}'", path.display()))?,
            ),
            None => None,
        };

        Ok(ConsoleConfig {
            preload,
            eval: args.eval,
            step_limit: args.step_limit,
            log_file: args.log_file,
            log_filter: args.log_filter,
        })
    }

    pub fn is_headless(&self) -> bool {
        !self.eval.is_empty()
    }
}

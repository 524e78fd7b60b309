// QuikConsole: interactive script console for the terminal

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use quikconsole::config::{Args, ConsoleConfig};
use quikconsole::interpreter::ScriptEngine;
use quikconsole::logging::{self, LogTarget};
use quikconsole::ui::App;
use quikconsole::Console;

fn main() -> Result<ExitCode> {
    let args: Args = argh::from_env();
    let config = ConsoleConfig::from_args(args)?;

    logging::init(
        LogTarget::select(config.log_file.as_deref(), config.is_headless()),
        &config.log_filter,
    )?;
    tracing::debug!(?config, "configuration loaded");

    let mut console = Console::with_evaluator(ScriptEngine::with_step_limit(config.step_limit));
    if let Some(preload) = &config.preload {
        console.set_source_code(preload.as_str());
    }

    if config.is_headless() {
        return run_headless(console, &config.eval);
    }

    run_tui(console)?;
    Ok(ExitCode::SUCCESS)
}

/// Run each snippet through the console and print its log entry.
/// Exits with failure if any snippet failed.
fn run_headless(mut console: Console, snippets: &[String]) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let mut any_failed = false;

    for snippet in snippets {
        let before = console.len();
        console.set_source_code(snippet.as_str());
        console.run();

        if console.len() == before {
            tracing::warn!("skipping blank --eval snippet");
            continue;
        }

        let index = console.len() - 1;
        any_failed |= console.is_failed(index);
        writeln!(stdout, "{}", console.script_evaluation()[index])
            .context("failed to write result")?;
    }

    Ok(if any_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_tui(console: Console) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(console);
    let res = app.run(&mut terminal);

    // Restore terminal before reporting anything
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    res.context("console UI failed")
}

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use presenter::app::{Presenter, handle_test_event};
use presenter::config::Config;
use presenter::ui::CrosstermTerminal;
use presenter::{logging, runner};

/// Live, colourized test-run reports from lifecycle events.
#[derive(Debug, Parser)]
#[command(name = "presenter", version)]
struct Cli {
    /// Read newline-delimited JSON events from this file instead of stdin.
    #[arg(long, value_name = "FILE")]
    events: Option<PathBuf>,

    /// Test command to run; events are read from its stdout.
    #[arg(last = true, value_name = "COMMAND")]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init()?;

    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load(&workspace);
    tracing::debug!(?config, "resolved configuration");

    let source = runner::detect(cli.command, cli.events, workspace)?;
    let source_name = source.name().to_string();
    let mut presenter = Presenter::new(&config, CrosstermTerminal::stdout());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = {
        let source = Arc::clone(&source);
        tokio::spawn(async move { source.run(tx).await })
    };

    // Events are applied one at a time, in arrival order.
    while let Some(event) = rx.recv().await {
        handle_test_event(&mut presenter, event)?;
    }

    let exit = handle.await.context("event source task panicked")?;
    presenter.flush()?;
    let exit = exit.with_context(|| format!("event source `{}` failed", source_name))?;

    Ok(match exit {
        None | Some(0) => ExitCode::SUCCESS,
        Some(code) => ExitCode::from(code.clamp(1, 255) as u8),
    })
}

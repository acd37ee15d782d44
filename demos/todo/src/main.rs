//! Interactive command-line front end for the todo app.
//!
//! Reads one command per line from stdin, applies it, and re-renders the
//! page. Configuration comes from `TODO_APP_*` environment variables, log
//! filtering from `RUST_LOG`.

use anyhow::Context;
use composable_todo_core::environment::IdentityFormatter;
use std::io::{BufRead, Write};
use todo_app::command::{Command, CommandError, HELP};
use todo_app::{AppConfig, ClickOutcome, ControlKind, TodoApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_app=info,composable_todo_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env().context("invalid TODO_APP_* configuration")?;
    tracing::info!(title = %config.title, variant = %config.variant, "Starting todo app");

    let mut app = TodoApp::new(config, Box::new(IdentityFormatter));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    writeln!(stdout, "{}\n", app.render())?;
    writeln!(stdout, "{HELP}")?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(error) => {
                writeln!(stdout, "{error}")?;
                continue;
            },
        };

        match command {
            Command::Toggle(id) => report(&mut stdout, app.click(id, ControlKind::Toggle)?)?,
            Command::Delete(id) => report(&mut stdout, app.click(id, ControlKind::Delete)?)?,
            Command::Add(text) => {
                app.add(text)?;
                if let Some(error) = app.state().last_error {
                    writeln!(stdout, "not added: {error}")?;
                }
            },
            Command::Show => {},
            Command::Json => {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&app.state())?)?;
                continue;
            },
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            },
            Command::Quit => break,
        }

        writeln!(stdout, "\n{}\n", app.render())?;
    }

    tracing::info!(remaining = app.state().count(), "Todo app finished");
    Ok(())
}

fn report(out: &mut impl Write, outcome: ClickOutcome) -> std::io::Result<()> {
    match outcome {
        ClickOutcome::Dispatched => Ok(()),
        ClickOutcome::NoSuchRow => writeln!(out, "no todo with that id"),
        ClickOutcome::NoSuchControl => writeln!(out, "that row has no such button"),
    }
}

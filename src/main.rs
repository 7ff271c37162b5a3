use crate::config::{Cli, Settings};
use crate::solver::http::HttpSolver;
use crate::tui::app::App;
use crate::tui::draw::draw_app;
use crate::tui::input::handle_key;
use clap::Parser;
use crossterm::event::Event;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod config;
mod error;
mod graph;
mod render;
mod scenario;
mod simulation;
mod solver;
mod state;
mod tui;

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_file.as_deref())?;

    let backend = HttpSolver::new(&cli.api_url, Settings::http_options(&cli)).into_diagnostic()?;
    info!(url = %backend.base(), "using solver service");
    let mut app = App::new(backend, Settings::from_cli(&cli));
    app.probe_health();

    let mut terminal = ratatui::init();
    let outcome = run(&mut terminal, &mut app);
    ratatui::restore();
    outcome
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App<HttpSolver>) -> Result<()> {
    while app.running {
        app.pump();
        terminal.draw(|frame| draw_app(frame, app)).into_diagnostic()?;

        if crossterm::event::poll(Duration::from_millis(16)).into_diagnostic()? {
            if let Event::Key(key) = crossterm::event::read().into_diagnostic()? {
                handle_key(app, key);
            }
        }
    }
    Ok(())
}

/// Logs go to `log_file` only; without one, events are filtered but never printed.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env().into_diagnostic()?
    } else {
        let level = match verbose {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("error,flowlab={level}"))
    };

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(())
}

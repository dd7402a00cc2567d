//! customer-tui: Terminal UI for tailoring customer records
//!
//! Shows customers as cards on narrow terminals and as a table on wide ones.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::panic;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use customer_tui::app::LayoutMode;
use customer_tui::services::CustomerService;
use customer_tui::{App, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "customer-tui")]
#[command(version)]
#[command(about = "Browse tailoring customers and their measurements")]
struct Args {
    /// JSON file with the customer list (overrides data.customers_file)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Layout to start in
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Auto)]
    layout: LayoutArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Auto,
    Cards,
    Table,
}

impl From<LayoutArg> for LayoutMode {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Auto => LayoutMode::Auto,
            LayoutArg::Cards => LayoutMode::Cards,
            LayoutArg::Table => LayoutMode::Table,
        }
    }
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging();
    install_panic_hook();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = AppConfig::load(Some(&cwd)).context("failed to load configuration")?;

    let customers_file = args
        .file
        .unwrap_or_else(|| cwd.join(&config.data.customers_file));
    let service = CustomerService::new(customers_file);
    tracing::info!("Starting customer-tui with {}", service.path().display());

    // Fail before touching the terminal if the data can't be read
    let mut app = App::new(config, service).layout_mode(args.layout.into());
    app.load().context("failed to load customers")?;

    let mut terminal = setup_terminal()?;

    let result = {
        tokio::select! {
            res = app.run(&mut terminal) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down gracefully");
                Ok(())
            }
        }
    };

    // Restore terminal (always, even on error)
    restore_terminal(&mut terminal)?;

    result?;

    Ok(())
}

//! planotui - Main entry point
//!
//! Launches the interactive TUI tracker by default, or runs one of the
//! headless subcommands (export, import, validate, summary).

mod app;
mod cli;
mod components;
mod error;
mod filter;
mod metrics;
mod plan;
mod store;
mod theme;
mod transfer;
mod types;
mod ui;

use chrono::Local;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::store::{FileStore, PlanStore};

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let cli = Cli::parse_args();
    let data_dir = resolve_data_dir(cli.data_dir);
    debug!("Using data directory: {:?}", data_dir);

    match cli.command {
        Some(crate::cli::Commands::Export { output }) => run_export(&data_dir, output),
        Some(crate::cli::Commands::Import { file }) => run_import(&data_dir, &file),
        Some(crate::cli::Commands::Validate { file }) => run_validate(&file),
        Some(crate::cli::Commands::Summary) => run_summary(&data_dir),
        None => {
            info!("No command specified, launching TUI");
            run_tui(&data_dir)
        }
    }
}

/// Directory for the persisted snapshot, created on demand.
fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    let dir = explicit.unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| {
                PathBuf::from(home)
                    .join(".local")
                    .join("share")
                    .join("planotui")
            })
            .unwrap_or_else(|| PathBuf::from("."))
    });
    if let Err(e) = std::fs::create_dir_all(&dir) {
        debug!("Could not create data directory {:?}: {}", dir, e);
    }
    dir
}

fn open_store(data_dir: &Path) -> PlanStore {
    PlanStore::load(Box::new(FileStore::new(data_dir)))
}

/// Run the interactive TUI tracker
fn run_tui(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| error::general_error(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| error::general_error(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| error::general_error(format!("Failed to create terminal: {}", e)))?;

    let mut app = app::App::new(open_store(data_dir));
    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result.map_err(Into::into)
}

fn run_export(data_dir: &Path, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data_dir);
    let path = output
        .unwrap_or_else(|| PathBuf::from(transfer::export_file_name(Local::now().date_naive())));
    transfer::export_to_file(store.plan(), &path)?;
    println!("✓ Plan exported to {}", path.display());
    Ok(())
}

fn run_import(data_dir: &Path, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let imported = transfer::import_from_file(file).map_err(|e| {
        error!("Import failed: {:#}", e);
        e
    })?;
    let mut store = open_store(data_dir);
    store.import(imported);
    println!(
        "✓ Imported {} rows from {}",
        store.rows().len(),
        file.display()
    );
    Ok(())
}

fn run_validate(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match transfer::import_from_file(file) {
        Ok(imported) => {
            println!(
                "✓ Plan file is valid: {} rows, project \"{}\"",
                imported.rows.len(),
                imported.header.project
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Plan file is invalid: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run_summary(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data_dir);
    let today = Local::now().date_naive();
    let rows = store.rows();
    let completion = metrics::completion_percent(rows);
    let pacing = metrics::goal_pacing(store.header(), store.goal(), completion, today);

    let header = store.header();
    println!("Project:    {}", label_or_dash(&header.project));
    println!("Owner:      {}", label_or_dash(&header.owner));
    println!("Department: {}", label_or_dash(&header.department));
    println!("Status:     {}", header.status);
    println!();
    println!("Actions:    {}", rows.len());
    println!("Completion: {}%", completion);

    println!();
    println!("By status:");
    for (status, count) in metrics::counts_by_status(rows) {
        println!("  {:<14} {}", status.to_string(), count);
    }
    println!("By priority:");
    for (priority, count) in metrics::counts_by_priority(rows) {
        println!("  {:<14} {}", priority.to_string(), count);
    }
    println!("By owner:");
    for owner in metrics::progress_by_owner(rows) {
        println!(
            "  {:<20} {}/{} ({}%)",
            owner.name, owner.completed, owner.total, owner.percent
        );
    }

    println!();
    println!("Goal: {}% by {}", pacing.target, label_or_dash(&store.goal().target_date));
    match &pacing.window {
        Some(window) => {
            println!(
                "  {} (expected {}% today, actual {}%)",
                if window.on_pace { "On pace" } else { "Behind pace" },
                window.expected_today,
                completion
            );
            println!(
                "  {} of {} days elapsed, {} remaining",
                window.days_elapsed, window.total_days, window.days_remaining
            );
            println!(
                "  Required rate: {:.1}%/day to reach {}%",
                window.required_daily_rate, pacing.target
            );
        }
        None => println!("  Pacing unavailable: define a start date and a later target date"),
    }
    Ok(())
}

fn label_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "—"
    } else {
        value
    }
}

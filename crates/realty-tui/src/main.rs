//! `realty-tui` — Terminal dashboard for a real-estate CRM.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `realty-core`'s [`Directory`](realty_core::Directory). The navigation
//! chrome adapts to the stored layout preference and the terminal width,
//! and its links can be reordered by dragging or from the Settings screen;
//! the order, theme, and the rest of the appearance preferences persist
//! across sessions through `realty-config`.
//!
//! Logs are written to a file (platform data dir by default) to avoid
//! corrupting the terminal UI. Background tasks stream directory updates
//! and preference changes into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod drag;
mod event;
mod nav_layout;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use realty_config::PrefStore;
use realty_core::{Directory, MockApi, Role};

use crate::action::Action;
use crate::app::App;

/// Terminal dashboard for browsing properties, clients, deals, and staff.
#[derive(Parser, Debug)]
#[command(name = "realty-tui", version, about)]
struct Cli {
    /// Role to start the session in (admin, agent, company-admin, employee, client)
    #[arg(short = 'r', long, value_parser = parse_role, env = "REALTY_ROLE")]
    role: Option<Role>,

    /// Config directory (defaults to the platform config dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Log file path (defaults to the platform data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Tracing filter directive, e.g. `info` or `realty_tui=debug`
    #[arg(long)]
    log_level: Option<String>,

    /// Simulated API latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::from_str(&s.to_ascii_lowercase()).map_err(|_| {
        format!("unknown role `{s}` (expected admin, agent, company-admin, employee, or client)")
    })
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(log_file: &std::path::Path, directive: &str) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive.to_owned()));

    let log_dir = log_file.parent().unwrap_or(std::path::Path::new("."));
    std::fs::create_dir_all(log_dir)?;
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("realty.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}

/// Forward preference changes into the action loop. The initial snapshot is
/// re-marked so every screen sees the stored appearance on startup.
async fn watch_prefs(
    mut rx: tokio::sync::watch::Receiver<realty_core::AppearancePreferences>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    rx.mark_changed();
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let prefs = rx.borrow_and_update().clone();
                if action_tx.send(Action::PrefsUpdated(prefs)).is_err() {
                    break;
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(realty_config::config_dir);
    let config = realty_config::load_config_from(&config_dir)?;

    // Tracing to file — hold the guard so logs flush on exit
    let log_file = cli
        .log_file
        .or(config.log_file)
        .unwrap_or_else(realty_config::default_log_path);
    let directive = cli.log_level.unwrap_or(config.log_filter);
    let _log_guard = setup_tracing(&log_file, &directive)?;

    let role = cli.role.unwrap_or(config.default_role);
    info!(
        role = %role,
        config_dir = %config_dir.display(),
        "starting realty-tui"
    );

    let pref_store = PrefStore::open(realty_config::prefs_path_in(&config_dir));
    let prefs_rx = pref_store.subscribe();
    let directory = Arc::new(Directory::new());
    let latency = cli.latency_ms.unwrap_or(config.mock_latency_ms);
    let api = MockApi::new(Duration::from_millis(latency));

    let mut app = App::new(role, pref_store, Arc::clone(&directory));
    let action_tx = app.action_sender();

    let cancel = CancellationToken::new();
    let bridge = tokio::spawn(data_bridge::run_data_bridge(
        directory,
        api,
        action_tx.clone(),
        cancel.clone(),
    ));
    tokio::spawn(watch_prefs(prefs_rx, action_tx, cancel.clone()));

    let result = app.run().await;

    cancel.cancel();
    let _ = bridge.await;
    result
}

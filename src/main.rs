//! Core Keeper Notifier - announce player joins and leaves from a server log.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use core_keeper_notifier::config::{load_dotenv, ConfigLoader, ConfigOverrides};
use core_keeper_notifier::display;
use core_keeper_notifier::monitor::RosterMonitor;
use core_keeper_notifier::roster::{reconcile, Roster};
use core_keeper_notifier::sink::{DiscordWebhook, LogSink, Sink};
use core_keeper_notifier::watcher::{LogReader, LogWatcher};

#[derive(Parser)]
#[command(
    name = "core-keeper-notifier",
    about = "Announce Core Keeper player joins and leaves to a Discord webhook",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default search paths.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server log file (overrides CORE_KEEPER_SERVER_LOG_PATH).
    #[arg(long, global = true)]
    log_path: Option<PathBuf>,

    /// Webhook URL (overrides DISCORD_WEBHOOK_URL).
    #[arg(long, global = true)]
    webhook_url: Option<String>,

    /// Announce players already online at startup.
    #[arg(long, global = true)]
    announce_existing: bool,

    /// Log announcements instead of sending them.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Watch the server log and announce joins and leaves (default).
    Watch,
    /// Print the players currently online according to the log.
    Roster,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = load_dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    let loader = cli.config.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => {
            let overrides = ConfigOverrides {
                log_path: cli.log_path,
                webhook_url: cli.webhook_url,
                announce_existing: cli.announce_existing,
                dry_run: cli.dry_run,
            };
            watch(&loader, overrides).await
        }
        Commands::Roster => {
            let overrides = ConfigOverrides {
                log_path: cli.log_path,
                ..ConfigOverrides::default()
            };
            roster(&loader, overrides).await
        }
    }
}

async fn watch(loader: &ConfigLoader, overrides: ConfigOverrides) -> ExitCode {
    let config = match loader.load(overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let sink = if config.dry_run {
        Sink::Log(LogSink)
    } else {
        match DiscordWebhook::new(config.webhook_url.clone()) {
            Ok(webhook) => Sink::Discord(webhook),
            Err(e) => {
                tracing::error!(error = %e, "Failed to set up webhook client");
                return ExitCode::FAILURE;
            }
        }
    };

    let (watcher, signals) = match LogWatcher::new(&config.log_path, config.debounce) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, path = %config.log_path.display(), "Failed to watch log");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        path = %watcher.log_path().display(),
        dry_run = config.dry_run,
        "Starting Core Keeper notifier"
    );

    let mut monitor = RosterMonitor::new(LogReader::new(&config.log_path), Arc::new(sink));
    monitor.seed(config.announce_existing).await;
    monitor.run(signals).await;

    drop(watcher);
    ExitCode::SUCCESS
}

async fn roster(loader: &ConfigLoader, overrides: ConfigOverrides) -> ExitCode {
    let log_path = match loader
        .merged(overrides)
        .and_then(|config| config.require_log_path())
    {
        Ok(path) => path,
        Err(e) => {
            display::print_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match LogReader::new(&log_path).read().await {
        Ok(lines) => {
            let result = reconcile(&lines, &Roster::new());
            display::print_roster(&result.roster, &log_path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            display::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

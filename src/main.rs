use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use navhub::cli::commands::{Cli, Commands};
use navhub::cli::handlers;
use navhub::model::Session;
use tracing_subscriber::EnvFilter;

/// Log filter directives, e.g. `NAVHUB_LOG=navhub=trace`
const LOG_ENV: &str = "NAVHUB_LOG";
/// File the TUI appends logs to; the TUI does not log without it
const LOG_FILE_ENV: &str = "NAVHUB_LOG_FILE";

fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// CLI logs go to stderr; TUI logs go to a file so the screen stays clean.
fn init_logging(verbose: bool, tui: bool) {
    let filter = log_filter(verbose);

    if !tui {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    }

    let Some(path) = std::env::var_os(LOG_FILE_ENV).filter(|p| !p.is_empty()) else {
        return;
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        Err(e) => eprintln!("warning: cannot open log file {:?}: {}", path, e),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.command.is_none());

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let hub_dir = match handlers::resolve_hub_dir(cli.hub_dir.as_deref()) {
                Ok(dir) => dir,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            };
            let session = cli.user.as_deref().map(Session::for_user);
            if let Err(e) = navhub::tui::run(hub_dir.as_deref(), session) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            // Init is handled before hub discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

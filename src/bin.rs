//! Binary entry point for `overseerr-notify`.
//!
//! This module provides the command-line interface with options for the
//! settings file, every overridable setting and logging verbosity. It loads
//! the configuration, sets up logging and runs a single check.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use overseerr_notify::{
    base::{
        config::{self as settings, ConfigInner, Overrides},
        types::Layout,
    },
    prelude::*,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Overseerr-notify – nag a Discord channel about stale Overseerr requests.
///
/// Configuration can come from `config.json`, environment variables or the
/// flags below, later sources winning. Meant to be run from a scheduler.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Cmd>,
    /// Override the settings file path (optional).
    ///
    /// By default, `config.json` in the current directory is used when present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Skip the pre-run health check.
    #[arg(long)]
    skip_health_check: bool,
    /// Overseerr host url.
    #[arg(long)]
    overseerr_host: Option<String>,
    /// Overseerr api token.
    #[arg(long)]
    overseerr_token: Option<String>,
    /// Discord webhook url.
    #[arg(long)]
    discord_webhook: Option<String>,
    /// Number of overseerr requests to look through.
    #[arg(long)]
    num_requests: Option<u32>,
    /// Ignore notifying requests made in the last X hours.
    #[arg(long)]
    ignore_hours: Option<u32>,
    /// Do not check for open issues.
    #[arg(long)]
    no_issues: bool,
    /// Layout of the notification embed.
    #[arg(long, value_enum)]
    layout: Option<Layout>,
    /// Number of title lookups to run at once.
    #[arg(long)]
    lookup_concurrency: Option<usize>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Inject environment settings into the settings file for the container image.
    DockerSetup,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            overseerr_host: self.overseerr_host.clone(),
            overseerr_token: self.overseerr_token.clone(),
            discord_webhook: self.discord_webhook.clone(),
            num_requests: self.num_requests,
            ignore_hours: self.ignore_hours,
            skip_health_check: self.skip_health_check,
            no_issues: self.no_issues,
            layout: self.layout,
            lookup_concurrency: self.lookup_concurrency,
        }
    }
}

/// Install the stdout log layer.
///
/// Docker mode prefixes every line with a timestamp; otherwise lines go out bare.
fn init_logging(verbose: u8, docker: bool) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    let stdout = tracing_subscriber::fmt::layer()
        .with_ansi(!docker)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let registry = tracing_subscriber::registry().with(level_filter);

    if docker {
        registry.with(stdout).init();
    } else {
        registry.with(stdout.without_time()).init();
    }
}

/// Main entry point for the overseerr-notify binary.
///
/// Any error, including missing required settings, exits with code 1.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    if let Some(Cmd::DockerSetup) = args.command {
        init_logging(args.verbose, true);
        return settings::docker_setup(&settings::settings_path(args.config.as_deref()));
    }

    let inner = ConfigInner::load(args.config.as_deref(), &args.overrides())?;

    init_logging(args.verbose, inner.docker);

    info!("Starting Check");

    // Returning the error from `main` prints it and exits with code 1.
    let config = Config::new(inner)?;

    overseerr_notify::start(config).await?;

    info!("Done!");

    Ok(())
}

//! Library root for `overseerr-notify`.
//!
//! Overseerr-notify is a single-pass checker, meant to be run on a schedule, that:
//! - Looks up pending media requests (and open issues) in Overseerr
//! - Ignores anything younger than a configurable number of hours
//! - Posts a summary card to a Discord webhook
//!
//! The architecture is built around small service traits so that the
//! media service and the webhook can be swapped or mocked.

pub mod base;
pub mod pipeline;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Builds the Overseerr and Discord clients from a validated configuration
/// and runs the pipeline once.
pub async fn start(config: Config) -> Void {
    info!("Checking {} ...", config.overseerr_host);

    let runtime = runtime::Runtime::new(config)?;

    runtime.start().await?;

    Ok(())
}

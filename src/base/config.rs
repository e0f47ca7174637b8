//! Load configuration via `config` crate with env-override support.
//!
//! Sources are layered, later ones winning: built-in defaults, the settings
//! file, environment variables, then command-line overrides.

use std::{
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::types::{Layout, Res, Void};

/// Settings file picked up from the working directory when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "config.json";

/// Largest accepted age cutoff, a thousand years in hours.
pub const MAX_IGNORE_HOURS: u32 = 24 * 365 * 1000;

/// Default number of pending requests to look through.
fn default_num_requests() -> u32 {
    20
}

/// Default age, in hours, below which items are not reported.
fn default_ignore_hours() -> u32 {
    24
}

/// Issues are checked unless turned off.
fn default_check_issues() -> bool {
    true
}

/// Default number of title lookups in flight at once.
fn default_lookup_concurrency() -> usize {
    1
}

/// Configuration for overseerr-notify.
///
/// Only constructed through [`Config::new`], so every instance has passed the
/// health check and carries a normalized host.
#[derive(Debug, Clone)]
pub struct Config {
    inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConfigInner {
    /// Overseerr base URL (`OVERSEERR_HOST`).
    #[serde(default)]
    pub overseerr_host: String,
    /// Overseerr API key (`OVERSEERR_TOKEN`).
    #[serde(default)]
    pub overseerr_token: String,
    /// Discord webhook URL (`DISCORD_WEBHOOK`).
    #[serde(default)]
    pub discord_webhook: String,
    /// Page size for the pending request listing (`NUM_REQUESTS`).
    #[serde(default = "default_num_requests")]
    pub num_requests: u32,
    /// Ignore items created in the last X hours (`IGNORE_HOURS`).
    #[serde(default = "default_ignore_hours")]
    pub ignore_hours: u32,
    /// Running inside the container image; turns on log timestamps (`DOCKER`).
    #[serde(default, alias = "DOCKER")]
    pub docker: bool,
    /// Skip the pre-run health check on required settings.
    #[serde(default)]
    pub skip_health_check: bool,
    /// Also report open issues (`CHECK_ISSUES`).
    #[serde(default = "default_check_issues")]
    pub check_issues: bool,
    /// Embed layout of the notification (`LAYOUT`).
    #[serde(default)]
    pub layout: Layout,
    /// Title lookups in flight at once; `1` keeps them sequential (`LOOKUP_CONCURRENCY`).
    #[serde(default = "default_lookup_concurrency")]
    pub lookup_concurrency: usize,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            overseerr_host: String::new(),
            overseerr_token: String::new(),
            discord_webhook: String::new(),
            num_requests: default_num_requests(),
            ignore_hours: default_ignore_hours(),
            docker: false,
            skip_health_check: false,
            check_issues: default_check_issues(),
            layout: Layout::default(),
            lookup_concurrency: default_lookup_concurrency(),
        }
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub overseerr_host: Option<String>,
    pub overseerr_token: Option<String>,
    pub discord_webhook: Option<String>,
    pub num_requests: Option<u32>,
    pub ignore_hours: Option<u32>,
    pub skip_health_check: bool,
    pub no_issues: bool,
    pub layout: Option<Layout>,
    pub lookup_concurrency: Option<usize>,
}

impl ConfigInner {
    /// Load the raw settings from file, process environment and overrides.
    ///
    /// No validation happens here; see [`Config::new`].
    pub fn load(explicit_path: Option<&Path>, overrides: &Overrides) -> Res<Self> {
        Self::load_from(explicit_path, overrides, None)
    }

    fn load_from(explicit_path: Option<&Path>, overrides: &Overrides, env: Option<config::Map<String, String>>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if Path::new(DEFAULT_SETTINGS_FILE).exists() {
            cfg = cfg.add_source(config::File::from(Path::new(DEFAULT_SETTINGS_FILE)));
        }

        cfg = cfg.add_source(config::Environment::default().source(env));

        cfg = cfg
            .set_override_option("overseerr_host", overrides.overseerr_host.clone())?
            .set_override_option("overseerr_token", overrides.overseerr_token.clone())?
            .set_override_option("discord_webhook", overrides.discord_webhook.clone())?
            .set_override_option("num_requests", overrides.num_requests.map(i64::from))?
            .set_override_option("ignore_hours", overrides.ignore_hours.map(i64::from))?
            .set_override_option("layout", overrides.layout.map(|l| l.as_str()))?
            .set_override_option("lookup_concurrency", overrides.lookup_concurrency.map(|n| n as i64))?;

        if overrides.skip_health_check {
            cfg = cfg.set_override("skip_health_check", true)?;
        }

        if overrides.no_issues {
            cfg = cfg.set_override("check_issues", false)?;
        }

        Ok(cfg.build()?.try_deserialize()?)
    }
}

impl Config {
    /// Validate and normalize loaded settings.
    pub fn new(mut inner: ConfigInner) -> Res<Self> {
        if !inner.skip_health_check && (inner.overseerr_host.is_empty() || inner.overseerr_token.is_empty() || inner.discord_webhook.is_empty()) {
            return Err(anyhow::anyhow!("the following arguments are required: overseerr-host, overseerr-token, discord-webhook"));
        }

        if inner.num_requests < 1 {
            return Err(anyhow::anyhow!("Number of requests must be at least 1."));
        }

        if inner.ignore_hours > MAX_IGNORE_HOURS {
            return Err(anyhow::anyhow!("Ignore hours must be at most {MAX_IGNORE_HOURS}."));
        }

        if inner.lookup_concurrency < 1 {
            return Err(anyhow::anyhow!("Lookup concurrency must be at least 1."));
        }

        // Some hosts get real fussy about extra slashes.
        let trimmed = inner.overseerr_host.trim_end_matches('/').len();
        inner.overseerr_host.truncate(trimmed);

        Ok(Self { inner: Arc::new(inner) })
    }

    /// The age cutoff as a duration.
    pub fn cutoff(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.ignore_hours))
    }
}

/// Prepare the settings file for the container image.
///
/// Injects connection settings from the environment, marks the file as
/// running under docker and writes it back.
pub fn docker_setup(path: &Path) -> Void {
    docker_setup_with(path, |key| std::env::var(key).or_else(|_| std::env::var(key.to_uppercase())).ok())
}

#[instrument(skip(env))]
fn docker_setup_with<F>(path: &Path, env: F) -> Void
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings: Map<String, Value> = if path.exists() {
        serde_json::from_str(&std::fs::read_to_string(path)?)?
    } else {
        Map::new()
    };

    settings.insert("DOCKER".to_string(), Value::Bool(true));

    for key in ["overseerr_host", "overseerr_token", "discord_webhook"] {
        if let Some(value) = env(key) {
            settings.insert(key.to_string(), Value::String(value));
        }
    }

    if let Some(value) = env("num_requests") {
        let num_requests: u32 = value.parse().map_err(|e| anyhow::anyhow!("Invalid `num_requests` value `{value}`: {e}"))?;
        settings.insert("num_requests".to_string(), Value::from(num_requests));
    }

    write_pretty(path, &Value::Object(settings))?;

    info!("Wrote docker settings to `{}`.", path.display());

    Ok(())
}

/// Pretty print with a 4-space indent, the way the settings file ships.
fn write_pretty(path: &Path, value: &Value) -> Void {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    std::fs::write(path, buf)?;

    Ok(())
}

/// Resolve the settings file path used by the docker setup step.
pub fn settings_path(explicit_path: Option<&Path>) -> PathBuf {
    explicit_path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

// Tests.

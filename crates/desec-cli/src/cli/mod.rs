//! CLI argument parsing and run dispatch.

pub mod args;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use desec_client::{DesecClient, RateLimit, DEFAULT_BASE_URL};
use desec_sync::{SyncOptions, Syncer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::Narrator;

/// Zone managed when neither a flag nor the config file names one
pub const DEFAULT_DOMAIN: &str = "is-dev.me";

/// Records directory used when neither a flag nor the config file names one
pub const DEFAULT_RECORDS_DIR: &str = "records";

/// Settings for one run, merged from flags, environment and config file.
#[derive(Debug, Clone)]
pub struct Context {
    /// deSEC API token
    pub token: Option<String>,

    /// Zone apex
    pub domain: String,

    /// API base URL
    pub api_base: String,

    /// Directory holding the record documents
    pub records_dir: PathBuf,

    /// Enable DNSSEC before applying records
    pub dnssec: bool,

    /// Client-side request pacing
    pub rate_limit: Option<RateLimit>,

    /// Validate only
    pub dry_run: bool,
}

impl Context {
    /// Merge parsed flags over the config file.
    pub fn resolve(cli: Cli, config: Config) -> Self {
        Self {
            token: cli.token.filter(|t| !t.trim().is_empty()),
            domain: cli
                .domain
                .or(config.domain)
                .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            api_base: cli
                .api_base
                .or(config.api_base)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            records_dir: cli
                .records_dir
                .or(config.records_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDS_DIR)),
            dnssec: !cli.no_dnssec && config.dnssec.unwrap_or(true),
            rate_limit: config
                .rate_limit_per_second
                .and_then(RateLimit::from_per_second),
            dry_run: cli.dry_run,
        }
    }

    /// Get the API token, returning an error if not set.
    pub fn require_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "API token required.\n\n\
                 Set it with one of:\n  \
                 1. DESEC_TOKEN environment variable\n  \
                 2. --token <TOKEN>\n\n\
                 Create a token at: https://desec.io/tokens"
            )
        })
    }

    /// Create a deSEC client for the configured zone.
    pub fn client(&self) -> Result<DesecClient> {
        let token = self.require_token()?;
        let client = DesecClient::builder(token, &self.domain)
            .base_url(&self.api_base)
            .rate_limit(self.rate_limit)
            .build()?;
        Ok(client)
    }
}

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let ctx = Context::resolve(cli, config);
    tracing::debug!(domain = %ctx.domain, records_dir = %ctx.records_dir.display(), dry_run = ctx.dry_run, "resolved settings");

    let mut narrator = Narrator::new(&ctx.domain);
    narrator.started(ctx.dry_run);

    let summary = if ctx.dry_run {
        desec_sync::plan(&ctx.records_dir, &ctx.domain, &mut narrator).await?
    } else {
        let options = SyncOptions::new(&ctx.records_dir).dnssec(ctx.dnssec);
        Syncer::new(ctx.client()?, options).run(&mut narrator).await?
    };

    narrator.finished(&summary, ctx.dry_run);
    Ok(())
}

fn init_tracing(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color)
        .compact()
        .try_init();
}

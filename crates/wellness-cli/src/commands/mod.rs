//! CLI command definitions and dispatch.

pub mod config;
pub mod count;
pub mod entities;
pub mod find;
pub mod get;
pub mod report;
pub mod slug;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::output::OutputFormat;
use wellness_core::config::AppConfig;
use wellness_core::error::AppError;
use wellness_core::traits::{Store, TracingObserver};
use wellness_core::types::RawQuery;
use wellness_database::{EntityRegistry, MemoryStore, Repositories};
use wellness_service::GenericService;

/// Wellness platform data CLI
#[derive(Debug, Parser)]
#[command(name = "wellness", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every accepted entity name and alias
    Entities,
    /// Count live rows of an entity
    Count(count::CountArgs),
    /// Query rows of an entity
    Find(find::FindArgs),
    /// Fetch one row by id or slug
    Get(get::GetArgs),
    /// Answers of a form grouped by question group
    Report(report::ReportArgs),
    /// Generate a slug for a name
    Slug(slug::SlugArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Entities => entities::execute(&self.config, self.format).await,
            Commands::Count(args) => count::execute(args, &self.config, self.format).await,
            Commands::Find(args) => find::execute(args, &self.config, self.format).await,
            Commands::Get(args) => get::execute(args, &self.config, self.format).await,
            Commands::Report(args) => report::execute(args, &self.config, self.format).await,
            Commands::Slug(args) => slug::execute(args, self.format),
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Query options shared by `count` and `find`.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Filter as JSON, e.g. '{"title":{"contains":"yoga","mode":"insensitive"}}'
    #[arg(long = "where")]
    pub filter: Option<String>,
}

impl QueryArgs {
    /// Raw query holding just the filter, or `None` without one.
    pub fn to_raw(&self) -> Result<Option<RawQuery>, AppError> {
        self.filter
            .as_deref()
            .map(|filter| RawQuery::from_pairs([("where", filter)]))
            .transpose()
    }
}

/// Repositories and registry over the configured store.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Every entity repository.
    pub repos: Repositories,
    /// Name-driven access to the same repositories.
    pub service: GenericService,
}

/// Helper: load configuration from file
pub async fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: load configuration and open the store it points to
pub async fn open_context(config_path: &str) -> Result<AppContext, AppError> {
    let config = load_config(config_path).await?;
    let store: Arc<dyn Store> = match &config.store.seed_file {
        Some(path) => Arc::new(MemoryStore::from_seed_file(path).await?),
        None => {
            warn!("No store.seed_file configured, starting with an empty store");
            Arc::new(MemoryStore::new())
        }
    };
    let repos = Repositories::with_options(store, Arc::new(TracingObserver), config.slug);
    let service = GenericService::new(Arc::new(EntityRegistry::from_repositories(&repos)));
    Ok(AppContext { repos, service })
}

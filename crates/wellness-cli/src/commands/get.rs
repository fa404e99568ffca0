//! Single-row lookup command.

use clap::Args;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use wellness_core::error::AppError;

/// Arguments for the get command
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Entity name or alias
    pub entity: String,

    #[command(flatten)]
    pub key: LookupKey,
}

/// Exactly one of id or slug
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct LookupKey {
    /// Row id
    #[arg(long)]
    pub id: Option<Uuid>,

    /// Exact slug
    #[arg(long)]
    pub slug: Option<String>,
}

/// Execute the get command
pub async fn execute(
    args: &GetArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::open_context(config_path).await?;
    let document = match (&args.key.id, &args.key.slug) {
        (Some(id), _) => ctx.service.get_by_id(&args.entity, *id).await?,
        (None, Some(slug)) => ctx.service.get_by_slug(&args.entity, slug).await?,
        (None, None) => return Err(AppError::validation("Pass --id or --slug")),
    };

    match format {
        OutputFormat::Table => output::print_document(&document),
        OutputFormat::Json => output::print_json(&document),
    }
    Ok(())
}

//! Count command.

use clap::Args;
use serde_json::json;

use super::QueryArgs;
use crate::output::{self, OutputFormat};
use wellness_core::error::AppError;

/// Arguments for the count command
#[derive(Debug, Args)]
pub struct CountArgs {
    /// Entity name or alias
    pub entity: String,

    #[command(flatten)]
    pub query: QueryArgs,
}

/// Execute the count command
pub async fn execute(
    args: &CountArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::open_context(config_path).await?;
    let raw = args.query.to_raw()?;
    let total = ctx.service.count(&args.entity, raw.as_ref()).await?;

    match format {
        OutputFormat::Table => println!("{total}"),
        OutputFormat::Json => output::print_json(&json!({
            "entity": args.entity,
            "count": total,
        })),
    }
    Ok(())
}

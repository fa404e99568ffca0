//! Entity listing command.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use wellness_core::error::AppError;
use wellness_core::types::DeletePolicy;

/// Entity display row for table output
#[derive(Debug, Serialize, Tabled)]
struct EntityRow {
    /// Canonical name
    entity: &'static str,
    /// Accepted aliases
    aliases: String,
    /// Delete behaviour
    delete: &'static str,
    /// Slug column, if any
    slug: &'static str,
    /// Relations loaded by default
    includes: String,
}

/// Execute the entities command
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let ctx = super::open_context(config_path).await?;

    match format {
        OutputFormat::Json => output::print_json(&ctx.service.list_entities()),
        OutputFormat::Table => {
            let rows: Vec<EntityRow> = ctx
                .service
                .registry()
                .kinds()
                .map(|kind| {
                    let entity = kind.descriptor();
                    EntityRow {
                        entity: kind.name(),
                        aliases: kind.aliases().join(", "),
                        delete: match entity.delete_policy {
                            DeletePolicy::Soft { .. } => "soft",
                            DeletePolicy::Hard => "hard",
                        },
                        slug: entity.slug_field.unwrap_or("-"),
                        includes: entity.default_include.join(", "),
                    }
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

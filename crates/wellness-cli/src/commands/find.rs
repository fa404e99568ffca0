//! Find command.

use clap::Args;

use super::QueryArgs;
use crate::output::{self, OutputFormat};
use wellness_core::error::AppError;
use wellness_core::types::RawQuery;

/// Arguments for the find command
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Entity name or alias
    pub entity: String,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Relations to load as JSON, e.g. '{"modules":true}'
    #[arg(long)]
    pub include: Option<String>,

    /// Fields to keep as JSON; wins over --include
    #[arg(long)]
    pub select: Option<String>,

    /// Ordering: a field name or JSON, e.g. '[{"order":"asc"}]'
    #[arg(long)]
    pub order_by: Option<String>,

    /// Page size; 0 returns every row
    #[arg(long, allow_negative_numbers = true)]
    pub take: Option<i64>,

    /// Rows to skip
    #[arg(long, allow_negative_numbers = true)]
    pub skip: Option<i64>,

    /// Also report the total number of matching rows
    #[arg(long)]
    pub count: bool,
}

impl FindArgs {
    fn to_raw(&self) -> Result<RawQuery, AppError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(filter) = &self.query.filter {
            pairs.push(("where", filter.clone()));
        }
        if let Some(include) = &self.include {
            pairs.push(("include", include.clone()));
        }
        if let Some(select) = &self.select {
            pairs.push(("select", select.clone()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("orderBy", order_by.clone()));
        }
        if let Some(take) = self.take {
            pairs.push(("take", take.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if self.count {
            pairs.push(("getCount", "true".to_string()));
        }
        RawQuery::from_pairs(pairs)
    }
}

/// Execute the find command
pub async fn execute(
    args: &FindArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::open_context(config_path).await?;
    let result = ctx.service.find(&args.entity, &args.to_raw()?).await?;

    match format {
        OutputFormat::Json => output::print_json(&result),
        OutputFormat::Table => {
            output::print_documents(result.records());
            if let Some(total) = result.total_count() {
                output::print_kv("Total", &total.to_string());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use serde_json::json;

    use crate::commands::{Cli, Commands};

    #[test]
    fn test_flags_become_raw_query() {
        let cli = Cli::try_parse_from([
            "wellness",
            "find",
            "courses",
            "--where",
            r#"{"title":"Yoga"}"#,
            "--take",
            "5",
            "--order-by",
            "title",
            "--count",
        ])
        .unwrap();
        let Commands::Find(args) = cli.command else {
            panic!("expected find");
        };

        let raw = args.to_raw().unwrap();
        assert_eq!(raw.filter, Some(json!({ "title": "Yoga" })));
        assert_eq!(raw.take, Some(json!("5")));
        assert_eq!(raw.order_by, Some(json!("title")));
        assert_eq!(raw.get_count, Some(json!("true")));
        assert!(raw.skip.is_none());
    }

    #[test]
    fn test_get_requires_exactly_one_key() {
        assert!(Cli::try_parse_from(["wellness", "get", "course"]).is_err());
        assert!(
            Cli::try_parse_from(["wellness", "get", "course", "--slug", "a", "--id", "x"])
                .is_err()
        );
    }
}

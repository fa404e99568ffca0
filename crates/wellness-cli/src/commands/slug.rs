//! Slug preview command.

use clap::Args;

use crate::output::{self, OutputFormat};
use wellness_core::error::AppError;
use wellness_database::make_slug;

/// Arguments for the slug command
#[derive(Debug, Args)]
pub struct SlugArgs {
    /// Name to derive the slug from
    pub name: String,

    /// How many candidates to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

/// Execute the slug command
pub fn execute(args: &SlugArgs, format: OutputFormat) -> Result<(), AppError> {
    let slugs: Vec<String> = (0..args.count).map(|_| make_slug(&args.name)).collect();
    match format {
        OutputFormat::Table => slugs.iter().for_each(|slug| println!("{slug}")),
        OutputFormat::Json => output::print_json(&slugs),
    }
    Ok(())
}

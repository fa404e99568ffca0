//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use wellness_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration and its seed file
    Validate,
    /// Write the default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path).await?;
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    output::print_kv("logging.level", &config.logging.level);
                    output::print_kv("logging.format", &config.logging.format);
                    output::print_kv(
                        "store.seed_file",
                        config.store.seed_file.as_deref().unwrap_or("-"),
                    );
                    output::print_kv("slug.max_attempts", &config.slug.max_attempts.to_string());
                }
            }
        }
        ConfigCommand::Validate => match super::open_context(config_path).await {
            Ok(ctx) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                let tables = [("Courses", "course"), ("Forms", "form"), ("Profiles", "profile")];
                for (label, entity) in tables {
                    let total = ctx.service.count(entity, None).await?;
                    output::print_kv(label, &total.to_string());
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(out_path, default_config).await?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}

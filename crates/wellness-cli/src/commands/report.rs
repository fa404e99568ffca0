//! Grouped answer report command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use wellness_core::error::AppError;
use wellness_core::types::FormId;
use wellness_service::{FormAnswerReport, GroupedAnswerReport};

/// Arguments for the report command
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Form id
    pub form_id: FormId,
}

/// One answer per row for table output
#[derive(Debug, Serialize, Tabled)]
struct AnswerRow {
    /// Group label
    group: String,
    /// Question text
    question: String,
    /// Answering profile
    profile: String,
    /// Submitted value
    value: String,
    /// Submission time
    submitted_at: String,
}

/// Execute the report command
pub async fn execute(
    args: &ReportArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::open_context(config_path).await?;
    let report = GroupedAnswerReport::from_repositories(&ctx.repos)
        .generate(args.form_id)
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_kv("Form", &report.form_title);
            output::print_kv("Answers", &report.total_answers.to_string());
            output::print_list(&answer_rows(&report), format);
        }
    }
    Ok(())
}

fn answer_rows(report: &FormAnswerReport) -> Vec<AnswerRow> {
    report
        .groups
        .iter()
        .flat_map(|group| {
            group.questions.iter().flat_map(move |question| {
                question.answers.iter().map(move |answer| AnswerRow {
                    group: group.label.clone(),
                    question: question.text.clone(),
                    profile: answer.profile_id.to_string(),
                    value: match &answer.value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    },
                    submitted_at: answer.submitted_at.to_rfc3339(),
                })
            })
        })
        .collect()
}

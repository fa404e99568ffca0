//! Seed data loading.
//!
//! A seed is a JSON object mapping an entity name (or alias) to an array
//! of rows, e.g. `{"courses": [{"title": "Intro", "slug": "intro-101"}]}`.
//! A missing `id` is generated and missing timestamps default to the load
//! time. Rows with unknown columns, or that do not decode into the entity's
//! model, are rejected before anything is inserted.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use wellness_core::AppError;
use wellness_core::error::ErrorKind;
use wellness_core::result::AppResult;
use wellness_core::types::{Document, EntityDescriptor};
use wellness_entity::EntityKind;

/// Rows of one entity, ready for insertion.
#[derive(Debug, Clone)]
pub struct SeedTable {
    /// Target entity.
    pub entity: &'static EntityDescriptor,
    /// Rows, completed with ids and timestamps.
    pub rows: Vec<Document>,
}

/// Parse a seed document.
pub fn parse_seed(value: &Value) -> AppResult<Vec<SeedTable>> {
    let object = value
        .as_object()
        .ok_or_else(|| AppError::validation("Seed must be a JSON object of entity -> rows"))?;

    let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    let mut tables = Vec::with_capacity(object.len());
    for (name, rows) in object {
        let kind = name.parse::<EntityKind>()?;
        let entity = kind.descriptor();
        let rows = rows.as_array().ok_or_else(|| {
            AppError::validation(format!("Seed entry '{name}' must be an array of rows"))
        })?;

        let mut completed = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(row) = row else {
                return Err(AppError::validation(format!(
                    "Seed rows for '{name}' must be JSON objects"
                )));
            };
            if let Some(key) = row.keys().find(|key| !entity.has_field(key)) {
                return Err(AppError::validation(format!(
                    "Seed row for '{name}' has unknown field '{key}'"
                )));
            }
            let mut row = row.clone();
            row.entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            for field in ["createdAt", "updatedAt"] {
                if entity.has_field(field) {
                    row.entry(field).or_insert_with(|| now.clone());
                }
            }
            if let Some(marker) = entity.marker() {
                row.entry(marker).or_insert(Value::Null);
            }
            kind.check_row(&row).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid seed row #{} for '{name}': {e}", completed.len()),
                    e,
                )
            })?;
            completed.push(row);
        }
        tables.push(SeedTable {
            entity,
            rows: completed,
        });
    }
    Ok(tables)
}

/// Read and parse a seed file.
pub async fn read_seed_file(path: impl AsRef<Path>) -> AppResult<Vec<SeedTable>> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to read seed file {}", path.display()),
            e,
        )
    })?;
    let value: Value = serde_json::from_str(&text)?;
    let tables = parse_seed(&value)?;
    info!(
        path = %path.display(),
        tables = tables.len(),
        rows = tables.iter().map(|t| t.rows.len()).sum::<usize>(),
        "Seed file parsed"
    );
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_seed_completes_rows() {
        let tables = parse_seed(&json!({
            "courses": [{ "title": "Intro", "slug": "intro-101" }],
            "answer": [{
                "formId": "0b3c2d4e-5f60-4a71-8b92-a3b4c5d6e7f8",
                "questionId": "1c4d3e5f-6071-4b82-9ca3-b4c5d6e7f809",
                "profileId": "2d5e4f60-7182-4c93-adb4-c5d6e7f8091a",
                "value": 3
            }]
        }))
        .unwrap();

        assert_eq!(tables[0].entity.name, "course");
        let course = &tables[0].rows[0];
        assert!(course["id"].is_string());
        assert!(course["createdAt"].is_string());
        assert!(course["deletedAt"].is_null());

        // Hard-delete entities get no marker column.
        assert!(!tables[1].rows[0].contains_key("deletedAt"));
    }

    #[test]
    fn test_parse_seed_rejects_rows_that_do_not_fit() {
        let err = parse_seed(&json!({
            "courses": [{ "title": "Intro", "slug": "intro", "level": 1 }]
        }))
        .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert!(err.message.contains("level"));

        let err = parse_seed(&json!({ "courses": [{ "title": 5, "slug": "intro" }] })).unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        // Missing required column.
        let err = parse_seed(&json!({ "courses": [{ "title": "Intro" }] })).unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_parse_seed_rejects_unknown_entity() {
        let err = parse_seed(&json!({ "widgets": [] })).unwrap_err();
        assert!(err.is(ErrorKind::UnknownEntity));
    }
}

//! Sorting types for list queries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::entity::EntityDescriptor;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parse `"asc"` / `"desc"` (any case).
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::invalid_query(format!(
                "Invalid sort direction '{s}'. Expected 'asc' or 'desc'"
            ))),
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field name to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Parse a JSON `orderBy`: `{"field": "asc"}` or an array of such
    /// objects. Keys inside one object keep their order of appearance.
    pub fn list_from_json(value: &Value) -> AppResult<Vec<Self>> {
        match value {
            Value::Object(object) => object
                .iter()
                .map(|(field, dir)| {
                    let dir = dir.as_str().ok_or_else(|| {
                        AppError::invalid_query(format!(
                            "Sort direction for '{field}' must be a string"
                        ))
                    })?;
                    Ok(Self::new(field.as_str(), SortDirection::parse(dir)?))
                })
                .collect(),
            Value::Array(items) => {
                let mut fields = Vec::with_capacity(items.len());
                for item in items {
                    if !item.is_object() {
                        return Err(AppError::invalid_query("'orderBy' entries must be objects"));
                    }
                    fields.extend(Self::list_from_json(item)?);
                }
                Ok(fields)
            }
            _ => Err(AppError::invalid_query(
                "'orderBy' must be an object or an array of objects",
            )),
        }
    }

    /// Check the field against the entity descriptor.
    pub fn validate(&self, entity: &EntityDescriptor) -> AppResult<()> {
        if entity.has_field(&self.field) {
            Ok(())
        } else {
            Err(AppError::invalid_query(format!(
                "Cannot sort by unknown field '{}' on entity '{}'",
                self.field, entity.name
            )))
        }
    }
}

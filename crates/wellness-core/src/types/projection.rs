//! `include` / `select` projections.

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::entity::EntityDescriptor;

/// One named entry of a projection, optionally with a nested projection
/// applied to the related rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionItem {
    /// Field or relation name.
    pub name: String,
    /// Projection of the related rows (relations only).
    pub nested: Option<Box<Projection>>,
}

impl ProjectionItem {
    /// A plain entry without nested projection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nested: None,
        }
    }

    /// An entry with a nested projection.
    pub fn nested(name: impl Into<String>, projection: Projection) -> Self {
        Self {
            name: name.into(),
            nested: Some(Box::new(projection)),
        }
    }
}

/// Shape of the returned rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// All scalar fields plus the listed relations.
    Include(Vec<ProjectionItem>),
    /// Only the listed fields and relations.
    Select(Vec<ProjectionItem>),
}

impl Projection {
    /// Parse a JSON `include` object.
    pub fn include_from_json(value: &Value) -> AppResult<Self> {
        Ok(Self::Include(parse_items("include", value)?))
    }

    /// Parse a JSON `select` object.
    pub fn select_from_json(value: &Value) -> AppResult<Self> {
        Ok(Self::Select(parse_items("select", value)?))
    }

    /// The projection entries.
    pub fn items(&self) -> &[ProjectionItem] {
        match self {
            Self::Include(items) | Self::Select(items) => items,
        }
    }

    /// Check every name against the entity descriptor. `include` only
    /// accepts relations; `select` accepts fields and relations. Nested
    /// projections are checked against the related entity.
    pub fn validate(&self, entity: &EntityDescriptor) -> AppResult<()> {
        for item in self.items() {
            match entity.relation(&item.name) {
                Some(relation) => {
                    if let Some(nested) = &item.nested {
                        nested.validate(relation.target)?;
                    }
                }
                None if matches!(self, Self::Select(_)) && entity.has_field(&item.name) => {
                    if item.nested.is_some() {
                        return Err(AppError::invalid_query(format!(
                            "Field '{}' on entity '{}' is not a relation",
                            item.name, entity.name
                        )));
                    }
                }
                None => {
                    return Err(AppError::invalid_query(format!(
                        "Unknown relation '{}' on entity '{}'",
                        item.name, entity.name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_items(key: &str, value: &Value) -> AppResult<Vec<ProjectionItem>> {
    let object = value
        .as_object()
        .ok_or_else(|| AppError::invalid_query(format!("'{key}' must be a JSON object")))?;

    let mut items = Vec::with_capacity(object.len());
    for (name, entry) in object {
        match entry {
            Value::Bool(true) => items.push(ProjectionItem::new(name.as_str())),
            Value::Bool(false) => {}
            Value::Object(nested) => items.push(parse_nested(name, nested)?),
            other => {
                return Err(AppError::invalid_query(format!(
                    "Invalid {key} entry for '{name}': {other}"
                )));
            }
        }
    }
    Ok(items)
}

fn parse_nested(name: &str, nested: &Map<String, Value>) -> AppResult<ProjectionItem> {
    if let Some(key) = nested.keys().find(|k| *k != "select" && *k != "include") {
        return Err(AppError::invalid_query(format!(
            "Unsupported nested projection key '{key}' for '{name}'"
        )));
    }
    // Same rule as the top level: select wins over include.
    let projection = match (nested.get("select"), nested.get("include")) {
        (Some(select), _) => Projection::select_from_json(select)?,
        (None, Some(include)) => Projection::include_from_json(include)?,
        (None, None) => return Ok(ProjectionItem::new(name)),
    };
    Ok(ProjectionItem::nested(name, projection))
}

//! Typed filter expressions for the `where` clause of a query.
//!
//! Filters arrive from the HTTP boundary in the persistence collaborator's
//! JSON shape (`{"name": "x", "age": {"gte": 3}, "OR": [...]}`) and are
//! parsed here into a [`Filter`] tree, so malformed filters are rejected
//! before they reach a store.

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::entity::{Cardinality, EntityDescriptor};

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Equality. A `null` operand means "is null".
    Equals,
    /// Inequality. A `null` operand means "is not null".
    Not,
    /// Membership in a list.
    In,
    /// Non-membership in a list.
    NotIn,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Substring match.
    Contains,
    /// Prefix match.
    StartsWith,
    /// Suffix match.
    EndsWith,
}

impl FilterOp {
    /// Parse an operator key as written in a JSON filter.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "equals" => Some(Self::Equals),
            "not" => Some(Self::Not),
            "in" => Some(Self::In),
            "notIn" => Some(Self::NotIn),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "contains" => Some(Self::Contains),
            "startsWith" => Some(Self::StartsWith),
            "endsWith" => Some(Self::EndsWith),
            _ => None,
        }
    }

    /// Return the JSON key of this operator.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Not => "not",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Contains => "contains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
        }
    }

    fn is_textual(&self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith | Self::EndsWith)
    }

    fn is_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    fn is_ordering(&self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }
}

/// A single condition on a scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The comparison operator.
    pub op: FilterOp,
    /// The operand.
    pub value: Value,
    /// Compare strings case-insensitively.
    pub insensitive: bool,
}

impl Condition {
    /// Create a case-sensitive condition.
    pub fn new(op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            op,
            value: value.into(),
            insensitive: false,
        }
    }
}

/// How a relation filter applies to the related rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// At least one related row matches (to-many).
    Some,
    /// Every related row matches (to-many).
    Every,
    /// No related row matches (to-many).
    None,
    /// The related row exists and matches (to-one).
    Is,
    /// The related row is absent or does not match (to-one).
    IsNot,
}

impl Quantifier {
    /// Parse a quantifier key as written in a JSON filter.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "some" => Some(Self::Some),
            "every" => Some(Self::Every),
            "none" => Some(Self::None),
            "is" => Some(Self::Is),
            "isNot" => Some(Self::IsNot),
            _ => None,
        }
    }

    fn applies_to(&self, cardinality: Cardinality) -> bool {
        match self {
            Self::Some | Self::Every | Self::None => cardinality == Cardinality::Many,
            Self::Is | Self::IsNot => cardinality == Cardinality::One,
        }
    }
}

/// A filter expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// All sub-filters match. An empty list matches everything.
    And(Vec<Filter>),
    /// At least one sub-filter matches. An empty list matches nothing.
    Or(Vec<Filter>),
    /// The sub-filter does not match.
    Not(Box<Filter>),
    /// A condition on one scalar field.
    Field {
        /// Field name.
        field: String,
        /// Condition applied to the field.
        condition: Condition,
    },
    /// A condition on the rows of a relation.
    Relation {
        /// Relation name.
        relation: String,
        /// How the nested filter applies to the related rows.
        quantifier: Quantifier,
        /// Filter on the related entity.
        filter: Box<Filter>,
    },
}

impl Filter {
    /// A filter matching every row.
    pub fn all() -> Self {
        Self::And(Vec::new())
    }

    /// `field = value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Field {
            field: field.into(),
            condition: Condition::new(FilterOp::Equals, value),
        }
    }

    /// `field IS NULL`.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::eq(field, Value::Null)
    }

    /// `field IS NOT NULL`.
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            condition: Condition::new(FilterOp::Not, Value::Null),
        }
    }

    /// `field IN (values)`.
    pub fn in_list<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::Field {
            field: field.into(),
            condition: Condition::new(
                FilterOp::In,
                Value::Array(values.into_iter().map(Into::into).collect()),
            ),
        }
    }

    /// A generic field condition.
    pub fn cond(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self::Field {
            field: field.into(),
            condition: Condition::new(op, value),
        }
    }

    /// A filter on the rows of a relation.
    pub fn relation(relation: impl Into<String>, quantifier: Quantifier, filter: Filter) -> Self {
        Self::Relation {
            relation: relation.into(),
            quantifier,
            filter: Box::new(filter),
        }
    }

    /// Conjunction of `self` and `other`, flattening nested `And`s.
    pub fn and(self, other: Filter) -> Self {
        let mut parts = match self {
            Self::And(parts) => parts,
            f => vec![f],
        };
        match other {
            Self::And(more) => parts.extend(more),
            f => parts.push(f),
        }
        if parts.len() == 1 {
            parts.remove(0)
        } else {
            Self::And(parts)
        }
    }

    /// Whether a field condition on `field` appears anywhere in this
    /// entity's own filter tree. Relation sub-filters belong to another
    /// entity and are not inspected.
    pub fn mentions_field(&self, field: &str) -> bool {
        match self {
            Self::And(parts) | Self::Or(parts) => parts.iter().any(|p| p.mentions_field(field)),
            Self::Not(inner) => inner.mentions_field(field),
            Self::Field { field: f, .. } => f == field,
            Self::Relation { .. } => false,
        }
    }

    /// Parse a JSON `where` object.
    pub fn from_json(value: &Value) -> AppResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| AppError::invalid_query("'where' must be a JSON object"))?;
        parse_object(object)
    }

    /// Check every field and relation name against the entity descriptor.
    pub fn validate(&self, entity: &EntityDescriptor) -> AppResult<()> {
        match self {
            Self::And(parts) | Self::Or(parts) => {
                parts.iter().try_for_each(|p| p.validate(entity))
            }
            Self::Not(inner) => inner.validate(entity),
            Self::Field { field, .. } => {
                if entity.has_field(field) {
                    Ok(())
                } else {
                    Err(AppError::invalid_query(format!(
                        "Unknown field '{field}' on entity '{}'",
                        entity.name
                    )))
                }
            }
            Self::Relation {
                relation,
                quantifier,
                filter,
            } => {
                let def = entity.relation(relation).ok_or_else(|| {
                    AppError::invalid_query(format!(
                        "Unknown relation '{relation}' on entity '{}'",
                        entity.name
                    ))
                })?;
                if !quantifier.applies_to(def.cardinality) {
                    return Err(AppError::invalid_query(format!(
                        "Quantifier {quantifier:?} does not apply to relation '{relation}'"
                    )));
                }
                filter.validate(def.target)
            }
        }
    }
}

fn parse_object(object: &Map<String, Value>) -> AppResult<Filter> {
    let mut parts = Vec::with_capacity(object.len());
    for (key, value) in object {
        match key.as_str() {
            "AND" => parts.push(Filter::And(parse_list(key, value)?)),
            "OR" => parts.push(Filter::Or(parse_list(key, value)?)),
            // A list under NOT means none of its entries may hold.
            "NOT" => {
                let mut negated: Vec<Filter> = parse_list(key, value)?
                    .into_iter()
                    .map(|f| Filter::Not(Box::new(f)))
                    .collect();
                parts.push(match negated.len() {
                    1 => negated.remove(0),
                    _ => Filter::And(negated),
                });
            }
            _ => parts.push(parse_entry(key, value)?),
        }
    }
    Ok(match parts.len() {
        1 => parts.remove(0),
        _ => Filter::And(parts),
    })
}

/// Logical operators accept a single object or an array of objects.
fn parse_list(key: &str, value: &Value) -> AppResult<Vec<Filter>> {
    match value {
        Value::Object(object) => Ok(vec![parse_object(object)?]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object().map(parse_object).unwrap_or_else(|| {
                    Err(AppError::invalid_query(format!(
                        "'{key}' entries must be JSON objects"
                    )))
                })
            })
            .collect(),
        _ => Err(AppError::invalid_query(format!(
            "'{key}' must be an object or an array of objects"
        ))),
    }
}

fn parse_entry(key: &str, value: &Value) -> AppResult<Filter> {
    let Value::Object(object) = value else {
        return Ok(Filter::eq(key, value.clone()));
    };
    if object.is_empty() {
        return Ok(Filter::all());
    }

    let is_operator = |k: &str| k == "mode" || FilterOp::from_key(k).is_some();
    if object.keys().any(|k| is_operator(k.as_str())) {
        return parse_conditions(key, object);
    }
    if object.keys().any(|k| Quantifier::from_key(k).is_some()) {
        return parse_quantified(key, object);
    }
    // `{"trail": {"slug": "x"}}` is shorthand for `{"trail": {"is": {...}}}`.
    Ok(Filter::relation(key, Quantifier::Is, parse_object(object)?))
}

fn parse_conditions(field: &str, object: &Map<String, Value>) -> AppResult<Filter> {
    let insensitive = match object.get("mode") {
        None => false,
        Some(Value::String(mode)) if mode == "insensitive" => true,
        Some(Value::String(mode)) if mode == "default" => false,
        Some(other) => {
            return Err(AppError::invalid_query(format!(
                "Invalid mode {other} on field '{field}'"
            )));
        }
    };

    let mut parts = Vec::new();
    for (key, value) in object {
        if key == "mode" {
            continue;
        }
        let op = FilterOp::from_key(key).ok_or_else(|| {
            AppError::invalid_query(format!("Unknown filter operator '{key}' on field '{field}'"))
        })?;
        check_operand(field, op, value)?;
        parts.push(Filter::Field {
            field: field.to_string(),
            condition: Condition {
                op,
                value: value.clone(),
                insensitive,
            },
        });
    }
    Ok(match parts.len() {
        1 => parts.remove(0),
        _ => Filter::And(parts),
    })
}

fn check_operand(field: &str, op: FilterOp, value: &Value) -> AppResult<()> {
    let ok = if op.is_list() {
        value.is_array()
    } else if op.is_textual() {
        value.is_string()
    } else if op.is_ordering() {
        value.is_number() || value.is_string()
    } else {
        !value.is_object()
    };
    if ok {
        Ok(())
    } else {
        Err(AppError::invalid_query(format!(
            "Invalid operand {value} for '{}' on field '{field}'",
            op.as_key()
        )))
    }
}

fn parse_quantified(relation: &str, object: &Map<String, Value>) -> AppResult<Filter> {
    let mut parts = Vec::new();
    for (key, value) in object {
        let quantifier = Quantifier::from_key(key).ok_or_else(|| {
            AppError::invalid_query(format!(
                "Unknown relation filter '{key}' on relation '{relation}'"
            ))
        })?;
        let nested = match value {
            Value::Object(nested) => parse_object(nested)?,
            // `{"trail": {"is": null}}` asks for rows without a related row.
            Value::Null if quantifier == Quantifier::Is => {
                Filter::Not(Box::new(Filter::relation(relation, Quantifier::Is, Filter::all())))
            }
            Value::Null if quantifier == Quantifier::IsNot => {
                Filter::relation(relation, Quantifier::Is, Filter::all())
            }
            _ => {
                return Err(AppError::invalid_query(format!(
                    "'{key}' on relation '{relation}' must be a JSON object"
                )));
            }
        };
        if value.is_null() {
            parts.push(nested);
        } else {
            parts.push(Filter::relation(relation, quantifier, nested));
        }
    }
    Ok(match parts.len() {
        1 => parts.remove(0),
        _ => Filter::And(parts),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_scalar_is_equality() {
        let filter = Filter::from_json(&json!({ "slug": "intro-101" })).unwrap();
        assert_eq!(filter, Filter::eq("slug", "intro-101"));
    }

    #[test]
    fn test_null_is_null_check() {
        let filter = Filter::from_json(&json!({ "deletedAt": null })).unwrap();
        assert_eq!(filter, Filter::is_null("deletedAt"));
        assert!(filter.mentions_field("deletedAt"));
    }

    #[test]
    fn test_operator_object_expands_to_conjunction() {
        let filter = Filter::from_json(&json!({ "order": { "gte": 1, "lt": 5 } })).unwrap();
        let Filter::And(parts) = filter else {
            panic!("expected conjunction");
        };
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_insensitive_mode() {
        let filter =
            Filter::from_json(&json!({ "name": { "contains": "yoga", "mode": "insensitive" } }))
                .unwrap();
        match filter {
            Filter::Field { condition, .. } => {
                assert_eq!(condition.op, FilterOp::Contains);
                assert!(condition.insensitive);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = Filter::from_json(&json!({ "name": { "equals": "a", "like": "b" } }))
            .unwrap_err();
        assert!(err.message.contains("like"));
    }

    #[test]
    fn test_in_requires_array() {
        assert!(Filter::from_json(&json!({ "role": { "in": "admin" } })).is_err());
        assert!(Filter::from_json(&json!({ "role": { "in": ["admin"] } })).is_ok());
    }

    #[test]
    fn test_logical_operators() {
        let filter = Filter::from_json(&json!({
            "OR": [{ "name": "a" }, { "name": "b" }],
            "NOT": { "deletedAt": { "not": null } }
        }))
        .unwrap();
        assert!(filter.mentions_field("deletedAt"));
        assert!(filter.mentions_field("name"));
    }

    #[test]
    fn test_not_list_negates_each_entry() {
        let filter =
            Filter::from_json(&json!({ "NOT": [{ "name": "a" }, { "name": "b" }] })).unwrap();
        let Filter::And(parts) = filter else {
            panic!("expected AND of negations");
        };
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| matches!(p, Filter::Not(_))));

        let single = Filter::from_json(&json!({ "NOT": { "name": "a" } })).unwrap();
        assert!(matches!(single, Filter::Not(_)));
    }

    #[test]
    fn test_relation_filters() {
        let filter =
            Filter::from_json(&json!({ "memberships": { "some": { "organizationId": "x" } } }))
                .unwrap();
        assert!(matches!(
            filter,
            Filter::Relation { quantifier: Quantifier::Some, .. }
        ));
        // Relation sub-filters do not count as mentions of the parent's fields.
        let nested = Filter::from_json(&json!({ "trail": { "deletedAt": null } })).unwrap();
        assert!(!nested.mentions_field("deletedAt"));
    }

    #[test]
    fn test_where_must_be_object() {
        assert!(Filter::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_and_flattens() {
        let f = Filter::eq("a", 1).and(Filter::eq("b", 2)).and(Filter::eq("c", 3));
        assert!(matches!(f, Filter::And(ref parts) if parts.len() == 3));
    }
}

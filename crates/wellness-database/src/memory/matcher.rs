//! Filter evaluation against stored documents.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use wellness_core::types::{
    Condition, Document, EntityDescriptor, Filter, FilterOp, Quantifier, RelationDef,
};

/// Every table, keyed by entity name.
pub(crate) type Tables = HashMap<&'static str, Vec<Document>>;

/// Whether `row` of `entity` satisfies `filter`.
pub(crate) fn matches(
    tables: &Tables,
    entity: &'static EntityDescriptor,
    row: &Document,
    filter: &Filter,
) -> bool {
    match filter {
        Filter::And(parts) => parts.iter().all(|p| matches(tables, entity, row, p)),
        Filter::Or(parts) => parts.iter().any(|p| matches(tables, entity, row, p)),
        Filter::Not(inner) => !matches(tables, entity, row, inner),
        Filter::Field { field, condition } => {
            matches_condition(row.get(field).unwrap_or(&Value::Null), condition)
        }
        Filter::Relation {
            relation,
            quantifier,
            filter,
        } => {
            let Some(def) = entity.relation(relation) else {
                return false;
            };
            let related = related_rows(tables, row, def);
            let hit = |r: &&Document| matches(tables, def.target, r, filter);
            match quantifier {
                Quantifier::Some => related.iter().any(hit),
                Quantifier::Every => related.iter().all(hit),
                Quantifier::None => !related.iter().any(hit),
                Quantifier::Is => related.first().is_some_and(hit),
                Quantifier::IsNot => !related.first().is_some_and(hit),
            }
        }
    }
}

/// Rows of the relation's target entity linked to `row`.
pub(crate) fn related_rows<'a>(
    tables: &'a Tables,
    row: &Document,
    def: &RelationDef,
) -> Vec<&'a Document> {
    let Some(key) = row.get(def.local_key).filter(|v| !v.is_null()) else {
        return Vec::new();
    };
    tables
        .get(def.target.name)
        .map(|rows| {
            rows.iter()
                .filter(|r| r.get(def.foreign_key) == Some(key))
                .collect()
        })
        .unwrap_or_default()
}

fn matches_condition(actual: &Value, condition: &Condition) -> bool {
    let expected = &condition.value;
    let insensitive = condition.insensitive;
    match condition.op {
        FilterOp::Equals => values_equal(actual, expected, insensitive),
        // SQL semantics: `<> value` never matches NULL.
        FilterOp::Not => {
            if expected.is_null() {
                !actual.is_null()
            } else {
                !actual.is_null() && !values_equal(actual, expected, insensitive)
            }
        }
        FilterOp::In => !actual.is_null() && in_list(actual, expected, insensitive),
        FilterOp::NotIn => !actual.is_null() && !in_list(actual, expected, insensitive),
        FilterOp::Lt => compare_values(actual, expected, insensitive) == Some(Ordering::Less),
        FilterOp::Lte => matches!(
            compare_values(actual, expected, insensitive),
            Some(Ordering::Less | Ordering::Equal)
        ),
        FilterOp::Gt => compare_values(actual, expected, insensitive) == Some(Ordering::Greater),
        FilterOp::Gte => matches!(
            compare_values(actual, expected, insensitive),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::Contains => text_test(actual, expected, insensitive, |a, b| a.contains(b)),
        FilterOp::StartsWith => text_test(actual, expected, insensitive, |a, b| a.starts_with(b)),
        FilterOp::EndsWith => text_test(actual, expected, insensitive, |a, b| a.ends_with(b)),
    }
}

fn in_list(actual: &Value, list: &Value, insensitive: bool) -> bool {
    list.as_array()
        .is_some_and(|items| items.iter().any(|v| values_equal(actual, v, insensitive)))
}

fn text_test(
    actual: &Value,
    expected: &Value,
    insensitive: bool,
    test: impl Fn(&str, &str) -> bool,
) -> bool {
    match (actual.as_str(), expected.as_str()) {
        (Some(a), Some(b)) if insensitive => test(&a.to_lowercase(), &b.to_lowercase()),
        (Some(a), Some(b)) => test(a, b),
        _ => false,
    }
}

/// Equality with SQL-like null handling: only `null = null` matches a null.
pub(crate) fn values_equal(actual: &Value, expected: &Value, insensitive: bool) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(a), Value::String(b)) => {
            if insensitive {
                a.to_lowercase() == b.to_lowercase()
            } else {
                a == b || matches!(compare_timestamps(a, b), Some(Ordering::Equal))
            }
        }
        (Value::Number(_), Value::Number(_)) => {
            compare_values(actual, expected, false) == Some(Ordering::Equal)
        }
        _ => actual == expected,
    }
}

/// Ordering of two scalar values of the same kind. Strings that both parse
/// as RFC 3339 timestamps compare chronologically.
pub(crate) fn compare_values(a: &Value, b: &Value, insensitive: bool) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => {
            compare_timestamps(x, y).or_else(|| {
                Some(if insensitive {
                    x.to_lowercase().cmp(&y.to_lowercase())
                } else {
                    x.cmp(y)
                })
            })
        }
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare_timestamps(a: &str, b: &str) -> Option<Ordering> {
    let a = DateTime::parse_from_rfc3339(a).ok()?.with_timezone(&Utc);
    let b = DateTime::parse_from_rfc3339(b).ok()?.with_timezone(&Utc);
    Some(a.cmp(&b))
}

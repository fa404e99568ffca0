//! `orderBy` evaluation.

use std::cmp::Ordering;

use serde_json::Value;

use wellness_core::types::{Document, SortDirection, SortField};

use super::matcher::compare_values;

/// Stable sort by the given keys. Nulls sort last in both directions;
/// ties keep insertion order.
///
/// PostgreSQL's default differs on descending keys, where it puts nulls
/// first (`DESC NULLS FIRST`). A SQL-backed store has to order with
/// `NULLS LAST` to return the same rows in the same order.
pub(crate) fn sort_rows(rows: &mut [&Document], order_by: &[SortField]) {
    if order_by.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        order_by
            .iter()
            .map(|key| compare_key(a, b, key))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

fn compare_key(a: &Document, b: &Document, key: &SortField) -> Ordering {
    let a = a.get(&key.field).unwrap_or(&Value::Null);
    let b = b.get(&key.field).unwrap_or(&Value::Null);
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_values(a, b, false).unwrap_or(Ordering::Equal);
            match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

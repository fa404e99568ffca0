//! The canonical query descriptor and the normalizer that builds it from
//! loosely-typed input.
//!
//! Raw queries come from an HTTP query string (every value a string,
//! structured values JSON-encoded) or from a JSON body. [`normalize`] turns
//! either into a [`QueryDescriptor`] and enforces the soft-delete default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::entity::DeletePolicy;
use crate::types::filter::Filter;
use crate::types::projection::Projection;
use crate::types::sorting::{SortDirection, SortField};

/// A filter request as received from the outside. Any subset of keys may
/// be present and values are not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuery {
    /// The `where` clause.
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Relations to eager-load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Value>,
    /// Fields to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Value>,
    /// Sort keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Value>,
    /// Maximum rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<Value>,
    /// Offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<Value>,
    /// Whether to return the filtered total alongside the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_count: Option<Value>,
}

impl RawQuery {
    /// Build a raw query from URL query-string pairs. Unrecognized keys are
    /// ignored; structured values must be JSON-encoded.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> AppResult<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let value: String = value.into();
            match key.as_ref() {
                "where" => raw.filter = Some(decode_json("where", &value)?),
                "include" => raw.include = Some(decode_json("include", &value)?),
                "select" => raw.select = Some(decode_json("select", &value)?),
                "orderBy" => raw.order_by = Some(Value::String(value)),
                "take" => raw.take = Some(Value::String(value)),
                "skip" => raw.skip = Some(Value::String(value)),
                "getCount" => raw.get_count = Some(Value::String(value)),
                _ => {}
            }
        }
        Ok(raw)
    }

    /// A raw query holding only a `where` clause.
    pub fn with_where(filter: Value) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }
}

/// The normalized form of a filter request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    /// The `where` clause.
    pub filter: Option<Filter>,
    /// `include` or `select`; never both.
    pub projection: Option<Projection>,
    /// Sort keys, most significant first.
    pub order_by: Vec<SortField>,
    /// Maximum rows; `None` or `Some(0)` returns every matching row.
    pub take: Option<u64>,
    /// Rows to skip.
    pub skip: Option<u64>,
    /// Return the filtered total alongside the page.
    pub get_count: bool,
}

impl QueryDescriptor {
    /// An empty descriptor: no filter, default projection, all rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the projection.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Append a sort key.
    pub fn with_order(mut self, sort: SortField) -> Self {
        self.order_by.push(sort);
        self
    }

    /// Set `take`.
    pub fn with_take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    /// Set `skip`.
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Request the filtered total.
    pub fn with_count(mut self) -> Self {
        self.get_count = true;
        self
    }

    /// Parse a raw query without applying any delete policy.
    pub fn from_raw(raw: &RawQuery) -> AppResult<Self> {
        let filter = raw
            .filter
            .as_ref()
            .map(|v| Filter::from_json(&decode_embedded("where", v)?))
            .transpose()?;

        // The persistence layer rejects include + select together; select wins.
        let projection = match (&raw.select, &raw.include) {
            (Some(select), _) => Some(Projection::select_from_json(&decode_embedded(
                "select", select,
            )?)?),
            (None, Some(include)) => Some(Projection::include_from_json(&decode_embedded(
                "include", include,
            )?)?),
            (None, None) => None,
        };

        let order_by = raw
            .order_by
            .as_ref()
            .map(parse_order_by)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            filter,
            projection,
            order_by,
            take: raw.take.as_ref().map(|v| coerce_integer("take", v)).transpose()?,
            skip: raw.skip.as_ref().map(|v| coerce_integer("skip", v)).transpose()?,
            get_count: raw
                .get_count
                .as_ref()
                .map(coerce_bool)
                .transpose()?
                .unwrap_or(false),
        })
    }

    /// Whether the soft-delete default must be added for `policy`.
    pub fn needs_soft_delete(&self, policy: DeletePolicy) -> bool {
        match policy.marker() {
            Some(marker) => !self
                .filter
                .as_ref()
                .is_some_and(|f| f.mentions_field(marker)),
            None => false,
        }
    }

    /// The filter actually sent to the store: the caller's filter, with
    /// `marker IS NULL` added when the caller did not mention the marker.
    pub fn effective_filter(&self, policy: DeletePolicy) -> Option<Filter> {
        if !self.needs_soft_delete(policy) {
            return self.filter.clone();
        }
        let marker = policy.marker()?;
        Some(match &self.filter {
            Some(filter) => filter.clone().and(Filter::is_null(marker)),
            None => Filter::is_null(marker),
        })
    }

    /// Apply the soft-delete default in place. Idempotent.
    pub fn with_soft_delete(mut self, policy: DeletePolicy) -> Self {
        self.filter = self.effective_filter(policy);
        self
    }
}

/// Normalize a raw query for an entity with the given delete policy.
pub fn normalize(raw: &RawQuery, policy: DeletePolicy) -> AppResult<QueryDescriptor> {
    Ok(QueryDescriptor::from_raw(raw)?.with_soft_delete(policy))
}

fn decode_json(key: &str, text: &str) -> AppResult<Value> {
    serde_json::from_str(text)
        .map_err(|e| AppError::invalid_query(format!("'{key}' is not valid JSON: {e}")))
}

/// Structured values may arrive JSON-encoded inside a string.
fn decode_embedded(key: &str, value: &Value) -> AppResult<Value> {
    match value {
        Value::String(text) => decode_json(key, text),
        other => Ok(other.clone()),
    }
}

fn parse_order_by(value: &Value) -> AppResult<Vec<SortField>> {
    match value {
        Value::String(text) if text.trim_start().starts_with(['{', '[']) => {
            SortField::list_from_json(&decode_json("orderBy", text)?)
        }
        // Query-string shorthand: `name` or `name:desc`, comma separated.
        Value::String(text) => text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|spec| match spec.split_once(':') {
                Some((field, dir)) => Ok(SortField::new(field, SortDirection::parse(dir)?)),
                None => Ok(SortField::asc(spec)),
            })
            .collect(),
        other => SortField::list_from_json(other),
    }
}

fn coerce_integer(key: &str, value: &Value) -> AppResult<u64> {
    let invalid = || {
        AppError::invalid_query(format!(
            "'{key}' must be a non-negative integer, got {value}"
        ))
    };
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn coerce_bool(value: &Value) -> AppResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(AppError::invalid_query(format!(
                "'getCount' must be a boolean, got '{s}'"
            ))),
        },
        Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
        other => Err(AppError::invalid_query(format!(
            "'getCount' must be a boolean, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::types::filter::FilterOp;

    fn raw(value: Value) -> RawQuery {
        serde_json::from_value(value).expect("raw query")
    }

    #[test]
    fn test_empty_query_injects_marker() {
        let q = normalize(&RawQuery::default(), DeletePolicy::SOFT).unwrap();
        assert_eq!(q.filter, Some(Filter::is_null("deletedAt")));
        assert!(!q.get_count);
        assert!(q.take.is_none());
    }

    #[test]
    fn test_hard_delete_entities_get_no_marker() {
        let q = normalize(&RawQuery::default(), DeletePolicy::Hard).unwrap();
        assert!(q.filter.is_none());
    }

    #[test]
    fn test_marker_added_alongside_caller_filter() {
        let q = normalize(&raw(json!({ "where": { "name": "Yoga" } })), DeletePolicy::SOFT)
            .unwrap();
        assert_eq!(
            q.filter,
            Some(Filter::And(vec![
                Filter::eq("name", "Yoga"),
                Filter::is_null("deletedAt"),
            ]))
        );
    }

    #[test]
    fn test_explicit_marker_preserved() {
        let q = normalize(
            &raw(json!({ "where": { "deletedAt": { "not": null } } })),
            DeletePolicy::SOFT,
        )
        .unwrap();
        assert_eq!(
            q.filter,
            Some(Filter::cond("deletedAt", FilterOp::Not, Value::Null))
        );
    }

    #[test]
    fn test_injection_is_idempotent() {
        let q = normalize(&RawQuery::default(), DeletePolicy::SOFT).unwrap();
        let again = q.clone().with_soft_delete(DeletePolicy::SOFT);
        assert_eq!(q, again);
    }

    #[test]
    fn test_select_wins_over_include() {
        let q = QueryDescriptor::from_raw(&raw(json!({
            "include": { "trail": true },
            "select": { "title": true }
        })))
        .unwrap();
        assert!(matches!(q.projection, Some(Projection::Select(_))));
    }

    #[test]
    fn test_take_skip_coercion() {
        let q = QueryDescriptor::from_raw(&raw(json!({ "take": "5", "skip": 10 }))).unwrap();
        assert_eq!(q.take, Some(5));
        assert_eq!(q.skip, Some(10));

        let float = QueryDescriptor::from_raw(&raw(json!({ "take": 3.0 }))).unwrap();
        assert_eq!(float.take, Some(3));
    }

    #[test]
    fn test_non_numeric_take_rejected() {
        for bad in [json!("ten"), json!(-1), json!(2.5), json!(true), json!("-3")] {
            let err = QueryDescriptor::from_raw(&raw(json!({ "take": bad }))).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidQuery);
        }
        let err = QueryDescriptor::from_raw(&raw(json!({ "skip": "x" }))).unwrap_err();
        assert!(err.message.contains("skip"));
    }

    #[test]
    fn test_get_count_coercion() {
        assert!(QueryDescriptor::from_raw(&raw(json!({ "getCount": "true" }))).unwrap().get_count);
        assert!(QueryDescriptor::from_raw(&raw(json!({ "getCount": 1 }))).unwrap().get_count);
        assert!(!QueryDescriptor::from_raw(&raw(json!({ "getCount": "0" }))).unwrap().get_count);
        assert!(QueryDescriptor::from_raw(&raw(json!({ "getCount": "maybe" }))).is_err());
    }

    #[test]
    fn test_from_query_string_pairs() {
        let raw = RawQuery::from_pairs([
            ("where", r#"{"role":"admin"}"#),
            ("take", "20"),
            ("orderBy", "createdAt:desc,name"),
            ("getCount", "true"),
            ("page", "2"),
        ])
        .unwrap();
        let q = QueryDescriptor::from_raw(&raw).unwrap();
        assert_eq!(q.filter, Some(Filter::eq("role", "admin")));
        assert_eq!(q.take, Some(20));
        assert_eq!(
            q.order_by,
            vec![SortField::desc("createdAt"), SortField::asc("name")]
        );
        assert!(q.get_count);
    }

    #[test]
    fn test_bad_json_in_query_string() {
        let err = RawQuery::from_pairs([("where", "{oops")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQuery);
    }

    #[test]
    fn test_where_as_embedded_string() {
        let q = QueryDescriptor::from_raw(&raw(json!({ "where": "{\"slug\":\"a\"}" }))).unwrap();
        assert_eq!(q.filter, Some(Filter::eq("slug", "a")));
    }
}

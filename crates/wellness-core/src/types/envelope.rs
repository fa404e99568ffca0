//! Result envelope of a paginated query.

use serde::{Deserialize, Serialize};

/// Either the bare page of records or the page plus the filtered total.
///
/// The total is computed with the same effective filter as the page but
/// without `skip`/`take`. The two reads are not wrapped in a transaction,
/// so the total may be approximate under concurrent mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResult<T> {
    /// Page plus total (`getCount: true`).
    Counted {
        /// The page.
        records: Vec<T>,
        /// Number of rows matching the filter.
        #[serde(rename = "totalCount")]
        total_count: u64,
    },
    /// Just the page.
    Records(Vec<T>),
}

impl<T> QueryResult<T> {
    /// The page of records.
    pub fn records(&self) -> &[T] {
        match self {
            Self::Counted { records, .. } | Self::Records(records) => records,
        }
    }

    /// Consume the envelope, keeping only the records.
    pub fn into_records(self) -> Vec<T> {
        match self {
            Self::Counted { records, .. } | Self::Records(records) => records,
        }
    }

    /// The filtered total, when it was requested.
    pub fn total_count(&self) -> Option<u64> {
        match self {
            Self::Counted { total_count, .. } => Some(*total_count),
            Self::Records(_) => None,
        }
    }

    /// Convert every record, keeping the envelope shape.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<QueryResult<U>, E> {
        Ok(match self {
            Self::Counted {
                records,
                total_count,
            } => QueryResult::Counted {
                records: records.into_iter().map(f).collect::<Result<_, _>>()?,
                total_count,
            },
            Self::Records(records) => {
                QueryResult::Records(records.into_iter().map(f).collect::<Result<_, _>>()?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialized_shapes() {
        let bare: QueryResult<i32> = QueryResult::Records(vec![1, 2]);
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!([1, 2]));

        let counted = QueryResult::Counted {
            records: vec![1],
            total_count: 7,
        };
        assert_eq!(
            serde_json::to_value(&counted).unwrap(),
            json!({ "records": [1], "totalCount": 7 })
        );
    }

    #[test]
    fn test_try_map_keeps_total() {
        let counted = QueryResult::Counted {
            records: vec!["1", "2"],
            total_count: 9,
        };
        let mapped = counted.try_map(|s| s.parse::<i32>()).unwrap();
        assert_eq!(mapped.records(), &[1, 2]);
        assert_eq!(mapped.total_count(), Some(9));
    }
}

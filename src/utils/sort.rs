//! Stable sort-by-derived-key utilities
//!
//! Every sort here derives one comparable key per element up front and then
//! runs a stable sort over it, so elements with equal keys always keep their
//! input order, in both directions.

use std::cmp::Ordering;

use serde_json::Value;

use crate::utils::strings::fold_case;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Natural ordering of a JSON scalar used as a sort key
///
/// Values of different kinds order as `Null < Bool < Number < Text < Composite`.
/// Numbers use total float ordering, text uses codepoint order. Arrays and
/// objects are compared by their serialized JSON text.
#[derive(Debug, Clone)]
pub enum SortValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Composite(String),
}

impl SortValue {
    /// Derive the sort key of a JSON value
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or_else(|| Self::Text(n.to_string()), Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Composite(value.to_string()),
        }
    }

    /// Lower-case textual keys for case-insensitive comparison
    #[must_use]
    pub fn folded(self) -> Self {
        match self {
            Self::Text(s) => Self::Text(fold_case(&s)),
            Self::Composite(s) => Self::Composite(fold_case(&s)),
            other => other,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
            Self::Composite(_) => 4,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) | (Self::Composite(a), Self::Composite(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}

/// Sort items by a derived key, renumbering positions
///
/// # Example
///
/// ```rust
/// use fl_helpers::utils::sort::{sort_by_derived_key, SortOrder};
///
/// let words = vec!["pear", "fig", "apple", "kiwi"];
/// let sorted = sort_by_derived_key(words, |w| w.len(), SortOrder::Ascending);
/// assert_eq!(sorted, vec!["fig", "pear", "kiwi", "apple"]);
/// ```
pub fn sort_by_derived_key<T, K, F>(items: Vec<T>, key_fn: F, order: SortOrder) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    sort_by_derived_key_indexed(items, key_fn, order)
        .into_iter()
        .map(|(_, item)| item)
        .collect()
}

/// Sort items by a derived key, pairing each item with its original position
pub fn sort_by_derived_key_indexed<T, K, F>(
    items: Vec<T>,
    key_fn: F,
    order: SortOrder,
) -> Vec<(usize, T)>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut keyed: Vec<(K, usize, T)> = items
        .into_iter()
        .enumerate()
        .map(|(position, item)| (key_fn(&item), position, item))
        .collect();

    keyed.sort_by(|a, b| match order {
        SortOrder::Ascending => a.0.cmp(&b.0),
        SortOrder::Descending => b.0.cmp(&a.0),
    });

    keyed
        .into_iter()
        .map(|(_, position, item)| (position, item))
        .collect()
}

/// Sort JSON records by a single field
///
/// Records lacking `key` sort as null; elements that are not objects sort by
/// their own value.
///
/// # Example
///
/// ```rust
/// use fl_helpers::utils::sort::{simple_sort, SortOrder};
/// use serde_json::json;
///
/// let people = vec![json!({"name": "bob"}), json!({"name": "Alice"})];
/// let sorted = simple_sort(people, "name", SortOrder::Ascending, false);
/// assert_eq!(sorted[0]["name"], "Alice");
/// ```
pub fn simple_sort(records: Vec<Value>, key: &str, order: SortOrder, case_sensitive: bool) -> Vec<Value> {
    sort_by_derived_key(
        records,
        |record| {
            let value = match record {
                Value::Object(map) => map.get(key).map_or(SortValue::Null, SortValue::from_json),
                other => SortValue::from_json(other),
            };
            if case_sensitive {
                value
            } else {
                value.folded()
            }
        },
        order,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stable_ascending() {
        let items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        let sorted = sort_by_derived_key(items, |(k, _)| *k, SortOrder::Ascending);
        assert_eq!(sorted, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_stable_descending_keeps_tie_order() {
        let items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        let sorted = sort_by_derived_key(items, |(k, _)| *k, SortOrder::Descending);
        assert_eq!(sorted, vec![(2, 'a'), (2, 'c'), (1, 'b'), (1, 'd')]);
    }

    #[test]
    fn test_indexed_keeps_original_positions() {
        let items = vec!["c", "a", "b"];
        let sorted = sort_by_derived_key_indexed(items, |s| s.to_string(), SortOrder::Ascending);
        assert_eq!(sorted, vec![(1, "a"), (2, "b"), (0, "c")]);
    }

    #[test]
    fn test_sort_value_ordering() {
        assert!(SortValue::Null < SortValue::Bool(false));
        assert!(SortValue::Bool(true) < SortValue::Number(-5.0));
        assert!(SortValue::Number(10.0) > SortValue::Number(9.5));
        assert!(SortValue::Number(1e9) < SortValue::Text(String::new()));
        assert!(SortValue::Text("Z".into()) < SortValue::Text("a".into()));
        assert_eq!(SortValue::Text("ab".into()).folded(), SortValue::Text("ab".into()));
        assert_eq!(SortValue::Text("AB".into()).folded(), SortValue::Text("ab".into()));
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let records = vec![json!({"n": 10}), json!({"n": 9}), json!({"n": 100})];
        let sorted = simple_sort(records, "n", SortOrder::Ascending, true);
        let ns: Vec<_> = sorted.iter().map(|r| r["n"].as_i64()).collect();
        assert_eq!(ns, vec![Some(9), Some(10), Some(100)]);
    }

    #[test]
    fn test_simple_sort_case_sensitivity() {
        let records = vec![
            json!({"name": "bob"}),
            json!({"name": "Carol"}),
            json!({"name": "alice"}),
        ];

        let sensitive = simple_sort(records.clone(), "name", SortOrder::Ascending, true);
        let names: Vec<_> = sensitive.iter().map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec![Some("Carol"), Some("alice"), Some("bob")]);

        let insensitive = simple_sort(records, "name", SortOrder::Ascending, false);
        let names: Vec<_> = insensitive.iter().map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec![Some("alice"), Some("bob"), Some("Carol")]);
    }

    #[test]
    fn test_simple_sort_missing_key_and_scalars() {
        let records = vec![json!({"name": "x"}), json!({}), json!("loose")];
        let sorted = simple_sort(records, "name", SortOrder::Ascending, true);
        assert_eq!(sorted, vec![json!({}), json!("loose"), json!({"name": "x"})]);

        let empty: Vec<Value> = vec![];
        assert!(simple_sort(empty, "name", SortOrder::Descending, true).is_empty());
    }
}

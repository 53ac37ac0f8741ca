//! Record list utilities
//!
//! `RecordList` wraps a `Vec` of JSON values and exposes positional access,
//! lookup by field value, de-duplication and the two sorts (flat by one
//! field, and tree sort). Modifiers take `&mut self` and return the list
//! again so calls chain.

use std::fmt;

use serde_json::Value;

use crate::error::{HelperError, Result};
use crate::tree::{TreeLinearizer, TreeSortOptions};
use crate::utils::number::NumberHelper;
use crate::utils::sort::{simple_sort, SortOrder};
use crate::utils::strings::StringHelper;

/// Fluent wrapper around a list of JSON records
///
/// # Example
///
/// ```rust
/// use fl_helpers::utils::{RecordList, SortOrder};
/// use serde_json::json;
///
/// let mut list = RecordList::new(vec![
///     json!({"name": "Tim", "age": 59}),
///     json!({"name": "Bob", "age": 20}),
///     json!({"name": "Tim", "age": 59}),
/// ]);
/// list.remove_duplicates().simple_sort("name", SortOrder::Ascending, true);
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.get(0)?["name"], "Bob");
/// # Ok::<(), fl_helpers::HelperError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordList {
    records: Vec<Value>,
}

impl RecordList {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Split `text` on `separator` into a list of strings
    pub fn from_string(separator: &str, text: &str) -> Self {
        let records = StringHelper::new(text)
            .to_list(separator)
            .into_iter()
            .map(Value::String)
            .collect();
        Self { records }
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.records
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.records.iter()
    }

    /// Element at `index`
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::IndexOutOfBounds`] past the end of the list.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.records.get(index).ok_or(HelperError::IndexOutOfBounds {
            index,
            len: self.records.len(),
        })
    }

    /// Replace the element at `index`
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::IndexOutOfBounds`] past the end of the list.
    pub fn set(&mut self, index: usize, value: Value) -> Result<&mut Self> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(HelperError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(self)
    }

    /// Remove and return the element at `index`, shifting later elements down
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::IndexOutOfBounds`] past the end of the list.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if index >= self.records.len() {
            return Err(HelperError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// A uniformly chosen element, `None` for an empty list
    pub fn random_member(&self) -> Option<&Value> {
        let last = self.records.len().checked_sub(1)?;
        let index = NumberHelper::new(0usize)
            .with_lower_limit(Some(0))
            .with_upper_limit(Some(last))
            .randomize()
            .value();
        self.records.get(index)
    }

    /// First record whose `key` field matches `value`
    ///
    /// Numbers and numeric strings match when they denote the same number.
    pub fn find_item_with_key(&self, key: &str, value: &Value) -> Option<&Value> {
        self.records
            .iter()
            .find(|record| field_matches(record, key, value))
    }

    /// Every record whose `key` field matches `value`, in list order
    pub fn find_all_with_key(&self, key: &str, value: &Value) -> Vec<&Value> {
        self.records
            .iter()
            .filter(|record| field_matches(record, key, value))
            .collect()
    }

    /// True when the record at `index` is an object holding every key in `keys`
    pub fn keys_exist<S: AsRef<str>>(&self, index: usize, keys: &[S]) -> bool {
        self.records
            .get(index)
            .and_then(Value::as_object)
            .is_some_and(|map| keys.iter().all(|key| map.contains_key(key.as_ref())))
    }

    /// Drop repeated elements, keeping the first occurrence of each
    pub fn remove_duplicates(&mut self) -> &mut Self {
        let mut kept: Vec<Value> = Vec::with_capacity(self.records.len());
        for record in self.records.drain(..) {
            if !kept.contains(&record) {
                kept.push(record);
            }
        }
        self.records = kept;
        self
    }

    /// Stable sort by one field
    pub fn simple_sort(&mut self, key: &str, order: SortOrder, case_sensitive: bool) -> &mut Self {
        let records = std::mem::take(&mut self.records);
        self.records = simple_sort(records, key, order, case_sensitive);
        self
    }

    /// Replace the contents with their tree-sorted linearization
    ///
    /// On error the list is left unchanged.
    ///
    /// # Errors
    ///
    /// See [`TreeLinearizer::linearize`].
    pub fn tree_sort(
        &mut self,
        id_field: &str,
        parent_field: &str,
        sort_field: &str,
        options: &TreeSortOptions,
    ) -> Result<&mut Self> {
        let sorted = TreeLinearizer::new(id_field, parent_field, sort_field)
            .with_options(options.clone())
            .linearize(&self.records)?;
        self.records = sorted;
        Ok(self)
    }
}

fn field_matches(record: &Value, key: &str, value: &Value) -> bool {
    record
        .as_object()
        .and_then(|map| map.get(key))
        .is_some_and(|found| loosely_equal(found, value))
}

fn loosely_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

impl fmt::Display for RecordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match record {
                Value::String(s) => f.write_str(s)?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

impl From<Vec<Value>> for RecordList {
    fn from(records: Vec<Value>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

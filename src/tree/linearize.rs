//! Tree linearization with nested-set numbering
//!
//! Turns a flat list of parent-referencing records into a pre-order
//! sequence. Every record is annotated with its depth, whether it has
//! children, nested-set `left` / `right` boundaries and the composite sort
//! path (`rootKey_rootId | ... | ownKey_ownId`) that orders it.
//!
//! The records are first indexed by id into an arena, parents are resolved
//! to arena slots, and sibling lists are ordered by sort key, then id.
//! A single depth-first walk with an explicit stack then emits pre-order and
//! assigns the boundary counters 1..=2N, so arbitrarily deep chains never
//! touch the call stack.
//!
//! # Example
//!
//! ```rust
//! use fl_helpers::tree::{linearize, TreeSortOptions};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"id": 2, "parentid": 1, "name": "child"}),
//!     json!({"id": 1, "parentid": null, "name": "root"}),
//! ];
//! let sorted = linearize(&records, "id", "parentid", "name", &TreeSortOptions::default())?;
//! assert_eq!(sorted[0]["id"], 1);
//! assert_eq!(sorted[1]["__depth"], 1);
//! assert_eq!(sorted[0]["__right"], 4);
//! # Ok::<(), fl_helpers::HelperError>(())
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{HelperError, Result};
use crate::tree::options::TreeSortOptions;
use crate::utils::sort::{sort_by_derived_key, SortOrder};
use crate::utils::strings::{fold_case, is_numeric};

/// Separator between the segments of a composite sort path
pub const PATH_SEPARATOR: &str = " | ";

/// One linearized record with its derived tree data
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEntry {
    /// The input record, without derived fields added
    pub record: Map<String, Value>,
    /// Canonical text form of the record's id
    pub id: String,
    /// Canonical id of the resolved parent; `None` for roots
    pub parent: Option<String>,
    pub depth: usize,
    pub has_children: bool,
    pub left: usize,
    pub right: usize,
    pub sort_path: String,
}

impl TreeEntry {
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True when `other` lies inside this entry's subtree
    pub const fn contains(&self, other: &Self) -> bool {
        self.left < other.left && other.right < self.right
    }

    /// Number of records below this one
    pub const fn descendant_count(&self) -> usize {
        self.right.saturating_sub(self.left).saturating_sub(1) / 2
    }
}

/// Arena slot for one input record
struct Node {
    record: Map<String, Value>,
    id: String,
    parent_key: Option<String>,
    /// Sort key text, case-folded when sorting case-insensitively
    key: String,
    segment: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Pre-order visit produced by the depth-first walk
struct Visit {
    slot: usize,
    depth: usize,
    left: usize,
    right: usize,
    sort_path: String,
}

/// Sorts flat parent-referencing records into annotated pre-order
#[derive(Debug, Clone)]
pub struct TreeLinearizer {
    id_field: String,
    parent_field: String,
    sort_field: String,
    options: TreeSortOptions,
}

impl TreeLinearizer {
    /// Create a linearizer over the given field selectors with default options
    pub fn new<I, P, S>(id_field: I, parent_field: P, sort_field: S) -> Self
    where
        I: Into<String>,
        P: Into<String>,
        S: Into<String>,
    {
        Self {
            id_field: id_field.into(),
            parent_field: parent_field.into(),
            sort_field: sort_field.into(),
            options: TreeSortOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TreeSortOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn options(&self) -> &TreeSortOptions {
        &self.options
    }

    /// Linearize `records` and write the enabled derived fields into copies
    ///
    /// # Errors
    ///
    /// * [`HelperError::ConfigurationError`] if a derived field name is
    ///   invalid or collides with one of the field selectors
    /// * any error of [`TreeLinearizer::linearize_entries`]
    pub fn linearize(&self, records: &[Value]) -> Result<Vec<Value>> {
        self.options.validate_against(&[
            self.id_field.as_str(),
            self.parent_field.as_str(),
            self.sort_field.as_str(),
        ])?;

        let entries = self.linearize_entries(records)?;
        Ok(entries
            .into_iter()
            .map(|entry| Value::Object(self.annotate(entry)))
            .collect())
    }

    /// Linearize `records` into typed entries
    ///
    /// A record whose parent is null, false, an empty string, a number <= 0,
    /// its own id, or an id not present in the input is a root. Records that
    /// sit on a parent cycle are promoted to roots as well. When two records
    /// share an id the later one replaces the earlier.
    ///
    /// # Errors
    ///
    /// * [`HelperError::NotARecord`] if an element is not a JSON object
    /// * [`HelperError::MissingField`] if a record lacks the id, parent or sort field
    /// * [`HelperError::InvalidId`] if an id is neither a string nor a number
    pub fn linearize_entries(&self, records: &[Value]) -> Result<Vec<TreeEntry>> {
        debug!("Linearizing {} records", records.len());
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut nodes = self.collect_nodes(records)?;
        let by_id: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.id.as_str(), slot))
            .collect();
        let resolved: Vec<Option<usize>> = nodes
            .iter()
            .map(|node| resolve_parent(node, &by_id))
            .collect();
        drop(by_id);
        for (node, parent) in nodes.iter_mut().zip(resolved) {
            node.parent = parent;
        }

        break_cycles(&mut nodes);
        let roots = link_children(&mut nodes);
        let visits = walk(&nodes, &roots);
        debug_assert_eq!(visits.len(), nodes.len());

        let parent_ids: Vec<Option<String>> = nodes
            .iter()
            .map(|node| node.parent.map(|p| nodes[p].id.clone()))
            .collect();

        let entries = visits
            .into_iter()
            .map(|visit| {
                let node = &mut nodes[visit.slot];
                TreeEntry {
                    record: std::mem::take(&mut node.record),
                    id: std::mem::take(&mut node.id),
                    parent: parent_ids[visit.slot].clone(),
                    depth: visit.depth,
                    has_children: !node.children.is_empty(),
                    left: visit.left,
                    right: visit.right,
                    sort_path: visit.sort_path,
                }
            })
            .collect();

        Ok(entries)
    }

    /// Validate every record and index it by id, last duplicate winning
    fn collect_nodes(&self, records: &[Value]) -> Result<Vec<Node>> {
        let mut nodes: Vec<Node> = Vec::with_capacity(records.len());
        let mut slots: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for (index, value) in records.iter().enumerate() {
            let record = value.as_object().ok_or(HelperError::NotARecord { index })?;
            let id_value = required(record, &self.id_field, index)?;
            // An absent parent field is an error; only an explicit null-like value marks a root
            let parent_value = required(record, &self.parent_field, index)?;
            let sort_value = required(record, &self.sort_field, index)?;

            let id = id_key(id_value).ok_or_else(|| HelperError::InvalidId {
                field: self.id_field.clone(),
                index,
            })?;
            let segment = format!("{}_{}", key_text(sort_value), id);
            let (key, segment) = if self.options.case_sensitive {
                (key_text(sort_value), segment)
            } else {
                (fold_case(&key_text(sort_value)), fold_case(&segment))
            };

            let node = Node {
                record: record.clone(),
                parent_key: parent_key(parent_value),
                id,
                key,
                segment,
                parent: None,
                children: Vec::new(),
            };

            if let Some(&slot) = slots.get(&node.id) {
                warn!("Duplicate id '{}' at record {}, replacing the earlier record", node.id, index);
                nodes[slot] = node;
            } else {
                slots.insert(node.id.clone(), nodes.len());
                nodes.push(node);
            }
        }

        Ok(nodes)
    }

    fn annotate(&self, entry: TreeEntry) -> Map<String, Value> {
        let opts = &self.options;
        let mut record = entry.record;
        if opts.add_depth_field {
            record.insert(opts.depth_field_name.clone(), Value::from(entry.depth));
        }
        if opts.add_has_children_field {
            record.insert(opts.has_children_field_name.clone(), Value::Bool(entry.has_children));
        }
        if opts.add_left_right_fields {
            record.insert(opts.left_field_name.clone(), Value::from(entry.left));
            record.insert(opts.right_field_name.clone(), Value::from(entry.right));
        }
        if opts.add_sort_path_field {
            record.insert(opts.sort_path_field_name.clone(), Value::String(entry.sort_path));
        }
        record
    }
}

/// Linearize `records` with the given field selectors and options
///
/// # Errors
///
/// See [`TreeLinearizer::linearize`].
pub fn linearize(
    records: &[Value],
    id_field: &str,
    parent_field: &str,
    sort_field: &str,
    options: &TreeSortOptions,
) -> Result<Vec<Value>> {
    TreeLinearizer::new(id_field, parent_field, sort_field)
        .with_options(options.clone())
        .linearize(records)
}

fn required<'a>(record: &'a Map<String, Value>, field: &str, index: usize) -> Result<&'a Value> {
    record
        .get(field)
        .ok_or_else(|| HelperError::missing_field(field, index))
}

/// Largest magnitude at which every integer is exactly representable as f64
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Integer text of an integral float, `None` for fractions and huge values
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral_text(v: f64) -> Option<String> {
    (v.is_finite() && v.trunc() == v && v.abs() <= MAX_EXACT_FLOAT).then(|| (v as i64).to_string())
}

/// Canonical text of a JSON number: integral values lose any fraction or exponent
fn number_key(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().and_then(integral_text).unwrap_or_else(|| n.to_string())
}

/// Canonical text of a string key: numeric strings are trimmed and integral ones normalized
fn string_key(s: &str) -> String {
    if !is_numeric(s) {
        return s.to_string();
    }
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return i.to_string();
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(integral_text)
        .unwrap_or_else(|| trimmed.to_string())
}

/// Canonical lookup key of an id value
fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(string_key(s)),
        Value::Number(n) => Some(number_key(n)),
        _ => None,
    }
}

/// Canonical key of a parent reference, `None` when it marks a root
fn parent_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.as_f64().is_some_and(|v| v > 0.0) => Some(number_key(n)),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) if is_numeric(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| *v > 0.0)
            .map(|_| string_key(s)),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Text of a sort value as it appears in the composite path
fn key_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn resolve_parent(node: &Node, by_id: &HashMap<&str, usize>) -> Option<usize> {
    let key = node.parent_key.as_deref()?;
    if key == node.id {
        debug!("Record '{}' references itself as parent, treating it as a root", node.id);
        return None;
    }
    let slot = by_id.get(key).copied();
    if slot.is_none() {
        debug!("Parent '{}' of record '{}' not found, treating it as a root", key, node.id);
    }
    slot
}

/// Promote every record that lies on a parent cycle to a root
fn break_cycles(nodes: &mut [Node]) {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum State {
        Unvisited,
        OnPath,
        Done,
    }

    let mut state = vec![State::Unvisited; nodes.len()];
    let mut on_cycle = vec![false; nodes.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..nodes.len() {
        if state[start] != State::Unvisited {
            continue;
        }
        path.clear();
        let mut cursor = Some(start);
        while let Some(current) = cursor {
            match state[current] {
                State::Done => break,
                State::OnPath => {
                    // The walk came back to itself: everything from `current` on is the loop
                    let from = path.iter().position(|&slot| slot == current).unwrap_or(0);
                    for &member in &path[from..] {
                        on_cycle[member] = true;
                    }
                    break;
                }
                State::Unvisited => {
                    state[current] = State::OnPath;
                    path.push(current);
                    cursor = nodes[current].parent;
                }
            }
        }
        for &slot in &path {
            state[slot] = State::Done;
        }
    }

    for (node, flagged) in nodes.iter_mut().zip(on_cycle) {
        if flagged {
            warn!("Record '{}' is part of a parent cycle, treating it as a root", node.id);
            node.parent = None;
        }
    }
}

/// Fill sibling lists ordered by (sort key, id); returns the ordered roots
fn link_children(nodes: &mut [Node]) -> Vec<usize> {
    let mut roots = Vec::new();
    for slot in 0..nodes.len() {
        let parent = nodes[slot].parent;
        match parent {
            Some(p) => nodes[p].children.push(slot),
            None => roots.push(slot),
        }
    }

    for slot in 0..nodes.len() {
        let children = std::mem::take(&mut nodes[slot].children);
        let ordered = sort_by_derived_key(children, |&c| sibling_key(&nodes[c]), SortOrder::Ascending);
        nodes[slot].children = ordered;
    }

    sort_by_derived_key(roots, |&r| sibling_key(&nodes[r]), SortOrder::Ascending)
}

fn sibling_key(node: &Node) -> (String, String) {
    (node.key.clone(), node.id.clone())
}

/// Depth-first walk assigning pre-order position and nested-set counters
fn walk(nodes: &[Node], roots: &[usize]) -> Vec<Visit> {
    let mut visits: Vec<Visit> = Vec::with_capacity(nodes.len());
    // (visit index, next child to descend into)
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut counter = 0;

    for &root in roots {
        counter += 1;
        visits.push(Visit {
            slot: root,
            depth: 0,
            left: counter,
            right: 0,
            sort_path: nodes[root].segment.clone(),
        });
        stack.push((visits.len() - 1, 0));

        while let Some(top) = stack.last_mut() {
            let (pos, next_child) = *top;
            let slot = visits[pos].slot;
            if let Some(&child) = nodes[slot].children.get(next_child) {
                top.1 += 1;
                counter += 1;
                let sort_path = format!("{}{}{}", visits[pos].sort_path, PATH_SEPARATOR, nodes[child].segment);
                let depth = visits[pos].depth + 1;
                visits.push(Visit {
                    slot: child,
                    depth,
                    left: counter,
                    right: 0,
                    sort_path,
                });
                stack.push((visits.len() - 1, 0));
            } else {
                counter += 1;
                visits[pos].right = counter;
                stack.pop();
            }
        }
    }

    visits
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn family() -> Vec<Value> {
        vec![
            json!({"id": 10, "parentid": null, "firstname": "Patrick"}),
            json!({"id": 11, "parentid": 10, "firstname": "Sandra"}),
            json!({"id": 12, "parentid": 10, "firstname": "Timmy"}),
            json!({"id": 13, "parentid": 12, "firstname": "Bobby"}),
            json!({"id": 14, "parentid": 12, "firstname": "Shania"}),
            json!({"id": 15, "parentid": 11, "firstname": "Ryan"}),
        ]
    }

    fn ids(entries: &[TreeEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_family_order_and_boundaries() {
        let entries = TreeLinearizer::new("id", "parentid", "firstname")
            .linearize_entries(&family())
            .unwrap();

        assert_eq!(ids(&entries), vec!["10", "11", "15", "12", "13", "14"]);
        let depths: Vec<_> = entries.iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 2, 2]);
        let bounds: Vec<_> = entries.iter().map(|e| (e.left, e.right)).collect();
        assert_eq!(bounds, vec![(1, 12), (2, 5), (3, 4), (6, 11), (7, 8), (9, 10)]);
        let has_children: Vec<_> = entries.iter().map(|e| e.has_children).collect();
        assert_eq!(has_children, vec![true, true, false, true, false, false]);
        assert_eq!(entries[2].sort_path, "Patrick_10 | Sandra_11 | Ryan_15");
        assert_eq!(entries[2].parent.as_deref(), Some("11"));
    }

    #[test]
    fn test_entry_helpers() {
        let entries = TreeLinearizer::new("id", "parentid", "firstname")
            .linearize_entries(&family())
            .unwrap();
        let root = &entries[0];
        assert!(root.is_root());
        assert_eq!(root.descendant_count(), 5);
        assert!(root.contains(&entries[4]));
        assert!(!entries[1].contains(&entries[4]));
        assert!(!entries[4].contains(root));
        assert_eq!(entries[5].descendant_count(), 0);
    }

    #[test]
    fn test_empty_input() {
        let out = linearize(&[], "id", "parentid", "name", &TreeSortOptions::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_root() {
        let out = linearize(
            &[json!({"id": 1, "parentid": 0, "name": "only"})],
            "id",
            "parentid",
            "name",
            &TreeSortOptions::default(),
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["__depth"], 0);
        assert_eq!(out[0]["__left"], 1);
        assert_eq!(out[0]["__right"], 2);
        assert_eq!(out[0]["__haschildren"], false);
        assert_eq!(out[0]["__sortfield"], "only_1");
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let linearizer = TreeLinearizer::new("id", "parentid", "name");

        let err = linearizer
            .linearize_entries(&[json!({"id": 1, "parentid": null, "name": "a"}), json!({"parentid": 1, "name": "b"})])
            .unwrap_err();
        assert_eq!(err, HelperError::missing_field("id", 1));

        let err = linearizer.linearize_entries(&[json!({"id": 1, "name": "a"})]).unwrap_err();
        assert_eq!(err, HelperError::missing_field("parentid", 0));

        let err = linearizer.linearize_entries(&[json!({"id": 1, "parentid": null})]).unwrap_err();
        assert_eq!(err, HelperError::missing_field("name", 0));
    }

    #[test]
    fn test_invalid_elements() {
        let linearizer = TreeLinearizer::new("id", "parentid", "name");
        let err = linearizer.linearize_entries(&[json!([1, 2])]).unwrap_err();
        assert_eq!(err, HelperError::NotARecord { index: 0 });

        let err = linearizer
            .linearize_entries(&[json!({"id": {"nested": true}, "parentid": null, "name": "a"})])
            .unwrap_err();
        assert!(matches!(err, HelperError::InvalidId { index: 0, .. }));
    }

    #[test]
    fn test_root_markers() {
        for marker in [json!(null), json!(0), json!(-3), json!(""), json!("0"), json!(false)] {
            let records = vec![
                json!({"id": 1, "parentid": null, "name": "a"}),
                json!({"id": 2, "parentid": marker, "name": "b"}),
            ];
            let entries = TreeLinearizer::new("id", "parentid", "name")
                .linearize_entries(&records)
                .unwrap();
            assert!(entries.iter().all(TreeEntry::is_root), "marker {marker} should make a root");
        }
    }

    #[test]
    fn test_string_ids_and_numeric_string_parents() {
        let records = vec![
            json!({"id": "docs", "parentid": null, "name": "Docs"}),
            json!({"id": "guide", "parentid": "docs", "name": "Guide"}),
            json!({"id": 7, "parentid": "guide", "name": "Page"}),
            json!({"id": 8, "parentid": "7", "name": "Section"}),
        ];
        let entries = TreeLinearizer::new("id", "parentid", "name")
            .linearize_entries(&records)
            .unwrap();
        let depths: Vec<_> = entries.iter().map(|e| e.depth).collect();
        assert_eq!(ids(&entries), vec!["docs", "guide", "7", "8"]);
        assert_eq!(depths, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_self_parent_and_orphan_become_roots() {
        let records = vec![
            json!({"id": 1, "parentid": 1, "name": "b"}),
            json!({"id": 2, "parentid": 99, "name": "a"}),
        ];
        let entries = TreeLinearizer::new("id", "parentid", "name")
            .linearize_entries(&records)
            .unwrap();
        assert_eq!(ids(&entries), vec!["2", "1"]);
        assert!(entries.iter().all(|e| e.depth == 0 && e.is_root()));
        assert_eq!((entries[0].left, entries[0].right), (1, 2));
        assert_eq!((entries[1].left, entries[1].right), (3, 4));
    }

    #[test]
    fn test_cycle_members_become_roots() {
        let records = vec![
            json!({"id": 1, "parentid": 2, "name": "a"}),
            json!({"id": 2, "parentid": 1, "name": "b"}),
            json!({"id": 3, "parentid": 1, "name": "c"}),
        ];
        let entries = TreeLinearizer::new("id", "parentid", "name")
            .linearize_entries(&records)
            .unwrap();
        assert_eq!(ids(&entries), vec!["1", "3", "2"]);
        let depths: Vec<_> = entries.iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![0, 1, 0]);
        assert!(entries[0].has_children);
        assert!(!entries[2].has_children);
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let records = vec![
            json!({"id": 1, "parentid": null, "name": "first"}),
            json!({"id": 2, "parentid": 1, "name": "child"}),
            json!({"id": 1, "parentid": null, "name": "second"}),
        ];
        let entries = TreeLinearizer::new("id", "parentid", "name")
            .linearize_entries(&records)
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].record["name"], "second");
        assert_eq!(entries[1].depth, 1);
    }

    #[test]
    fn test_case_insensitive_path() {
        let opts = TreeSortOptions::builder().case_sensitive(false).build().unwrap();
        let records = vec![
            json!({"id": 1, "parentid": null, "name": "Root"}),
            json!({"id": 2, "parentid": 1, "name": "beta"}),
            json!({"id": 3, "parentid": 1, "name": "Alpha"}),
        ];
        let out = linearize(&records, "id", "parentid", "name", &opts).unwrap();
        let order: Vec<_> = out.iter().map(|r| r["id"].as_i64()).collect();
        assert_eq!(order, vec![Some(1), Some(3), Some(2)]);
        assert_eq!(out[1]["__sortfield"], "root_1 | alpha_3");
        // Original values are untouched
        assert_eq!(out[1]["name"], "Alpha");
    }

    #[test]
    fn test_disabled_and_renamed_fields() {
        let opts = TreeSortOptions::builder()
            .depth_field("level")
            .has_children(false)
            .left_right_fields(false)
            .sort_path(false)
            .build()
            .unwrap();
        let out = linearize(&family(), "id", "parentid", "firstname", &opts).unwrap();
        for record in &out {
            let map = record.as_object().unwrap();
            assert!(map.contains_key("level"));
            assert!(!map.contains_key("__depth"));
            assert!(!map.contains_key("__haschildren"));
            assert!(!map.contains_key("__left"));
            assert!(!map.contains_key("__sortfield"));
        }
    }

    #[test]
    fn test_selector_collision_rejected() {
        let opts = TreeSortOptions::builder().depth_field("firstname").build().unwrap();
        let err = linearize(&family(), "id", "parentid", "firstname", &opts).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_descendant_count_of_degenerate_entry() {
        let entry = TreeEntry {
            record: Map::new(),
            id: "1".to_string(),
            parent: None,
            depth: 0,
            has_children: false,
            left: 3,
            right: 3,
            sort_path: String::new(),
        };
        assert_eq!(entry.descendant_count(), 0);
    }

    #[test]
    fn test_numerically_equal_parents_resolve() {
        let records = vec![
            json!({"id": 1, "parentid": null, "name": "root"}),
            json!({"id": 2, "parentid": 1.0, "name": "float"}),
            json!({"id": 3, "parentid": " 1", "name": "padded"}),
            json!({"id": "4", "parentid": "1.0", "name": "text"}),
            json!({"id": 5.0, "parentid": " 4 ", "name": "nested"}),
        ];
        let entries = TreeLinearizer::new("id", "parentid", "name")
            .linearize_entries(&records)
            .unwrap();

        assert_eq!(ids(&entries), vec!["1", "2", "3", "4", "5"]);
        let by_id: HashMap<&str, &TreeEntry> = entries.iter().map(|e| (e.id.as_str(), e)).collect();
        for child in ["2", "3", "4"] {
            assert_eq!(by_id[child].parent.as_deref(), Some("1"), "record {child}");
            assert_eq!(by_id[child].depth, 1);
        }
        assert_eq!(by_id["5"].parent.as_deref(), Some("4"));
        assert_eq!(by_id["5"].depth, 2);
        assert_eq!(entries[0].descendant_count(), 4);
    }

    #[test]
    fn test_prefix_key_sorts_before_longer_sibling() {
        let records = vec![
            json!({"id": 1, "parentid": null, "name": "root"}),
            json!({"id": 2, "parentid": 1, "name": "ANN"}),
            json!({"id": 3, "parentid": 1, "name": "ANNA"}),
            json!({"id": 4, "parentid": 1, "name": "AN_"}),
        ];
        let entries = TreeLinearizer::new("id", "parentid", "name")
            .linearize_entries(&records)
            .unwrap();
        assert_eq!(ids(&entries), vec!["1", "2", "3", "4"]);
        // The exposed path keeps the key_id segments
        assert_eq!(entries[1].sort_path, "root_1 | ANN_2");
        assert_eq!(entries[2].sort_path, "root_1 | ANNA_3");
    }

    #[test]
    fn test_equal_keys_tie_on_id() {
        let records = vec![
            json!({"id": "b", "parentid": null, "name": "same"}),
            json!({"id": "a", "parentid": null, "name": "same"}),
        ];
        let entries = TreeLinearizer::new("id", "parentid", "name")
            .linearize_entries(&records)
            .unwrap();
        assert_eq!(ids(&entries), vec!["a", "b"]);
    }

    #[test]
    fn test_deep_chain() {
        let n: usize = 2_000;
        let records: Vec<Value> = (1..=n)
            .map(|i| json!({"id": i, "parentid": i - 1, "name": "n"}))
            .collect();
        let entries = TreeLinearizer::new("id", "parentid", "name")
            .linearize_entries(&records)
            .unwrap();

        assert_eq!(entries.len(), n);
        assert_eq!((entries[0].left, entries[0].right), (1, 2 * n));
        let last = &entries[n - 1];
        assert_eq!(last.depth, n - 1);
        assert_eq!((last.left, last.right), (n, n + 1));
        assert_eq!(entries[0].descendant_count(), n - 1);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = family();
        let before = input.clone();
        let _ = linearize(&input, "id", "parentid", "firstname", &TreeSortOptions::default()).unwrap();
        assert_eq!(input, before);
    }
}

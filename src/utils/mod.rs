//! Utility modules
//!
//! Fluent helpers over strings, numbers and record lists, plus the stable
//! key sort the tree linearizer is built on.

pub mod array;
pub mod number;
pub mod sort;
pub mod strings;

// Re-export commonly used utilities
pub use array::RecordList;
pub use number::NumberHelper;
pub use sort::{simple_sort, sort_by_derived_key, sort_by_derived_key_indexed, SortOrder, SortValue};
pub use strings::{fold_case, is_numeric, trim_string, StringHelper};

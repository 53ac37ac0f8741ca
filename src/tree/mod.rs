//! Tree sorting of flat parent-referencing records
//!
//! [`TreeLinearizer`] orders records in pre-order and annotates them with
//! depth, a has-children flag, nested-set boundaries and the composite sort
//! path. [`TreeSortOptions`] selects which of those are written back into
//! the records and under what names.

pub mod linearize;
pub mod options;

pub use linearize::{linearize, TreeEntry, TreeLinearizer, PATH_SEPARATOR};
pub use options::{TreeSortOptions, TreeSortOptionsBuilder};

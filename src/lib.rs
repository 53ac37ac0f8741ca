//! FL Helpers
//!
//! Fluent helper wrappers over strings, numbers and JSON record lists, built
//! around a tree sort that turns flat parent-referencing records into an
//! annotated pre-order sequence.
//!
//! # Features
//!
//! - **Tree sort**: pre-order linearization with depth, has-children flags,
//!   nested-set `left` / `right` boundaries and composite sort paths
//! - **Stable key sort**: sort anything by a derived key, ties keep input order
//! - **StringHelper**: chainable string modifiers and checkers
//! - **NumberHelper**: a number with optional limits, flip and randomize
//! - **RecordList**: positional access, lookup and sorting over JSON records
//!
//! # Quick Start
//!
//! ```rust
//! use fl_helpers::{TreeLinearizer, TreeSortOptions};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"id": 10, "parentid": null, "firstname": "Patrick"}),
//!     json!({"id": 12, "parentid": 10, "firstname": "Timmy"}),
//!     json!({"id": 11, "parentid": 10, "firstname": "Sandra"}),
//! ];
//!
//! let options = TreeSortOptions::builder().case_sensitive(false).build()?;
//! let sorted = TreeLinearizer::new("id", "parentid", "firstname")
//!     .with_options(options)
//!     .linearize(&records)?;
//!
//! assert_eq!(sorted[1]["firstname"], "Sandra");
//! assert_eq!(sorted[1]["__sortfield"], "patrick_10 | sandra_11");
//! # Ok::<(), fl_helpers::HelperError>(())
//! ```

/// Library version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod tree;
pub mod utils;

// Re-exports for convenience
pub use error::{HelperError, Result};
pub use tree::{linearize, TreeEntry, TreeLinearizer, TreeSortOptions, TreeSortOptionsBuilder};
pub use utils::{NumberHelper, RecordList, SortOrder, StringHelper};

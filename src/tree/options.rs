//! Options for tree sorting
//!
//! `TreeSortOptions` controls which derived fields are written into each
//! linearized record and how sibling sort keys compare. It can be built in
//! code with [`TreeSortOptions::builder`] or deserialized from JSON:
//!
//! ```rust
//! use fl_helpers::tree::TreeSortOptions;
//!
//! let opts = TreeSortOptions::builder()
//!     .depth_field("level")
//!     .left_right_fields(false)
//!     .case_sensitive(false)
//!     .build()?;
//! assert_eq!(opts.depth_field_name, "level");
//!
//! let from_json: TreeSortOptions =
//!     serde_json::from_str(r#"{"addHasChildrenField": false, "caseSensitive": false}"#)?;
//! assert!(!from_json.add_has_children_field);
//! assert_eq!(from_json.left_field_name, "__left");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{HelperError, Result};

pub const DEFAULT_DEPTH_FIELD: &str = "__depth";
pub const DEFAULT_HAS_CHILDREN_FIELD: &str = "__haschildren";
pub const DEFAULT_LEFT_FIELD: &str = "__left";
pub const DEFAULT_RIGHT_FIELD: &str = "__right";
pub const DEFAULT_SORT_PATH_FIELD: &str = "__sortfield";

/// Derived-field and comparison options for tree sorting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeSortOptions {
    pub add_depth_field: bool,
    pub depth_field_name: String,
    pub add_has_children_field: bool,
    pub has_children_field_name: String,
    pub add_left_right_fields: bool,
    pub left_field_name: String,
    pub right_field_name: String,
    /// Write the composite sort path into each record
    pub add_sort_path_field: bool,
    pub sort_path_field_name: String,
    /// Compare sort keys case-sensitively
    pub case_sensitive: bool,
}

impl Default for TreeSortOptions {
    fn default() -> Self {
        Self {
            add_depth_field: true,
            depth_field_name: DEFAULT_DEPTH_FIELD.to_string(),
            add_has_children_field: true,
            has_children_field_name: DEFAULT_HAS_CHILDREN_FIELD.to_string(),
            add_left_right_fields: true,
            left_field_name: DEFAULT_LEFT_FIELD.to_string(),
            right_field_name: DEFAULT_RIGHT_FIELD.to_string(),
            add_sort_path_field: true,
            sort_path_field_name: DEFAULT_SORT_PATH_FIELD.to_string(),
            case_sensitive: true,
        }
    }
}

impl TreeSortOptions {
    pub fn builder() -> TreeSortOptionsBuilder {
        TreeSortOptionsBuilder::new()
    }

    /// Names of the derived fields that will be written, in write order
    pub fn enabled_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(5);
        if self.add_depth_field {
            fields.push(self.depth_field_name.as_str());
        }
        if self.add_has_children_field {
            fields.push(self.has_children_field_name.as_str());
        }
        if self.add_left_right_fields {
            fields.push(self.left_field_name.as_str());
            fields.push(self.right_field_name.as_str());
        }
        if self.add_sort_path_field {
            fields.push(self.sort_path_field_name.as_str());
        }
        fields
    }

    /// Check field names for emptiness and collisions
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::ConfigurationError`] when an enabled derived
    /// field name is empty or used twice.
    pub fn validate(&self) -> Result<()> {
        let fields = self.enabled_fields();
        for (i, name) in fields.iter().enumerate() {
            if name.is_empty() {
                return Err(HelperError::ConfigurationError(
                    "derived field names must not be empty".to_string(),
                ));
            }
            if fields[..i].contains(name) {
                return Err(HelperError::ConfigurationError(format!(
                    "derived field name '{name}' is used more than once"
                )));
            }
        }
        Ok(())
    }

    /// Check that no derived field would overwrite one of the input selectors
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::ConfigurationError`] on a collision.
    pub fn validate_against(&self, selectors: &[&str]) -> Result<()> {
        self.validate()?;
        if let Some(name) = self
            .enabled_fields()
            .into_iter()
            .find(|name| selectors.contains(name))
        {
            return Err(HelperError::ConfigurationError(format!(
                "derived field '{name}' collides with an input field selector"
            )));
        }
        Ok(())
    }
}

/// Builder for [`TreeSortOptions`]
#[derive(Debug, Clone, Default)]
pub struct TreeSortOptionsBuilder {
    options: TreeSortOptions,
}

impl TreeSortOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the depth field
    #[must_use]
    pub fn depth(mut self, enabled: bool) -> Self {
        self.options.add_depth_field = enabled;
        self
    }

    /// Enable the depth field under a custom name
    #[must_use]
    pub fn depth_field<S: Into<String>>(mut self, name: S) -> Self {
        self.options.add_depth_field = true;
        self.options.depth_field_name = name.into();
        self
    }

    #[must_use]
    pub fn has_children(mut self, enabled: bool) -> Self {
        self.options.add_has_children_field = enabled;
        self
    }

    #[must_use]
    pub fn has_children_field<S: Into<String>>(mut self, name: S) -> Self {
        self.options.add_has_children_field = true;
        self.options.has_children_field_name = name.into();
        self
    }

    #[must_use]
    pub fn left_right_fields(mut self, enabled: bool) -> Self {
        self.options.add_left_right_fields = enabled;
        self
    }

    /// Enable nested-set boundaries under custom names
    #[must_use]
    pub fn left_right_field_names<L: Into<String>, R: Into<String>>(mut self, left: L, right: R) -> Self {
        self.options.add_left_right_fields = true;
        self.options.left_field_name = left.into();
        self.options.right_field_name = right.into();
        self
    }

    #[must_use]
    pub fn sort_path(mut self, enabled: bool) -> Self {
        self.options.add_sort_path_field = enabled;
        self
    }

    #[must_use]
    pub fn sort_path_field<S: Into<String>>(mut self, name: S) -> Self {
        self.options.add_sort_path_field = true;
        self.options.sort_path_field_name = name.into();
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.options.case_sensitive = enabled;
        self
    }

    /// Validate and return the options
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::ConfigurationError`] for empty or duplicated
    /// derived field names.
    pub fn build(self) -> Result<TreeSortOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}

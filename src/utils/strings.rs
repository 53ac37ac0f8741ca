//! String utility functions
//!
//! `StringHelper` is a fluent wrapper around an owned `String`. Modifiers
//! consume the helper and hand it back so calls chain; checkers borrow it.
//! The free functions at the bottom are the normalizations other modules
//! (sorting, tree linearization) rely on.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::number::NumberHelper;

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Fluent string wrapper
///
/// # Example
///
/// ```rust
/// use fl_helpers::utils::StringHelper;
///
/// let s = StringHelper::new("  Hello    World ")
///     .remove_excessive_whitespace()
///     .to_lower()
///     .remove_from_start(" ")
///     .into_string();
/// assert_eq!(s, "hello world ");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringHelper {
    value: String,
}

impl StringHelper {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self { value: value.into() }
    }

    /// Build a helper by joining `parts` with `separator`
    pub fn from_parts<S: AsRef<str>>(separator: &str, parts: &[S]) -> Self {
        let joined = parts
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(separator);
        Self::new(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Length in characters, not bytes
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Split the value on `separator`
    ///
    /// An empty separator yields the whole value as the only element.
    pub fn to_list(&self, separator: &str) -> Vec<String> {
        if separator.is_empty() {
            return vec![self.value.clone()];
        }
        self.value.split(separator).map(str::to_string).collect()
    }

    // Modifiers

    #[must_use]
    pub fn to_lower(self) -> Self {
        Self::new(fold_case(&self.value))
    }

    #[must_use]
    pub fn to_upper(self) -> Self {
        Self::new(self.value.to_uppercase())
    }

    #[must_use]
    pub fn append(mut self, suffix: &str) -> Self {
        self.value.push_str(suffix);
        self
    }

    #[must_use]
    pub fn prepend(self, prefix: &str) -> Self {
        Self::new(format!("{}{}", prefix, self.value))
    }

    /// Collapse every run of whitespace into a single space
    #[must_use]
    pub fn remove_excessive_whitespace(self) -> Self {
        let collapsed = WHITESPACE_RUN.replace_all(&self.value, " ").into_owned();
        Self::new(collapsed)
    }

    #[must_use]
    pub fn remove_from_start(self, prefix: &str) -> Self {
        match self.value.strip_prefix(prefix) {
            Some(rest) => Self::new(rest),
            None => self,
        }
    }

    #[must_use]
    pub fn remove_from_end(self, suffix: &str) -> Self {
        match self.value.strip_suffix(suffix) {
            Some(rest) => Self::new(rest),
            None => self,
        }
    }

    /// Keep the part before the first `needle`
    ///
    /// When `needle` is absent the value becomes empty, unless
    /// `return_all_if_not_found` is set.
    #[must_use]
    pub fn keep_everything_before_first(self, needle: &str, return_all_if_not_found: bool) -> Self {
        let found = self.value.find(needle);
        self.keep(found.map(|pos| 0..pos), return_all_if_not_found)
    }

    #[must_use]
    pub fn keep_everything_after_first(self, needle: &str, return_all_if_not_found: bool) -> Self {
        let len = self.value.len();
        let found = self.value.find(needle);
        self.keep(found.map(|pos| pos + needle.len()..len), return_all_if_not_found)
    }

    #[must_use]
    pub fn keep_everything_before_last(self, needle: &str, return_all_if_not_found: bool) -> Self {
        let found = self.value.rfind(needle);
        self.keep(found.map(|pos| 0..pos), return_all_if_not_found)
    }

    #[must_use]
    pub fn keep_everything_after_last(self, needle: &str, return_all_if_not_found: bool) -> Self {
        let len = self.value.len();
        let found = self.value.rfind(needle);
        self.keep(found.map(|pos| pos + needle.len()..len), return_all_if_not_found)
    }

    fn keep(self, range: Option<std::ops::Range<usize>>, return_all_if_not_found: bool) -> Self {
        match range {
            Some(range) => Self::new(&self.value[range]),
            None if return_all_if_not_found => self,
            None => Self::default(),
        }
    }

    /// Mirror ASCII digits and letters inside their own range
    ///
    /// `a` becomes `z`, `B` becomes `Y`, `0` becomes `9`. Every other
    /// character is left alone.
    #[must_use]
    pub fn flip(self) -> Self {
        let flipped = self
            .value
            .chars()
            .map(|c| {
                let range = match c {
                    '0'..='9' => Some(('0', '9')),
                    'A'..='Z' => Some(('A', 'Z')),
                    'a'..='z' => Some(('a', 'z')),
                    _ => None,
                };
                range.map_or(c, |(low, high)| {
                    let code = NumberHelper::new(u32::from(c))
                        .with_lower_limit(Some(u32::from(low)))
                        .with_upper_limit(Some(u32::from(high)))
                        .flip()
                        .value();
                    char::from_u32(code).unwrap_or(c)
                })
            })
            .collect::<String>();
        Self::new(flipped)
    }

    // Checkers

    pub fn equals(&self, other: &str) -> bool {
        self.value == other
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.value.starts_with(prefix)
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.value.ends_with(suffix)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.value.contains(needle)
    }

    /// True when every needle occurs
    pub fn contains_all<S: AsRef<str>>(&self, needles: &[S]) -> bool {
        needles.iter().all(|n| self.contains(n.as_ref()))
    }

    /// True when at least one needle occurs
    pub fn contains_any<S: AsRef<str>>(&self, needles: &[S]) -> bool {
        needles.iter().any(|n| self.contains(n.as_ref()))
    }

    /// Number of non-overlapping occurrences of `needle`
    pub fn count_occurrences(&self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        self.value.matches(needle).count()
    }

    /// True when the value equals one of `values`
    pub fn in_list<S: AsRef<str>>(&self, values: &[S], case_sensitive: bool) -> bool {
        if case_sensitive {
            values.iter().any(|v| v.as_ref() == self.value)
        } else {
            let folded = fold_case(&self.value);
            values.iter().any(|v| fold_case(v.as_ref()) == folded)
        }
    }
}

impl fmt::Display for StringHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for StringHelper {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StringHelper {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Case-fold a string for case-insensitive comparison
pub fn fold_case(input: &str) -> String {
    input.to_lowercase()
}

/// Check if a string represents a numeric value
///
/// # Example
///
/// ```rust
/// use fl_helpers::utils::strings::is_numeric;
///
/// assert!(is_numeric("123"));
/// assert!(is_numeric("-123.45"));
/// assert!(!is_numeric("abc"));
/// assert!(!is_numeric(""));
/// ```
pub fn is_numeric(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Trim whitespace from a string (convenience function)
pub fn trim_string(input: &str) -> String {
    input.trim().to_string()
}

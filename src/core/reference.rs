//! Resource reference values.
//!
//! A property value of the form `Resource(key='title', bundle='test.Other')`
//! does not carry a literal string: it points at a key in another
//! bundle. Attribute order is free, quotes may be single or double.

use std::sync::LazyLock;

use regex::Regex;

static RESOURCE_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*Resource\s*\(\s*(key|bundle)\s*=\s*['"]([^'"]*)['"]\s*,\s*(key|bundle)\s*=\s*['"]([^'"]*)['"]\s*\)\s*$"#,
    )
    .unwrap()
});

/// A parsed `Resource(...)` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReference {
    /// Dotted bundle name (e.g., "test.package2.PropertiesTest").
    pub bundle: String,
    /// Key within the referenced bundle.
    pub key: String,
}

impl ResourceReference {
    /// Parse a property value as a resource reference.
    ///
    /// Returns `None` for ordinary string values and for malformed
    /// references (e.g., `key` given twice), which are then treated as
    /// plain text.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = RESOURCE_REFERENCE_REGEX.captures(value)?;
        let (first_attr, first_val) = (&caps[1], &caps[2]);
        let (second_attr, second_val) = (&caps[3], &caps[4]);
        if first_attr == second_attr {
            return None;
        }
        let (bundle, key) = if first_attr == "bundle" {
            (first_val, second_val)
        } else {
            (second_val, first_val)
        };
        Some(Self {
            bundle: bundle.to_string(),
            key: key.to_string(),
        })
    }
}

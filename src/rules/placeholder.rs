//! Placeholder mismatch detection rule.
//!
//! A translation must use the same positional placeholder indices as
//! its base value (order-free: "{1} on {0}" translating "{0} at {1}"
//! is fine). A dropped or invented index breaks formatting at runtime.

use crate::core::bundle::BundleSet;
use crate::core::placeholder::placeholder_indices;
use crate::core::reference::ResourceReference;
use crate::issues::PlaceholderMismatchIssue;

/// Check override values against the base's placeholder index set.
pub fn check_placeholders(set: &BundleSet) -> Vec<PlaceholderMismatchIssue> {
    let mut issues: Vec<PlaceholderMismatchIssue> = Vec::new();

    for family in set.families.values() {
        let Some(base) = &family.base else {
            continue;
        };

        for (locale, file) in &family.overrides {
            for entry in file.unique_entries() {
                let Some(base_entry) = base.get(&entry.key) else {
                    continue; // orphan, reported elsewhere
                };
                if ResourceReference::parse(&base_entry.value).is_some()
                    || ResourceReference::parse(&entry.value).is_some()
                {
                    continue;
                }

                let expected = placeholder_indices(&base_entry.value);
                let found = placeholder_indices(&entry.value);
                if expected != found {
                    issues.push(PlaceholderMismatchIssue {
                        context: entry.context(),
                        locale: locale.clone(),
                        expected,
                        found,
                    });
                }
            }
        }
    }

    issues.sort_by(|a, b| {
        a.context
            .location
            .file_path
            .cmp(&b.context.location.file_path)
            .then_with(|| a.context.location.line.cmp(&b.context.location.line))
            .then_with(|| a.context.key.cmp(&b.context.key))
    });

    issues
}

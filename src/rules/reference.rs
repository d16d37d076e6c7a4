//! Unresolved resource reference detection rule.
//!
//! Every `Resource(key=..., bundle=...)` value must point at a bundle
//! family in the scanned set and a key that resolves there, following
//! chained references without looping.

use crate::core::bundle::{BundleSet, PropertiesFile};
use crate::core::locale::Locale;
use crate::core::reference::ResourceReference;
use crate::core::resolve::lookup_reference;
use crate::issues::UnresolvedReferenceIssue;

/// Check every reference value in every file of the set.
///
/// References are resolved against the base locale; the override files
/// of the referenced bundle only change *which* string comes back, not
/// whether the key exists, so one locale suffices for validation.
pub fn check_references(set: &BundleSet) -> Vec<UnresolvedReferenceIssue> {
    let mut issues: Vec<UnresolvedReferenceIssue> = Vec::new();
    let base_locale = Locale::new("en");

    for family in set.families.values() {
        if let Some(base) = &family.base {
            check_file(set, base, &base_locale, &mut issues);
        }
        for file in family.overrides.values() {
            check_file(set, file, &base_locale, &mut issues);
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

fn check_file(
    set: &BundleSet,
    file: &PropertiesFile,
    locale: &Locale,
    issues: &mut Vec<UnresolvedReferenceIssue>,
) {
    for entry in file.unique_entries() {
        let Some(reference) = ResourceReference::parse(&entry.value) else {
            continue;
        };
        if let Err(reason) = lookup_reference(set, &reference, locale) {
            issues.push(UnresolvedReferenceIssue {
                context: entry.context(),
                reason,
            });
        }
    }
}

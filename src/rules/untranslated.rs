//! Untranslated override detection rule.
//!
//! An override value identical to its base value is usually a
//! copy-paste that was never translated. Values without alphabetic
//! content (numbers, separators, format-only strings) are exempt, as
//! are keys listed in the config's `ignoreUntranslated`.

use std::collections::HashSet;

use crate::core::bundle::BundleSet;
use crate::core::locale::Locale;
use crate::core::reference::ResourceReference;
use crate::issues::UntranslatedIssue;
use crate::utils::contains_alphabetic;

/// Check for override values identical to the base value.
///
/// One issue is reported per base key, listing every locale whose
/// override copies the base value verbatim.
pub fn check_untranslated(set: &BundleSet, ignore_keys: &HashSet<String>) -> Vec<UntranslatedIssue> {
    let mut issues: Vec<UntranslatedIssue> = Vec::new();

    for family in set.families.values() {
        let Some(base) = &family.base else {
            continue;
        };

        for entry in base.unique_entries() {
            if ignore_keys.contains(&entry.key) || !contains_alphabetic(&entry.value) {
                continue;
            }
            if ResourceReference::parse(&entry.value).is_some() {
                continue;
            }

            let identical_in: Vec<Locale> = family
                .overrides
                .iter()
                .filter(|(_, file)| {
                    file.get(&entry.key)
                        .is_some_and(|o| o.value == entry.value)
                })
                .map(|(locale, _)| locale.clone())
                .collect();

            if !identical_in.is_empty() {
                issues.push(UntranslatedIssue {
                    context: entry.context(),
                    identical_in,
                });
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

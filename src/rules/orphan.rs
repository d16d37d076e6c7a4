//! Orphan override key detection rule.
//!
//! An override record may only override keys its base bundle declares.
//! Keys that exist in an override file but not in the base are orphans,
//! typically left over from a key that was renamed or deleted in the
//! base but not in the translations.

use crate::core::bundle::BundleSet;
use crate::issues::OrphanKeyIssue;

/// Check for orphan override keys.
///
/// Every key of every override file must exist in the family's base
/// file. When a family has no base file at all, every override key is
/// an orphan and the issue says so.
pub fn check_orphan_keys(set: &BundleSet) -> Vec<OrphanKeyIssue> {
    let mut issues: Vec<OrphanKeyIssue> = Vec::new();

    for family in set.families.values() {
        let base_keys = family.base.as_ref();
        for (locale, file) in &family.overrides {
            for entry in file.unique_entries() {
                let in_base = base_keys.is_some_and(|base| base.contains_key(&entry.key));
                if !in_base {
                    issues.push(OrphanKeyIssue {
                        context: entry.context(),
                        locale: locale.clone(),
                        base_missing: base_keys.is_none(),
                    });
                }
            }
        }
    }

    // Sort by file path, then line for deterministic output.
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

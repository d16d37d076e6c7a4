//! Missing override detection rule.
//!
//! Reports base keys that no file in a locale's fallback chain
//! overrides. A missing override is not a failure at runtime (the base
//! value is served), so this rule warns; it exists to show translators
//! what is still untranslated per locale.

use crate::core::bundle::{BundleFamily, BundleSet};
use crate::core::locale::Locale;
use crate::core::reference::ResourceReference;
use crate::issues::MissingOverrideIssue;

/// Check for base keys without an override.
///
/// `expected_locales` widens the locale set beyond the override files a
/// family actually has, so a bundle with no `fr` file at all still
/// reports everything missing in `fr` when the config asks for it.
pub fn check_missing_overrides(
    set: &BundleSet,
    expected_locales: &[Locale],
) -> Vec<MissingOverrideIssue> {
    let mut issues: Vec<MissingOverrideIssue> = Vec::new();

    for family in set.families.values() {
        let Some(base) = &family.base else {
            continue;
        };

        let locales = target_locales(family, expected_locales);
        if locales.is_empty() {
            continue;
        }

        for entry in base.unique_entries() {
            // Reference values point at another bundle and are never
            // translated in place.
            if ResourceReference::parse(&entry.value).is_some() {
                continue;
            }

            let missing_in: Vec<Locale> = locales
                .iter()
                .filter(|locale| !covered(family, &entry.key, locale))
                .cloned()
                .collect();

            if !missing_in.is_empty() {
                issues.push(MissingOverrideIssue {
                    context: entry.context(),
                    missing_in,
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

/// Locales a family is measured against: its own override locales plus
/// the configured ones, deduplicated and ordered.
fn target_locales(family: &BundleFamily, expected: &[Locale]) -> Vec<Locale> {
    let mut locales: Vec<Locale> = family.locales().cloned().collect();
    for locale in expected {
        if !locales.contains(locale) {
            locales.push(locale.clone());
        }
    }
    locales.sort();
    locales
}

/// A key is covered for a locale when any file in the locale's fallback
/// chain declares it.
fn covered(family: &BundleFamily, key: &str, locale: &Locale) -> bool {
    locale
        .ancestors_and_self()
        .iter()
        .any(|chain_locale| {
            family
                .overrides
                .get(chain_locale)
                .is_some_and(|file| file.contains_key(key))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{family, set_of};

    #[test]
    fn test_fully_covered() {
        let set = set_of(vec![family(
            "Errors",
            Some(&[("a", "A")]),
            &[("de", &[("a", "A de")])],
        )]);

        assert!(check_missing_overrides(&set, &[]).is_empty());
    }

    #[test]
    fn test_missing_in_one_locale() {
        let set = set_of(vec![family(
            "Errors",
            Some(&[("a", "A"), ("b", "B")]),
            &[("de", &[("a", "A de")]), ("fr", &[("a", "A fr"), ("b", "B fr")])],
        )]);

        let issues = check_missing_overrides(&set, &[]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].context.key, "b");
        assert_eq!(issues[0].missing_in, vec![Locale::new("de")]);
    }

    #[test]
    fn test_fallback_chain_covers_regional_locale() {
        let set = set_of(vec![family(
            "Errors",
            Some(&[("a", "A")]),
            &[
                ("de", &[("a", "A de")]),
                // de_DE overrides nothing, but inherits "a" from de.
                ("de_DE", &[]),
            ],
        )]);

        assert!(check_missing_overrides(&set, &[]).is_empty());
    }

    #[test]
    fn test_expected_locales_widen_targets() {
        let set = set_of(vec![family("Errors", Some(&[("a", "A")]), &[])]);

        let issues = check_missing_overrides(&set, &[Locale::new("de")]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].missing_in, vec![Locale::new("de")]);
    }

    #[test]
    fn test_reference_values_are_skipped() {
        let set = set_of(vec![family(
            "Main",
            Some(&[("ref", "Resource(key='title', bundle='test.Other')")]),
            &[("de", &[])],
        )]);

        assert!(check_missing_overrides(&set, &[]).is_empty());
    }

    #[test]
    fn test_family_without_base_is_skipped() {
        let set = set_of(vec![family("Lonely", None, &[("de", &[("a", "1")])])]);
        assert!(check_missing_overrides(&set, &[]).is_empty());
    }
}

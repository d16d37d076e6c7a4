//! Shared fixture builders for rule tests.

use crate::core::bundle::{BundleFamily, BundleSet, PropertiesFile, PropertyEntry};
use crate::core::locale::Locale;

pub(crate) fn properties_file(path: &str, entries: &[(&str, &str)]) -> PropertiesFile {
    let mut file = PropertiesFile::new(path);
    for (i, (key, value)) in entries.iter().enumerate() {
        file.entries.push(PropertyEntry {
            key: key.to_string(),
            value: value.to_string(),
            comment: None,
            file_path: path.to_string(),
            line: i + 1,
            col: 1,
        });
    }
    file
}

/// Build a family from a base entry list and `(locale, entries)` pairs.
pub(crate) fn family(
    name: &str,
    base: Option<&[(&str, &str)]>,
    overrides: &[(&str, &[(&str, &str)])],
) -> BundleFamily {
    let mut family = BundleFamily::new(name);
    if let Some(entries) = base {
        family.base = Some(properties_file(&format!("{}.properties", name), entries));
    }
    for (locale, entries) in overrides {
        let locale: Locale = locale.parse().unwrap();
        let path = format!("{}_{}.properties", name, locale);
        family
            .overrides
            .insert(locale, properties_file(&path, entries));
    }
    family
}

pub(crate) fn set_of(families: Vec<BundleFamily>) -> BundleSet {
    let mut set = BundleSet::default();
    for family in families {
        set.families.insert(family.name.clone(), family);
    }
    set
}

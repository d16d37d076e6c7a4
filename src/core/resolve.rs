//! Override application and locale resolution.
//!
//! Applying a locale override record onto a base bundle produces a new
//! resolved view; the inputs are never modified. Overrides are applied
//! along the locale fallback chain, most general first, so that the
//! most specific file wins. Keys the override declares replace the base
//! value in place (base file order is kept); keys outside the declared
//! set pass through untouched; override keys unknown to the base are
//! appended (and reported separately by the orphan rule).

use std::collections::HashMap;
use std::fmt;

use crate::core::bundle::{BundleFamily, BundleSet, PropertiesFile};
use crate::core::locale::Locale;
use crate::core::reference::ResourceReference;

/// One entry of a resolved bundle view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub key: String,
    pub value: String,
    /// Comment attached to the entry that supplied the value.
    pub comment: Option<String>,
    /// Locale of the override file the value came from; `None` for the
    /// base file.
    pub origin: Option<Locale>,
}

/// The effective view of a bundle for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBundle {
    pub name: String,
    pub locale: Locale,
    pub entries: Vec<ResolvedEntry>,
}

impl ResolvedBundle {
    pub fn get(&self, key: &str) -> Option<&ResolvedEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Apply a family's override chain for `locale` onto its base file.
///
/// Families without a base file resolve to the override entries alone.
pub fn resolve_family(family: &BundleFamily, locale: &Locale) -> ResolvedBundle {
    let mut entries: Vec<ResolvedEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut apply = |file: &PropertiesFile, origin: Option<&Locale>| {
        for entry in file.unique_entries() {
            match index.get(&entry.key) {
                Some(&i) => {
                    entries[i].value = entry.value.clone();
                    entries[i].origin = origin.cloned();
                    if entry.comment.is_some() {
                        entries[i].comment = entry.comment.clone();
                    }
                }
                None => {
                    index.insert(entry.key.clone(), entries.len());
                    entries.push(ResolvedEntry {
                        key: entry.key.clone(),
                        value: entry.value.clone(),
                        comment: entry.comment.clone(),
                        origin: origin.cloned(),
                    });
                }
            }
        }
    };

    if let Some(base) = &family.base {
        apply(base, None);
    }
    for chain_locale in locale.ancestors_and_self() {
        if let Some(file) = family.overrides.get(&chain_locale) {
            apply(file, Some(&chain_locale));
        }
    }

    ResolvedBundle {
        name: family.name.clone(),
        locale: locale.clone(),
        entries,
    }
}

/// Why a resource reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    UnknownBundle { bundle: String },
    UnknownKey { bundle: String, key: String },
    /// The chain of `bundle.key` steps that closed the loop.
    Cycle { path: Vec<String> },
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceError::UnknownBundle { bundle } => {
                write!(f, "unknown bundle '{}'", bundle)
            }
            ReferenceError::UnknownKey { bundle, key } => {
                write!(f, "no key '{}' in bundle '{}'", key, bundle)
            }
            ReferenceError::Cycle { path } => {
                write!(f, "reference cycle: {}", path.join(" -> "))
            }
        }
    }
}

/// Resolve the value behind a `bundle.key` reference for `locale`,
/// following chained references.
///
/// The locale fallback chain of the *referenced* bundle is consulted,
/// so references localize through their own bundle's overrides.
pub fn lookup_reference(
    set: &BundleSet,
    reference: &ResourceReference,
    locale: &Locale,
) -> Result<String, ReferenceError> {
    let mut visited: Vec<String> = Vec::new();
    let mut current = reference.clone();

    loop {
        let step = format!("{}.{}", current.bundle, current.key);
        if visited.contains(&step) {
            visited.push(step);
            return Err(ReferenceError::Cycle { path: visited });
        }
        visited.push(step);

        let Some(family) = set.by_reference(&current.bundle) else {
            return Err(ReferenceError::UnknownBundle {
                bundle: current.bundle,
            });
        };

        let Some(value) = chain_value(family, &current.key, locale) else {
            return Err(ReferenceError::UnknownKey {
                bundle: current.bundle,
                key: current.key,
            });
        };

        match ResourceReference::parse(&value) {
            Some(next) => current = next,
            None => return Ok(value),
        }
    }
}

/// Value of `key` in `family` for `locale`: the most specific override
/// in the fallback chain that declares the key, else the base value.
fn chain_value(family: &BundleFamily, key: &str, locale: &Locale) -> Option<String> {
    for chain_locale in locale.ancestors_and_self().iter().rev() {
        if let Some(entry) = family.overrides.get(chain_locale).and_then(|f| f.get(key)) {
            return Some(entry.value.clone());
        }
    }
    family
        .base
        .as_ref()
        .and_then(|f| f.get(key))
        .map(|e| e.value.clone())
}

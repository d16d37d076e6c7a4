//! Locale identifiers and file-name suffix handling.
//!
//! Override files carry their locale as a file-stem suffix:
//! `Errors_de.properties`, `Errors_de_DE.properties`. A locale is a
//! language code plus optional country and variant parts, and resolves
//! through a fallback chain (`de_DE_legacy` -> `de_DE` -> `de` -> base).

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, Result, anyhow};

/// A locale identifier: language, optional country, optional variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    /// Lowercase ISO 639 language code (e.g., "de").
    pub language: String,
    /// Uppercase ISO 3166 country code (e.g., "DE").
    pub country: Option<String>,
    /// Free-form variant (e.g., "legacy").
    pub variant: Option<String>,
}

impl Locale {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country: None,
            variant: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// All locales this locale falls back through, ordered from the most
    /// general to this locale itself: `de_DE_legacy` yields
    /// `[de, de_DE, de_DE_legacy]`.
    ///
    /// Override files are applied in exactly this order, so the most
    /// specific override wins.
    pub fn ancestors_and_self(&self) -> Vec<Locale> {
        let mut chain = vec![Locale::new(self.language.clone())];
        if let Some(country) = &self.country {
            chain.push(Locale::new(self.language.clone()).with_country(country.clone()));
            if let Some(variant) = &self.variant {
                chain.push(
                    Locale::new(self.language.clone())
                        .with_country(country.clone())
                        .with_variant(variant.clone()),
                );
            }
        }
        chain
    }

    /// True if `self` is `other` or one of `other`'s fallback ancestors.
    pub fn is_ancestor_of(&self, other: &Locale) -> bool {
        other.ancestors_and_self().contains(self)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(country) = &self.country {
            write!(f, "_{}", country)?;
        }
        if let Some(variant) = &self.variant {
            write!(f, "_{}", variant)?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Accept both "de-DE" (BCP 47 style) and "de_DE" (file suffix style).
        let normalized = s.replace('-', "_");
        let parts: Vec<&str> = normalized.split('_').collect();
        parse_locale_parts(&parts).ok_or_else(|| anyhow!("Invalid locale: \"{}\"", s))
    }
}

/// Parse locale suffix parts (already split on '_').
///
/// Accepts `[lang]`, `[lang, country]`, and `[lang, country, variant...]`
/// where `lang` is 2-3 lowercase letters and `country` is 2 uppercase
/// letters. Anything else is not a locale suffix.
fn parse_locale_parts(parts: &[&str]) -> Option<Locale> {
    let (lang, rest) = parts.split_first()?;
    if !is_language(lang) {
        return None;
    }
    let mut locale = Locale::new(*lang);

    let Some((country, variant_parts)) = rest.split_first() else {
        return Some(locale);
    };
    if !is_country(country) {
        return None;
    }
    locale = locale.with_country(*country);

    if variant_parts.is_empty() {
        return Some(locale);
    }
    // Variant parts are free-form but must be non-empty.
    if variant_parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(locale.with_variant(variant_parts.join("_")))
}

fn is_language(s: &str) -> bool {
    (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_lowercase())
}

fn is_country(s: &str) -> bool {
    s.len() == 2 && s.chars().all(|c| c.is_ascii_uppercase())
}

/// Split a `.properties` file stem into bundle name and locale suffix.
///
/// The longest trailing run of '_'-separated parts that forms a valid
/// locale is treated as the suffix; the rest is the bundle name:
///
/// - `"PropertiesTest"` -> `("PropertiesTest", None)`
/// - `"PropertiesTest_de"` -> `("PropertiesTest", Some(de))`
/// - `"My_Bundle_de_DE"` -> `("My_Bundle", Some(de_DE))`
pub fn split_stem(stem: &str) -> (String, Option<Locale>) {
    let parts: Vec<&str> = stem.split('_').collect();
    // Try the longest suffix first (split right after the first part).
    for split_at in 1..parts.len() {
        if let Some(locale) = parse_locale_parts(&parts[split_at..]) {
            return (parts[..split_at].join("_"), Some(locale));
        }
    }
    (stem.to_string(), None)
}

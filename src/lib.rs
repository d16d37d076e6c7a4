//! Proplint - locale override checker for `.properties` resource bundles
//!
//! Proplint is a CLI tool and library for checking and resolving locale
//! overrides in Java-style `.properties` resource bundles: a base file
//! (`Errors.properties`) plus per-locale override files
//! (`Errors_de.properties`). It detects orphan override keys, missing
//! and untranslated overrides, placeholder mismatches, and broken
//! cross-bundle references, and can export the resolved per-locale view
//! of every bundle.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, reports)
//! - `commands`: Command runners (check, clean, merge)
//! - `config`: Configuration file loading and parsing
//! - `core`: Bundle model, locales, and override resolution
//! - `issues`: Issue type definitions and reporting
//! - `parsers`: The `.properties` reader and the bundle scanner
//! - `rules`: Detection rules for bundle issues
//! - `utils`: Shared utility functions

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod issues;
pub mod parsers;
pub mod properties_editor;
pub mod rules;
pub mod utils;
pub mod writer;

//! Issue types for bundle analysis results.
//!
//! This module defines all issue types that can be detected while
//! checking resource bundles. Each issue is self-contained with all
//! information needed by:
//! - Reporter: to display the issue to users
//! - Clean: to delete the offending keys

use std::collections::BTreeSet;

use enum_dispatch::enum_dispatch;

use crate::core::locale::Locale;
use crate::core::placeholder::format_indices;
use crate::core::resolve::ReferenceError;
use crate::core::{LineContext, PropertyContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    DuplicateKey,
    OrphanKey,
    MissingOverride,
    Untranslated,
    PlaceholderMismatch,
    UnresolvedReference,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::DuplicateKey => write!(f, "duplicate-key"),
            Rule::OrphanKey => write!(f, "orphan-key"),
            Rule::MissingOverride => write!(f, "missing-override"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::PlaceholderMismatch => write!(f, "placeholder-mismatch"),
            Rule::UnresolvedReference => write!(f, "unresolved-reference"),
        }
    }
}

// ============================================================
// Issue Types - Physical Lines (LineContext)
// ============================================================

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub context: LineContext,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// Key declared more than once within one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyIssue {
    pub context: LineContext,
    pub key: String,
    /// Line of the first occurrence.
    pub first_line: usize,
}

impl DuplicateKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateKey
    }
}

// ============================================================
// Issue Types - Property Entries (PropertyContext)
// ============================================================

/// Override key that does not exist in the base bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanKeyIssue {
    pub context: PropertyContext,
    /// Locale of the override file declaring the key.
    pub locale: Locale,
    /// True when the whole family has no base file at all.
    pub base_missing: bool,
}

impl OrphanKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::OrphanKey
    }
}

/// Base key with no override in one or more locales (fallback-chain
/// aware: a key overridden in `de` is covered for `de_DE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingOverrideIssue {
    /// Context of the base entry.
    pub context: PropertyContext,
    /// Locales in which the key has no override anywhere in the chain.
    pub missing_in: Vec<Locale>,
}

impl MissingOverrideIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingOverride
    }
}

/// Override value identical to the base value (possibly not translated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    /// Context of the base entry.
    pub context: PropertyContext,
    /// Locales whose override value equals the base value.
    pub identical_in: Vec<Locale>,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

/// Override value whose placeholder indices disagree with the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatchIssue {
    /// Context of the override entry.
    pub context: PropertyContext,
    pub locale: Locale,
    pub expected: BTreeSet<u32>,
    pub found: BTreeSet<u32>,
}

impl PlaceholderMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::PlaceholderMismatch
    }
}

/// `Resource(...)` value that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReferenceIssue {
    pub context: PropertyContext,
    pub reason: ReferenceError,
}

impl UnresolvedReferenceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnresolvedReference
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A bundle issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    DuplicateKey(DuplicateKeyIssue),
    OrphanKey(OrphanKeyIssue),
    MissingOverride(MissingOverrideIssue),
    Untranslated(UntranslatedIssue),
    PlaceholderMismatch(PlaceholderMismatchIssue),
    UnresolvedReference(UnresolvedReferenceIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::DuplicateKey(_) => DuplicateKeyIssue::severity(),
            Issue::OrphanKey(_) => OrphanKeyIssue::severity(),
            Issue::MissingOverride(_) => MissingOverrideIssue::severity(),
            Issue::Untranslated(_) => UntranslatedIssue::severity(),
            Issue::PlaceholderMismatch(_) => PlaceholderMismatchIssue::severity(),
            Issue::UnresolvedReference(_) => UnresolvedReferenceIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::DuplicateKey(_) => DuplicateKeyIssue::rule(),
            Issue::OrphanKey(_) => OrphanKeyIssue::rule(),
            Issue::MissingOverride(_) => MissingOverrideIssue::rule(),
            Issue::Untranslated(_) => UntranslatedIssue::rule(),
            Issue::PlaceholderMismatch(_) => PlaceholderMismatchIssue::rule(),
            Issue::UnresolvedReference(_) => UnresolvedReferenceIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A property entry (has key/value, no raw source text).
    Property(&'a PropertyContext),
    /// A physical line (has the raw source text for context display).
    Line(&'a LineContext),
}

/// Trait for types that can be reported to CLI.
///
/// This trait is implemented by all issue types to provide a consistent
/// interface for the report functions. Uses `enum_dispatch` for
/// zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line(&self.context)
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for DuplicateKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("first defined at line {}", self.first_line))
    }
}

impl Report for OrphanKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Property(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.base_missing {
            Some(format!(
                "in {} (\"{}\") - no base bundle file",
                self.locale, self.context.value
            ))
        } else {
            Some(format!("in {} (\"{}\")", self.locale, self.context.value))
        }
    }
}

impl Report for MissingOverrideIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Property(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let locales: Vec<String> = self.missing_in.iter().map(Locale::to_string).collect();
        Some(format!(
            "(\"{}\") missing in: {}",
            self.context.value,
            locales.join(", ")
        ))
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Property(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let locales: Vec<String> = self.identical_in.iter().map(Locale::to_string).collect();
        Some(format!(
            "(\"{}\") identical in: {}",
            self.context.value,
            locales.join(", ")
        ))
    }
}

impl Report for PlaceholderMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Property(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "in {}: expected {}; found {}",
            self.locale,
            format_indices(&self.expected),
            format_indices(&self.found)
        ))
    }
}

impl Report for UnresolvedReferenceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Property(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.reason.to_string())
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    /// Get file path for sorting.
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Property(ctx) => &ctx.location.file_path,
            ReportLocation::Line(ctx) => &ctx.location.file_path,
        }
    }

    /// Get line number for sorting.
    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Property(ctx) => ctx.location.line,
            ReportLocation::Line(ctx) => ctx.location.line,
        }
    }

    /// Get column number for sorting.
    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Property(ctx) => ctx.location.col,
            ReportLocation::Line(ctx) => ctx.location.col,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, message. Message comparison
        // keeps output deterministic when several issues land on the
        // same location (e.g., several orphan keys in one file).
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

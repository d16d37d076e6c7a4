use crate::commands::merge::MergeFormat;
use crate::issues::{Issue, OrphanKeyIssue};

/// Result of running proplint commands
pub struct RunResult {
    /// Command-specific output data.
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for dry-run commands that report work to do).
    pub exit_on_errors: bool,
    /// All issues found during the check.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of bundle families that were checked.
    pub bundles_checked: usize,
    /// Number of `.properties` files that were checked.
    pub files_checked: usize,
}

pub enum CommandSummary {
    Check,
    Clean(CleanSummary),
    Merge(MergeSummary),
    Init(InitSummary),
}

pub struct CleanSummary {
    pub is_apply: bool,
    /// Orphan keys found (dry run: would be deleted).
    pub orphan_issues: Vec<OrphanKeyIssue>,
    /// Key occurrences actually deleted (apply only).
    pub applied_count: usize,
    /// Files touched (or that would be touched).
    pub file_count: usize,
}

pub struct MergeSummary {
    pub bundles: usize,
    pub locales: usize,
    pub files_written: usize,
    /// References left as raw values because they did not resolve.
    pub unresolved_references: usize,
    pub out_dir: String,
    pub format: MergeFormat,
}

pub struct InitSummary {
    pub created: bool,
}

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::{
    cli::args::CleanCommand,
    cli::report::FAILURE_MARK,
    commands::{CleanSummary, CommandSummary, RunResult, context::CheckContext},
    issues::OrphanKeyIssue,
    properties_editor::PropertiesEditor,
    rules::orphan::check_orphan_keys,
};

/// Runner for the clean command.
///
/// CleanRunner identifies and optionally removes orphan override keys
/// from `.properties` files. Dry run by default; `--apply` edits the
/// files, deleting each orphan entry together with its attached
/// comment block.
pub struct CleanRunner {
    ctx: CheckContext,
    apply: bool,
}

impl CleanRunner {
    pub fn new(cmd: CleanCommand) -> Result<Self> {
        let ctx = CheckContext::new(&cmd.args.common)?;
        Ok(Self {
            ctx,
            apply: cmd.args.apply,
        })
    }

    pub fn run(self) -> Result<RunResult> {
        let data = self.ctx.ensure_bundles()?;

        if data.files_scanned == 0 {
            bail!(
                "No .properties files found in '{}'.\n\
                 Hint: Check your .proplintrc.json 'bundlesRoot' setting.",
                self.ctx.resolved_bundles_root().display()
            );
        }

        // Refuse to edit anything while files fail to parse: entries in
        // those files cannot be accounted for.
        if !data.parse_issues.is_empty() {
            bail!(
                "{} {}, {} file(s) could not be parsed.\n\
                 Run `proplint check` to see details and fix them.",
                FAILURE_MARK,
                "Cannot clean".red().bold(),
                data.parse_issues.len()
            );
        }

        let orphans = check_orphan_keys(&data.set);
        let file_count = count_files(&orphans);

        let applied_count = if self.apply {
            self.delete_orphans(&orphans)?
        } else {
            0
        };

        Ok(RunResult {
            summary: CommandSummary::Clean(CleanSummary {
                is_apply: self.apply,
                orphan_issues: orphans,
                applied_count,
                file_count,
            }),
            error_count: 0,
            warning_count: 0,
            exit_on_errors: false, // dry-run/apply should not fail CI
            issues: Vec::new(),
            parse_error_count: 0,
            bundles_checked: data.set.len(),
            files_checked: data.files_scanned,
        })
    }

    /// Delete the orphan entries, one editor pass per file.
    fn delete_orphans(&self, orphans: &[OrphanKeyIssue]) -> Result<usize> {
        let mut deleted = 0;
        for (file_path, issues) in group_by_file(orphans) {
            let keys: Vec<&str> = issues.iter().map(|i| i.context.key.as_str()).collect();
            let mut editor = PropertiesEditor::open(Path::new(file_path))?;
            deleted += editor.delete_keys(&keys)?;
            editor.save()?;
        }
        Ok(deleted)
    }
}

/// Group issues by file path, sorted for deterministic edits/output.
pub(crate) fn group_by_file(
    orphans: &[OrphanKeyIssue],
) -> BTreeMap<&str, Vec<&OrphanKeyIssue>> {
    let mut grouped: BTreeMap<&str, Vec<&OrphanKeyIssue>> = BTreeMap::new();
    for issue in orphans {
        grouped
            .entry(issue.context.file_path())
            .or_default()
            .push(issue);
    }
    grouped
}

fn count_files(orphans: &[OrphanKeyIssue]) -> usize {
    group_by_file(orphans).len()
}

pub fn clean(cmd: CleanCommand) -> Result<RunResult> {
    CleanRunner::new(cmd)?.run()
}

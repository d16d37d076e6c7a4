use std::collections::HashSet;

use anyhow::{Result, bail};
use clap::ValueEnum;

use crate::{
    cli::args::{CheckArgs, CheckCommand},
    commands::{CommandSummary, RunResult, context::CheckContext},
    core::bundle::BundleSet,
    core::{LineContext, PropertyLocation},
    issues::{DuplicateKeyIssue, Issue, Rule, Severity},
    rules::{
        missing::check_missing_overrides, orphan::check_orphan_keys,
        placeholder::check_placeholders, reference::check_references,
        untranslated::check_untranslated,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Orphan,
    Missing,
    Untranslated,
    Placeholder,
    Reference,
}

/// The main orchestrator for check operations.
///
/// CheckRunner is responsible for:
/// 1. Holding the CheckContext (data container)
/// 2. Managing the list of rules to execute
/// 3. Aggregating issues from all rules (plus the always-on structural
///    issues: parse errors and duplicate keys)
pub struct CheckRunner {
    rules: Vec<CheckRule>,
    ctx: CheckContext,
}

impl CheckRunner {
    pub fn new(args: CheckArgs) -> Result<Self> {
        let ctx = CheckContext::new(&args.common)?;
        Ok(Self {
            rules: Vec::new(),
            ctx,
        })
    }

    pub fn add(mut self, rule: CheckRule) -> Self {
        // Deduplicate: skip if already added
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    pub fn orphan(self) -> Self {
        self.add(CheckRule::Orphan)
    }

    pub fn missing(self) -> Self {
        self.add(CheckRule::Missing)
    }

    pub fn untranslated(self) -> Self {
        self.add(CheckRule::Untranslated)
    }

    pub fn placeholder(self) -> Self {
        self.add(CheckRule::Placeholder)
    }

    pub fn reference(self) -> Self {
        self.add(CheckRule::Reference)
    }

    pub fn all(self) -> Self {
        self.orphan()
            .missing()
            .untranslated()
            .placeholder()
            .reference()
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

        let mut all_issues = data.parse_issues.clone();
        all_issues.extend(duplicate_key_issues(&data.set));

        for rule in &self.rules {
            if self.ctx.verbose {
                eprintln!("Running rule: {:?}", rule);
            }
            match rule {
                CheckRule::Orphan => {
                    all_issues.extend(check_orphan_keys(&data.set).into_iter().map(Issue::from));
                }
                CheckRule::Missing => {
                    let expected = self.ctx.config.expected_locales();
                    all_issues.extend(
                        check_missing_overrides(&data.set, &expected)
                            .into_iter()
                            .map(Issue::from),
                    );
                }
                CheckRule::Untranslated => {
                    let ignore_keys: HashSet<String> =
                        self.ctx.config.ignore_untranslated.iter().cloned().collect();
                    all_issues.extend(
                        check_untranslated(&data.set, &ignore_keys)
                            .into_iter()
                            .map(Issue::from),
                    );
                }
                CheckRule::Placeholder => {
                    all_issues.extend(check_placeholders(&data.set).into_iter().map(Issue::from));
                }
                CheckRule::Reference => {
                    all_issues.extend(check_references(&data.set).into_iter().map(Issue::from));
                }
            }
        }

        Ok(finish(all_issues, data.set.len(), data.files_scanned))
    }
}

/// Duplicate keys are an invariant violation of the file itself, so
/// they are reported regardless of which rules were selected.
fn duplicate_key_issues(set: &BundleSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    for family in set.families.values() {
        let files = family.base.iter().chain(family.overrides.values());
        for file in files {
            issues.extend(file.duplicates.iter().map(|dup| {
                Issue::DuplicateKey(DuplicateKeyIssue {
                    context: LineContext::new(
                        PropertyLocation::new(&file.path, dup.line, dup.col),
                        &dup.source_line,
                    ),
                    key: dup.key.clone(),
                    first_line: dup.first_line,
                })
            }));
        }
    }
    issues
}

fn finish(mut issues: Vec<Issue>, bundles_checked: usize, files_checked: usize) -> RunResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| i.rule() == Rule::ParseError)
        .count();
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count();

    RunResult {
        summary: CommandSummary::Check,
        error_count,
        warning_count,
        exit_on_errors: true, // check command: exit 1 on errors
        issues,
        parse_error_count,
        bundles_checked,
        files_checked,
    }
}

pub fn check(cmd: CheckCommand) -> Result<RunResult> {
    let mut runner = CheckRunner::new(cmd.args)?;
    if cmd.checks.is_empty() {
        runner = runner.all();
    } else {
        for rule in cmd.checks {
            runner = runner.add(rule);
        }
    }
    runner.run()
}

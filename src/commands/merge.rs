use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use colored::Colorize;

use crate::{
    cli::args::MergeCommand,
    cli::report::FAILURE_MARK,
    commands::{CommandSummary, MergeSummary, RunResult, context::CheckContext},
    core::bundle::BundleSet,
    core::locale::Locale,
    core::reference::ResourceReference,
    core::resolve::{ResolvedBundle, lookup_reference, resolve_family},
    writer::{write_merged_json, write_merged_properties},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergeFormat {
    Json,
    Properties,
}

impl MergeFormat {
    pub fn extension(self) -> &'static str {
        match self {
            MergeFormat::Json => "json",
            MergeFormat::Properties => "properties",
        }
    }
}

/// Runner for the merge command.
///
/// Applies each family's override chain per locale and writes one
/// resolved file per bundle and locale under the output directory.
/// Resource references are substituted with the referenced (localized)
/// value; unresolvable ones are left as raw text and counted.
pub struct MergeRunner {
    ctx: CheckContext,
    out: PathBuf,
    locales: Vec<Locale>,
    format: MergeFormat,
}

impl MergeRunner {
    pub fn new(cmd: MergeCommand) -> Result<Self> {
        let ctx = CheckContext::new(&cmd.args.common)?;
        let locales = cmd
            .args
            .locales
            .iter()
            .map(|l| {
                l.parse::<Locale>()
                    .with_context(|| format!("Invalid --locale value: \"{}\"", l))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            ctx,
            out: cmd.args.out,
            locales,
            format: cmd.args.format,
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

        // Merged output must account for every file; refuse on parse errors.
        if !data.parse_issues.is_empty() {
            bail!(
                "{} {}, {} file(s) could not be parsed.\n\
                 Run `proplint check` to see details and fix them.",
                FAILURE_MARK,
                "Cannot merge".red().bold(),
                data.parse_issues.len()
            );
        }

        let locales = if self.locales.is_empty() {
            observed_locales(&data.set)
        } else {
            self.locales.clone()
        };
        if locales.is_empty() {
            bail!(
                "No locales to merge: no override files found.\n\
                 Hint: Pass --locale or add *_<locale>.properties files."
            );
        }

        let mut files_written = 0;
        let mut unresolved = 0;
        let mut bundles = 0;

        for family in data.set.families.values() {
            if family.base.is_none() {
                // Without a base there is nothing meaningful to merge;
                // the orphan rule reports these families.
                continue;
            }
            bundles += 1;

            for locale in &locales {
                let mut resolved = resolve_family(family, locale);
                unresolved += substitute_references(&data.set, &mut resolved);

                let rel = format!("{}_{}.{}", family.name, locale, self.format.extension());
                let out_path = self.out.join(rel);
                match self.format {
                    MergeFormat::Json => write_merged_json(&resolved, &out_path)?,
                    MergeFormat::Properties => write_merged_properties(&resolved, &out_path)?,
                }
                files_written += 1;

                if self.ctx.verbose {
                    eprintln!("Wrote {}", out_path.display());
                }
            }
        }

        Ok(RunResult {
            summary: CommandSummary::Merge(MergeSummary {
                bundles,
                locales: locales.len(),
                files_written,
                unresolved_references: unresolved,
                out_dir: self.out.display().to_string(),
                format: self.format,
            }),
            error_count: 0,
            warning_count: 0,
            exit_on_errors: true,
            issues: Vec::new(),
            parse_error_count: 0,
            bundles_checked: data.set.len(),
            files_checked: data.files_scanned,
        })
    }
}

/// All locales that have at least one override file anywhere in the set.
fn observed_locales(set: &BundleSet) -> Vec<Locale> {
    let locales: BTreeSet<Locale> = set
        .families
        .values()
        .flat_map(|family| family.locales().cloned())
        .collect();
    locales.into_iter().collect()
}

/// Replace reference values with the referenced bundle's localized
/// string. Returns the number of references that did not resolve (their
/// raw value is kept).
fn substitute_references(set: &BundleSet, resolved: &mut ResolvedBundle) -> usize {
    let locale = resolved.locale.clone();
    let mut unresolved = 0;
    for entry in &mut resolved.entries {
        let Some(reference) = ResourceReference::parse(&entry.value) else {
            continue;
        };
        match lookup_reference(set, &reference, &locale) {
            Ok(value) => entry.value = value,
            Err(_) => unresolved += 1,
        }
    }
    unresolved
}

pub fn merge(cmd: MergeCommand) -> Result<RunResult> {
    MergeRunner::new(cmd)?.run()
}

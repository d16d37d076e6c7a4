//! Bundle file discovery.
//!
//! Walks the bundles root for `.properties` files, parses them in
//! parallel, and groups them into bundle families by stem and locale
//! suffix. Per-file parse failures become issues instead of aborting
//! the scan.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::bundle::{BundleFamily, BundleSet, PropertiesFile};
use crate::core::locale::split_stem;
use crate::core::{LineContext, PropertyLocation};
use crate::issues::{Issue, ParseErrorIssue};
use crate::parsers::properties::{PropertiesParseError, parse_properties_str};

/// Result of scanning the bundles root.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub set: BundleSet,
    /// Parse failures, one issue per unreadable or malformed file.
    pub parse_issues: Vec<Issue>,
    /// Number of `.properties` files visited (parse failures included).
    pub files_scanned: usize,
}

pub fn scan_bundle_files(bundles_root: &Path, ignores: &[String]) -> Result<ScanResult> {
    if !bundles_root.exists() {
        bail!(
            "Bundles directory '{}' does not exist.\n\
             Hint: Check your .proplintrc.json 'bundlesRoot' setting.",
            bundles_root.display()
        );
    }

    if !bundles_root.is_dir() {
        bail!("'{}' is not a directory.", bundles_root.display());
    }

    let ignore_patterns: Vec<Pattern> = ignores
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut paths: Vec<(PathBuf, String)> = Vec::new();
    for entry in WalkDir::new(bundles_root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("properties") {
            continue;
        }
        let rel = path
            .strip_prefix(bundles_root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        if ignore_patterns.iter().any(|p| p.matches(&rel)) {
            continue;
        }
        paths.push((path.to_path_buf(), rel));
    }
    // Deterministic grouping and reporting order.
    paths.sort();

    let parsed: Vec<(String, Result<PropertiesFile, FileError>)> = paths
        .par_iter()
        .map(|(path, rel)| (rel.clone(), parse_one(path)))
        .collect();

    let mut result = ScanResult {
        files_scanned: parsed.len(),
        ..ScanResult::default()
    };

    for (rel, outcome) in parsed {
        match outcome {
            Ok(file) => insert_file(&mut result.set, &rel, file),
            Err(err) => result.parse_issues.push(err.into_issue()),
        }
    }

    Ok(result)
}

/// Parse failure carrying enough context for a report.
struct FileError {
    file_path: String,
    line: usize,
    col: usize,
    source_line: String,
    message: String,
}

impl FileError {
    fn into_issue(self) -> Issue {
        Issue::ParseError(ParseErrorIssue {
            context: LineContext::new(
                PropertyLocation::new(self.file_path, self.line, self.col),
                self.source_line,
            ),
            error: self.message,
        })
    }
}

fn parse_one(path: &Path) -> Result<PropertiesFile, FileError> {
    let file_path = path.to_string_lossy().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| FileError {
        file_path: file_path.clone(),
        line: 1,
        col: 1,
        source_line: String::new(),
        message: format!("Failed to read: {}", e),
    })?;

    parse_properties_str(&content, &file_path).map_err(
        |PropertiesParseError {
             line,
             col,
             message,
             source_line,
         }| FileError {
            file_path,
            line,
            col,
            source_line,
            message,
        },
    )
}

/// File a parsed properties file under its bundle family.
fn insert_file(set: &mut BundleSet, rel_path: &str, file: PropertiesFile) {
    let stem = rel_path.strip_suffix(".properties").unwrap_or(rel_path);
    let (dir, stem) = match stem.rsplit_once('/') {
        Some((dir, stem)) => (Some(dir), stem),
        None => (None, stem),
    };
    let (short_name, locale) = split_stem(stem);
    let name = match dir {
        Some(dir) => format!("{}/{}", dir, short_name),
        None => short_name,
    };

    let family = set
        .families
        .entry(name.clone())
        .or_insert_with(|| BundleFamily::new(name));
    match locale {
        Some(locale) => {
            family.overrides.insert(locale, file);
        }
        None => family.base = Some(file),
    }
}

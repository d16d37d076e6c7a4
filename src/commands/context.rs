use std::{
    cell::OnceCell,
    path::{Path, PathBuf},
};

use anyhow::Result;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::bundle::BundleSet,
    issues::Issue,
    parsers::scan::scan_bundle_files,
};

/// Loaded bundle data shared by all commands.
pub struct BundleData {
    pub set: BundleSet,
    /// Parse failures collected during the scan.
    pub parse_issues: Vec<Issue>,
    /// Number of `.properties` files visited.
    pub files_scanned: usize,
}

/// Data container for check/clean/merge operations.
///
/// Holds the configuration and lazily scans the bundles root once; the
/// runners (`CheckRunner`, `CleanRunner`, `MergeRunner`) orchestrate on
/// top of it. Once loaded the data is immutable.
pub struct CheckContext {
    pub config: Config,
    pub verbose: bool,
    bundles_root: PathBuf,
    bundles: OnceCell<BundleData>,
}

impl CheckContext {
    /// Create a new CheckContext from command line args.
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let config_result = load_config(Path::new("."))?;

        // In verbose mode, inform user if using default config
        if common.verbose && !config_result.from_file {
            eprintln!("Note: No {} found, using default configuration", crate::config::CONFIG_FILE_NAME);
        }

        let config = config_result.config;
        let bundles_root = common
            .bundles_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.bundles_root));

        Ok(Self {
            config,
            verbose: common.verbose,
            bundles_root,
            bundles: OnceCell::new(),
        })
    }

    /// The bundles root, CLI flag winning over the config file.
    pub fn resolved_bundles_root(&self) -> &Path {
        &self.bundles_root
    }

    pub fn bundles(&self) -> Option<&BundleData> {
        self.bundles.get()
    }

    /// Scan the bundles root once and cache the result.
    pub fn ensure_bundles(&self) -> Result<&BundleData> {
        if self.bundles.get().is_none() {
            let scan = scan_bundle_files(&self.bundles_root, &self.config.ignores)?;
            let data = BundleData {
                set: scan.set,
                parse_issues: scan.parse_issues,
                files_scanned: scan.files_scanned,
            };
            let result = self.bundles.set(data);
            debug_assert!(result.is_ok(), "bundles already initialized");
        }
        Ok(self
            .bundles
            .get()
            .expect("bundles should be loaded"))
    }
}

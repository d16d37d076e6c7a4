use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::locale::Locale;

pub const CONFIG_FILE_NAME: &str = ".proplintrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns (relative to the bundles root) to skip.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_bundles_root", alias = "bundlesDir")]
    pub bundles_root: String,
    /// Locales every bundle is expected to cover. Empty means "the
    /// locales that actually have override files".
    #[serde(default)]
    pub locales: Vec<String>,
    /// Keys exempt from the untranslated rule (brand names etc.).
    #[serde(default)]
    pub ignore_untranslated: Vec<String>,
}

fn default_bundles_root() -> String {
    "./properties".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            bundles_root: default_bundles_root(),
            locales: Vec::new(),
            ignore_untranslated: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or any entry
    /// in `locales` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for locale in &self.locales {
            locale
                .parse::<Locale>()
                .with_context(|| format!("Invalid locale in 'locales': \"{}\"", locale))?;
        }

        Ok(())
    }

    /// Configured locales, parsed.
    ///
    /// Call after `validate()`; invalid entries are skipped here.
    pub fn expected_locales(&self) -> Vec<Locale> {
        self.locales
            .iter()
            .filter_map(|l| l.parse().ok())
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".taromigraterc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source directory, relative to the app root.
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// App entry, relative to the source root, without extension.
    #[serde(default = "default_entry")]
    pub entry: String,
    /// Project build config, relative to the app root, without extension.
    #[serde(default = "default_project_config")]
    pub project_config: String,
    /// Glob patterns (relative to the source root) of pages to leave untouched.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Platform suffix preferred when resolving sources (`index.weapp.tsx`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Framework written into the generated babel config.
    #[serde(default = "default_framework")]
    pub framework: String,
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_entry() -> String {
    "app".to_string()
}

fn default_project_config() -> String {
    "config/index".to_string()
}

fn default_framework() -> String {
    "nerv".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            entry: default_entry(),
            project_config: default_project_config(),
            ignores: Vec::new(),
            platform: None,
            framework: default_framework(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or the
    /// entry is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.entry.trim().is_empty() {
            anyhow::bail!("'entry' must not be empty");
        }

        Ok(())
    }

    /// Compiled `ignores` patterns.
    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|p| {
                Pattern::new(p).with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
            })
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

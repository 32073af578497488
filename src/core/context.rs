use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use glob::Pattern;

use crate::{
    cli::args::MigrateArgs,
    config::{Config, load_config},
    utils::{display_path, normalize_path},
};

/// Settings for one migration run.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--source-root client/src`)
/// 2. `.taromigraterc.json` config file
/// 3. Built-in defaults
pub struct MigrateContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Absolute project root (holds `package.json`).
    pub app_root: PathBuf,

    /// Absolute source root (holds the app entry and pages).
    pub source_root: PathBuf,

    /// Major framework version to migrate to.
    pub target_version: u32,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    ignores: Vec<Pattern>,
}

impl MigrateContext {
    /// Create a new `MigrateContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the app root does not exist or the config file is invalid.
    pub fn new(args: &MigrateArgs) -> Result<Self> {
        let requested_root = args.app_root.clone().unwrap_or_else(|| PathBuf::from("."));
        let app_root = requested_root
            .canonicalize()
            .with_context(|| format!("App root not found: {}", requested_root.display()))?;

        let config_result = load_config(&app_root)?;
        if args.verbose && !config_result.from_file {
            eprintln!("Note: No .taromigraterc.json found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(ref source_root) = args.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }
        if let Some(ref platform) = args.platform {
            config.platform = Some(platform.clone());
        }

        Self::from_config(config, app_root, args.target_version, args.verbose)
    }

    /// Create a context from an already merged config. `app_root` must be absolute.
    pub fn from_config(
        config: Config,
        app_root: PathBuf,
        target_version: u32,
        verbose: bool,
    ) -> Result<Self> {
        let ignores = config.ignore_patterns()?;
        let source_root = normalize_path(&app_root.join(&config.source_root));
        Ok(Self {
            config,
            app_root,
            source_root,
            target_version,
            verbose,
            ignores,
        })
    }

    pub fn platform(&self) -> Option<&str> {
        self.config.platform.as_deref().filter(|p| !p.is_empty())
    }

    /// Path shown to the user, relative to the app root.
    pub fn display(&self, path: &Path) -> String {
        display_path(&self.app_root, path)
    }

    /// Whether a source file matches one of the configured `ignores` patterns
    /// (matched against its path relative to the source root).
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.ignores.is_empty() {
            return false;
        }
        let relative = display_path(&self.source_root, path);
        self.ignores.iter().any(|pattern| pattern.matches(&relative))
    }
}

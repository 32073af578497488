//! Migration orchestrator.
//!
//! Runs the project steps in order:
//!
//! 1. `package.json` check (fatal when missing)
//! 2. project build config inspection
//! 3. `babel.config.js` scaffold (Taro 3 only)
//! 4. config artifacts for the app entry and every page (Taro 3 only)
//!
//! Nothing is printed here; the CLI renders the returned [`MigrationOutcome`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::context::MigrateContext;
use crate::core::extract::{ConfigValue, FileScan, scan_file};
use crate::core::fs::SourceFs;
use crate::core::project::{
    BABEL_CONFIG_FILE, ProjectConfigInspection, TSCONFIG_FILE, inspect_project_config,
    render_babel_config,
};
use crate::core::resolve::{ComponentResolver, resolve_script_path};
use crate::issues::{
    InvalidEntryConfigIssue, Issue, MissingPageIssue, NonLiteralConfigIssue, ParseErrorIssue,
};
use crate::utils::{collapse_slashes, normalize_path};

/// Major version whose file layout the config artifacts belong to.
pub const FILE_MIGRATION_VERSION: u32 = 3;

pub const PACKAGE_JSON: &str = "package.json";

/// One generated `*.config.*` file.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// Page, component or entry file the config was extracted from.
    pub source: PathBuf,
    pub output: PathBuf,
    pub config: ConfigValue,
}

/// Artifacts and findings of a completed app migration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppArtifacts {
    pub entry: Artifact,
    /// Page artifacts in page list order.
    pub pages: Vec<Artifact>,
    /// Pages skipped because they match an `ignores` pattern.
    pub ignored: Vec<String>,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppMigration {
    /// No script resolves for the entry; nothing was written.
    MissingEntry { expected: PathBuf },
    /// The entry does not parse; nothing was written.
    EntryParseFailed(ParseErrorIssue),
    Migrated(AppArtifacts),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationReport {
    pub target_version: u32,
    /// `None` when the project has no build config file.
    pub project_config: Option<ProjectConfigInspection>,
    /// Path of the generated babel config, when one was generated.
    pub babel_config: Option<PathBuf>,
    /// `None` when the target version has no file migration.
    pub app: Option<AppMigration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    MissingPackageJson { expected: PathBuf },
    Finished(MigrationReport),
}

/// Run every migration step for the project described by `ctx`.
///
/// # Errors
///
/// Only write failures are errors. Missing, unreadable or broken project
/// files are part of the outcome.
pub fn migrate_project<F: SourceFs + ?Sized>(
    ctx: &MigrateContext,
    fs: &F,
) -> Result<MigrationOutcome> {
    let package_json = ctx.app_root.join(PACKAGE_JSON);
    if !fs.exists(&package_json) {
        return Ok(MigrationOutcome::MissingPackageJson {
            expected: package_json,
        });
    }

    let project_config_path = normalize_path(&ctx.app_root.join(&ctx.config.project_config));
    let project_config = match resolve_script_path(fs, &project_config_path, None) {
        Some(path) => Some(inspect_project_config(fs, &path, ctx.target_version)),
        None => None,
    };

    if ctx.target_version != FILE_MIGRATION_VERSION {
        return Ok(MigrationOutcome::Finished(MigrationReport {
            target_version: ctx.target_version,
            project_config,
            babel_config: None,
            app: None,
        }));
    }

    let babel_path = ctx.app_root.join(BABEL_CONFIG_FILE);
    let ts = fs.is_file(&ctx.app_root.join(TSCONFIG_FILE));
    fs.write_text(&babel_path, &render_babel_config(&ctx.config.framework, ts))?;

    let app = migrate_app(ctx, fs)?;

    Ok(MigrationOutcome::Finished(MigrationReport {
        target_version: ctx.target_version,
        project_config,
        babel_config: Some(babel_path),
        app: Some(app),
    }))
}

/// Extract config artifacts for the app entry and all of its pages.
///
/// Page artifacts are written first, the entry artifact last.
pub fn migrate_app<F: SourceFs + ?Sized>(ctx: &MigrateContext, fs: &F) -> Result<AppMigration> {
    let platform = ctx.platform();
    let expected = normalize_path(&ctx.source_root.join(&ctx.config.entry));
    let Some(entry_path) = resolve_script_path(fs, &expected, platform) else {
        return Ok(AppMigration::MissingEntry { expected });
    };
    let entry_display = ctx.display(&entry_path);

    let entry_scan = match scan_file(fs, &entry_path) {
        FileScan::Scanned(scan) => scan,
        FileScan::ParseFailed(error) => {
            return Ok(AppMigration::EntryParseFailed(ParseErrorIssue {
                file_path: entry_display,
                error,
            }));
        }
    };

    let mut issues: Vec<Issue> = entry_scan
        .omitted
        .iter()
        .map(|omitted| {
            Issue::NonLiteralConfig(NonLiteralConfigIssue {
                file_path: entry_display.clone(),
                key_path: omitted.key_path.clone(),
                kind: omitted.kind.to_string(),
            })
        })
        .collect();

    let page_list = collect_pages(&entry_scan.config, &entry_display, &mut issues);

    let mut resolver = ComponentResolver::new(fs, platform, &ctx.app_root);
    let mut pages = Vec::new();
    let mut ignored = Vec::new();

    for page in &page_list {
        let logical = normalize_path(&ctx.source_root.join(page.trim_start_matches('/')));
        let Some(page_path) = resolve_script_path(fs, &logical, platform) else {
            issues.push(Issue::MissingPage(MissingPageIssue {
                page: page.clone(),
                tried: ctx.display(&logical),
            }));
            continue;
        };
        if ctx.is_ignored(&page_path) {
            ignored.push(page.clone());
            continue;
        }
        if let Some(config) = resolver.resolve_page(&page_path) {
            pages.push(Artifact {
                output: artifact_path(&page_path),
                source: page_path,
                config,
            });
        }
    }
    issues.extend(resolver.into_issues());

    let entry = Artifact {
        output: artifact_path(&entry_path),
        source: entry_path,
        config: entry_scan.config,
    };

    for artifact in pages.iter().chain(std::iter::once(&entry)) {
        write_artifact(fs, artifact)?;
    }

    Ok(AppMigration::Migrated(AppArtifacts {
        entry,
        pages,
        ignored,
        issues,
    }))
}

/// Working page list: the top-level `pages`, then each subpackage page as
/// `root/page` unless that exact string is already listed.
///
/// Malformed entries are skipped and recorded against `entry_file`.
pub fn collect_pages(config: &ConfigValue, entry_file: &str, issues: &mut Vec<Issue>) -> Vec<String> {
    let mut invalid = |reason: String| {
        issues.push(Issue::InvalidEntryConfig(InvalidEntryConfigIssue {
            file_path: entry_file.to_string(),
            reason,
        }))
    };

    let mut pages: Vec<String> = Vec::new();
    match config.get("pages") {
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(page) => pages.push(page.to_string()),
                    None => invalid(format!("pages[{}] is not a string, skipped", index)),
                }
            }
        }
        _ => invalid("entry config has no \"pages\" list".to_string()),
    }

    let subpackages = config
        .get("subPackages")
        .or_else(|| config.get("subpackages"));
    let Some(Value::Array(subpackages)) = subpackages else {
        return pages;
    };

    for (index, subpackage) in subpackages.iter().enumerate() {
        let Some(root) = subpackage.get("root").and_then(Value::as_str) else {
            invalid(format!("subPackages[{}] has no \"root\", skipped", index));
            continue;
        };
        let Some(Value::Array(sub_pages)) = subpackage.get("pages") else {
            continue;
        };
        for (page_index, item) in sub_pages.iter().enumerate() {
            let Some(page) = item.as_str() else {
                invalid(format!(
                    "subPackages[{}].pages[{}] is not a string, skipped",
                    index, page_index
                ));
                continue;
            };
            let joined = collapse_slashes(&format!("{}/{}", root, page));
            if !pages.contains(&joined) {
                pages.push(joined);
            }
        }
    }

    pages
}

/// Sibling config file: `index.tsx` -> `index.config.ts`, `app.js` -> `app.config.js`.
pub fn artifact_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = match source.extension().and_then(|e| e.to_str()) {
        Some("ts") | Some("tsx") => "ts",
        _ => "js",
    };
    source.with_file_name(format!("{}.config.{}", stem, ext))
}

/// `export default` followed by the config as 2-space JSON.
pub fn render_artifact(config: &ConfigValue) -> Result<String> {
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    Ok(format!("export default {}", json))
}

fn write_artifact<F: SourceFs + ?Sized>(fs: &F, artifact: &Artifact) -> Result<()> {
    fs.write_text(&artifact.output, &render_artifact(&artifact.config)?)
}

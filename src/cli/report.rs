//! Report formatting and printing utilities.
//!
//! Renders a [`MigrationOutcome`] step by step, with issues in cargo-style
//! format. Separate from core logic to allow taro-migrate to be used as a
//! library.

use std::{
    env,
    io::{self, Write},
};

use colored::Colorize;

use crate::core::context::MigrateContext;
use crate::core::migrate::{
    AppArtifacts, AppMigration, Artifact, FILE_MIGRATION_VERSION, MigrationOutcome,
    MigrationReport,
};
use crate::core::project::{BABEL_CONFIG_FILE, ProjectConfigInspection};
use crate::issues::{Issue, Report, Severity};

const MIGRATION_GUIDE_URL: &str = "https://nervjs.github.io/taro/docs/next/migration";

/// Status glyphs, with ASCII-safe fallbacks for legacy Windows consoles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSymbols {
    pub info: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
}

impl LogSymbols {
    pub const UNICODE: Self = Self {
        info: "ℹ",
        success: "✔",
        warning: "⚠",
        error: "✖",
    };

    pub const FALLBACK: Self = Self {
        info: "i",
        success: "√",
        warning: "‼",
        error: "×",
    };

    /// Symbols for the current terminal.
    pub fn detect() -> Self {
        Self::for_terminal(
            cfg!(windows),
            env::var_os("CI").is_some(),
            env::var("TERM").ok().as_deref(),
        )
    }

    pub fn for_terminal(windows: bool, ci: bool, term: Option<&str>) -> Self {
        if !windows || ci || term == Some("xterm-256color") {
            Self::UNICODE
        } else {
            Self::FALLBACK
        }
    }
}

/// How to render a migration outcome.
pub struct ReportOptions<'a> {
    pub ctx: &'a MigrateContext,
    pub dry_run: bool,
    pub symbols: LogSymbols,
}

/// Print a migration outcome to stdout, fatal messages to stderr.
pub fn print_outcome(outcome: &MigrationOutcome, options: &ReportOptions) {
    print_outcome_to(
        outcome,
        options,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a migration outcome to custom writers.
pub fn print_outcome_to<W: Write, E: Write>(
    outcome: &MigrationOutcome,
    options: &ReportOptions,
    out: &mut W,
    err: &mut E,
) {
    match outcome {
        MigrationOutcome::MissingPackageJson { expected } => {
            let _ = writeln!(
                err,
                "{}",
                format!(
                    "{} {} not found, please check the app root",
                    options.symbols.error,
                    options.ctx.display(expected)
                )
                .red()
            );
        }
        MigrationOutcome::Finished(report) => print_report(report, options, out, err),
    }
}

fn print_report<W: Write, E: Write>(
    report: &MigrationReport,
    options: &ReportOptions,
    out: &mut W,
    err: &mut E,
) {
    let symbols = options.symbols;
    let _ = writeln!(out, "Migrating to Taro {}...", report.target_version);
    let _ = writeln!(out);

    print_project_config(report.project_config.as_ref(), options, out);

    let Some(app) = &report.app else {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} file migration applies to Taro {} only, nothing else to do",
            symbols.info, FILE_MIGRATION_VERSION
        );
        return;
    };

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        format!("[2] Generate babel config {}", BABEL_CONFIG_FILE).underline()
    );
    if let Some(babel) = &report.babel_config {
        print_written(&options.ctx.display(babel), options, out);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "[3] Adjust app, page and component config".underline());

    match app {
        AppMigration::MissingEntry { expected } => {
            let _ = writeln!(
                err,
                "{}",
                format!(
                    "{} app entry {} not found, please check",
                    symbols.error,
                    options.ctx.display(expected)
                )
                .red()
            );
        }
        AppMigration::EntryParseFailed(issue) => {
            print_issue(&Issue::ParseError(issue.clone()), out);
            let _ = writeln!(
                err,
                "{}",
                format!(
                    "{} app entry {} could not be parsed, no config files generated",
                    symbols.error, issue.file_path
                )
                .red()
            );
        }
        AppMigration::Migrated(artifacts) => {
            print_artifacts(artifacts, options, out, err);
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{}",
                format!(
                    "{} Taro {} file migration finished. Source code was not changed, see the migration guide {}",
                    symbols.success, report.target_version, MIGRATION_GUIDE_URL
                )
                .green()
            );
        }
    }
}

fn print_project_config<W: Write>(
    inspection: Option<&ProjectConfigInspection>,
    options: &ReportOptions,
    out: &mut W,
) {
    let symbols = options.symbols;
    let ctx = options.ctx;
    let Some(inspection) = inspection else {
        let _ = writeln!(
            out,
            "{}",
            format!("[1] Project config: {}", ctx.config.project_config).underline()
        );
        let _ = writeln!(out, "{} no project config found, skipped", symbols.info);
        return;
    };

    let _ = writeln!(
        out,
        "{}",
        format!("[1] Project config: {}", ctx.display(&inspection.path)).underline()
    );
    if let Some(error) = &inspection.parse_error {
        let _ = writeln!(
            out,
            "{}",
            format!("{} project config could not be parsed: {}", symbols.warning, error).yellow()
        );
        return;
    }
    if inspection.advisories.is_empty() {
        let _ = writeln!(out, "{}", format!("{} nothing to adjust", symbols.success).green());
    }
    for advisory in &inspection.advisories {
        let _ = writeln!(
            out,
            "{}",
            format!("{} {}", symbols.warning, advisory.message(&ctx.config.framework)).yellow()
        );
    }
}

fn print_artifacts<W: Write, E: Write>(
    app: &AppArtifacts,
    options: &ReportOptions,
    out: &mut W,
    err: &mut E,
) {
    let ctx = options.ctx;
    let artifacts: Vec<&Artifact> = app.pages.iter().chain(std::iter::once(&app.entry)).collect();
    for artifact in artifacts {
        print_written(&ctx.display(&artifact.output), options, out);
    }
    for page in &app.ignored {
        let _ = writeln!(out, "{} {} ignored", options.symbols.info, page);
    }

    let shown: Vec<&Issue> = app
        .issues
        .iter()
        .filter(|issue| ctx.verbose || issue.is_prominent())
        .collect();
    if !shown.is_empty() {
        let _ = writeln!(out);
        report_to(&shown, out);
    }
    print_hidden_hint(app.issues.len() - shown.len(), err);
}

fn print_written<W: Write>(display: &str, options: &ReportOptions, out: &mut W) {
    if options.dry_run {
        let _ = writeln!(out, "{} Would generate {}", options.symbols.info, display);
    } else {
        let _ = writeln!(
            out,
            "{}",
            format!("{} Generated {}", options.symbols.success, display).green()
        );
    }
}

/// Print issues in cargo-style format, followed by a problem summary.
pub fn report_to<W: Write>(issues: &[&Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| a.file().cmp(b.file()));

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a hint about issues only shown with `--verbose`.
pub fn print_hidden_hint<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} recovered issue(s) not shown (use {} for details)",
            "note:".bold().cyan(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.file());

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[&Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} problems ({} {}, {} {})",
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

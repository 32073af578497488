//! Issue types for migration results.
//!
//! Issues are findings, not failures: every one of them was recovered from and
//! the migration carried on. Each issue carries what the reporter needs to
//! display it.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    InvalidEntryConfig,
    MissingPage,
    MissingComponent,
    ComponentCycle,
    NonLiteralConfig,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::InvalidEntryConfig => write!(f, "invalid-entry-config"),
            Rule::MissingPage => write!(f, "missing-page"),
            Rule::MissingComponent => write!(f, "missing-component"),
            Rule::ComponentCycle => write!(f, "component-cycle"),
            Rule::NonLiteralConfig => write!(f, "non-literal-config"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// File could not be parsed. The file is skipped; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// Entry config lacks a usable `pages` list, or lists non-string pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntryConfigIssue {
    pub file_path: String,
    pub reason: String,
}

/// A page listed by the entry does not resolve to a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPageIssue {
    /// Page as written in the entry config (e.g. `pages/index/index`).
    pub page: String,
    /// Logical path that was tried (without extension).
    pub tried: String,
}

/// A component referenced from a page or component does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingComponentIssue {
    /// File holding the reference (JSX import or `usingComponents`).
    pub file_path: String,
    /// Tag name or `usingComponents` key.
    pub name: String,
    /// Module specifier as written.
    pub specifier: String,
}

/// Component usage chain loops back onto a file already being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentCycleIssue {
    pub page_path: String,
    /// Files on the chain, starting and ending with the repeated file.
    pub chain: Vec<String>,
}

/// A config value could not be reduced to a literal and was omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonLiteralConfigIssue {
    pub file_path: String,
    /// Dotted key path of the omitted value (`window.title`, `pages[2]`).
    pub key_path: String,
    /// Short description of the offending expression kind.
    pub kind: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

impl InvalidEntryConfigIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::InvalidEntryConfig
    }
}

impl MissingPageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingPage
    }
}

impl MissingComponentIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingComponent
    }
}

impl ComponentCycleIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ComponentCycle
    }
}

impl NonLiteralConfigIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::NonLiteralConfig
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A finding recorded during migration.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    InvalidEntryConfig(InvalidEntryConfigIssue),
    MissingPage(MissingPageIssue),
    MissingComponent(MissingComponentIssue),
    ComponentCycle(ComponentCycleIssue),
    NonLiteralConfig(NonLiteralConfigIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    /// Issues the user sees without `--verbose`.
    ///
    /// Missing files, cycles and omitted config values are recovered silently;
    /// parse errors and a broken page list are always shown.
    pub fn is_prominent(&self) -> bool {
        matches!(self, Issue::ParseError(_) | Issue::InvalidEntryConfig(_))
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to the CLI.
#[enum_dispatch]
pub trait Report {
    /// File the issue belongs to.
    fn file(&self) -> &str;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for ParseErrorIssue {
    fn file(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        "file could not be parsed".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

impl Report for InvalidEntryConfigIssue {
    fn file(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.reason.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingPageIssue {
    fn file(&self) -> &str {
        &self.tried
    }

    fn message(&self) -> String {
        format!("page \"{}\" not found, skipped", self.page)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingComponentIssue {
    fn file(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!(
            "component \"{}\" ({}) not found, skipped",
            self.name, self.specifier
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ComponentCycleIssue {
    fn file(&self) -> &str {
        &self.page_path
    }

    fn message(&self) -> String {
        "component usage cycle, resolution truncated".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.chain.join(" -> "))
    }
}

impl Report for NonLiteralConfigIssue {
    fn file(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("config value at \"{}\" is not a literal, omitted", self.key_path)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("found {}", self.kind))
    }
}

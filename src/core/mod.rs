//! Core migration engine.
//!
//! - `context`: Merged settings for one run
//! - `fs`: Filesystem collaborator (real and dry-run)
//! - `parsers`: Source parsing (swc)
//! - `extract`: Per-file config extraction and component usage scanning
//! - `resolve`: Script path resolution and the component resolution graph
//! - `project`: Project build config inspection and babel scaffold
//! - `migrate`: Orchestrator producing a [`MigrationOutcome`]

pub mod context;
pub mod extract;
pub mod fs;
pub mod migrate;
pub mod parsers;
pub mod project;
pub mod resolve;

pub use context::MigrateContext;
pub use fs::{DryRunFs, OsFs, SourceFs};
pub use migrate::{
    AppArtifacts, AppMigration, Artifact, MigrationOutcome, MigrationReport, migrate_project,
};

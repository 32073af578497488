//! Per-file extraction.
//!
//! - `builtin`: Framework component names excluded from custom component detection
//! - `reducer`: Literal object reducer (AST literal -> `ConfigValue`)
//! - `scanner`: Single-pass module scanner (config, imports, JSX usages)

pub mod builtin;
pub mod reducer;
pub mod scanner;

use std::{io, path::Path};

pub use builtin::{BUILTIN_COMPONENTS, is_builtin_component};
pub use reducer::{ConfigValue, NonLiteralValue, Reduced, reduce_config};
pub use scanner::{CustomComponent, ModuleScan, scan_module};

use crate::core::fs::SourceFs;
use crate::core::parsers::jsx::parse_jsx_source;

/// Outcome of scanning one source file.
#[derive(Debug)]
pub enum FileScan {
    Scanned(ModuleScan),
    /// The file could not be read or is not valid source; carries the reason.
    ParseFailed(String),
}

/// Read, parse and scan a file. The syntax tree is dropped before returning.
///
/// Unreadable files end up as `ParseFailed` so one bad file never stops the run.
pub fn scan_file<F: SourceFs + ?Sized>(fs: &F, path: &Path) -> FileScan {
    let code = match fs.read_text(path) {
        Ok(code) => code,
        Err(err) => return FileScan::ParseFailed(read_failure(&err)),
    };
    match parse_jsx_source(code, &path.to_string_lossy()) {
        Ok(module) => FileScan::Scanned(scan_module(&module)),
        Err(err) => FileScan::ParseFailed(err.to_string()),
    }
}

fn read_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<io::Error>() {
        Some(io_err) if io_err.kind() == io::ErrorKind::InvalidData => {
            "file is not valid UTF-8".to_string()
        }
        Some(io_err) => format!("file could not be read: {}", io_err),
        None => format!("{:#}", err),
    }
}

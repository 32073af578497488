//! Source file resolution for logical module paths.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::core::fs::SourceFs;
use crate::utils::normalize_path;

/// Script extensions, in lookup order.
pub const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx"];

/// Resolve a logical module path (possibly extensionless, possibly a
/// directory) to a concrete source file.
///
/// Lookup order:
/// 1. the path itself, if it is a file
/// 2. for each extension: `path.<platform><ext>` (when a platform is set), then `path<ext>`
/// 3. for each extension: `path/index.<platform><ext>`, then `path/index<ext>`
pub fn resolve_script_path<F: SourceFs + ?Sized>(
    fs: &F,
    logical: &Path,
    platform: Option<&str>,
) -> Option<PathBuf> {
    let logical = normalize_path(logical);
    if fs.is_file(&logical) {
        return Some(logical);
    }

    for ext in SCRIPT_EXTENSIONS {
        if let Some(platform) = platform {
            let candidate = with_suffix(&logical, &format!(".{}{}", platform, ext));
            if fs.is_file(&candidate) {
                return Some(candidate);
            }
        }
        let candidate = with_suffix(&logical, ext);
        if fs.is_file(&candidate) {
            return Some(candidate);
        }
    }

    for ext in SCRIPT_EXTENSIONS {
        if let Some(platform) = platform {
            let candidate = logical.join(format!("index.{}{}", platform, ext));
            if fs.is_file(&candidate) {
                return Some(candidate);
            }
        }
        let candidate = logical.join(format!("index{}", ext));
        if fs.is_file(&candidate) {
            return Some(candidate);
        }
    }

    None
}

/// Append a raw suffix to the last path component (`a/b` + `.ts` = `a/b.ts`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

//! Path algebra shared across the codebase.
//!
//! Paths are normalized lexically (no filesystem access) so that relativization
//! between a page and a component is stable regardless of how the paths were built.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static DUPLICATE_SLASHES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/{2,}").unwrap());

/// Collapses runs of `/` into a single separator.
///
/// # Examples
///
/// ```
/// use taro_migrate::utils::collapse_slashes;
///
/// assert_eq!(collapse_slashes("pkgA//pages/a"), "pkgA/pages/a");
/// assert_eq!(collapse_slashes("pkgA/pages/a"), "pkgA/pages/a");
/// ```
pub fn collapse_slashes(path: &str) -> String {
    DUPLICATE_SLASHES_REGEX.replace_all(path, "/").into_owned()
}

/// Resolves `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the root of an absolute path is dropped;
/// leading `..` components of a relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Expresses `target` relative to the directory `from_dir`.
///
/// Both paths are normalized first; they are expected to share the same base
/// (both absolute, or both relative to the same directory).
pub fn relative_path(from_dir: &Path, target: &Path) -> PathBuf {
    let from_dir = normalize_path(from_dir);
    let target = normalize_path(target);
    let from: Vec<Component> = from_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Builds the canonical module reference from `from_dir` to the file `target`.
///
/// The result uses `/` separators, has the file extension removed, and always
/// starts with `./` or `../`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use taro_migrate::utils::module_reference;
///
/// assert_eq!(
///     module_reference(Path::new("/app/src/pages/index"), Path::new("/app/src/comp/bar.tsx")),
///     "../../comp/bar"
/// );
/// assert_eq!(
///     module_reference(Path::new("/app/src/pages/index"), Path::new("/app/src/pages/index/card.js")),
///     "./card"
/// );
/// ```
pub fn module_reference(from_dir: &Path, target: &Path) -> String {
    let relative = relative_path(from_dir, target).with_extension("");
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    promote_relative(&joined)
}

/// Ensures a `/`-separated relative path starts with `./` or `../`.
pub fn promote_relative(path: &str) -> String {
    if path.starts_with("../") || path.starts_with("./") || path == ".." {
        path.to_string()
    } else {
        format!("./{}", path)
    }
}

/// Returns true for import specifiers that point into the project (`./x`, `../x`).
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Path shown to the user: relative to `root` when possible, `/`-separated.
pub fn display_path(root: &Path, path: &Path) -> String {
    let shown = path.strip_prefix(root).unwrap_or(path);
    shown.to_string_lossy().replace('\\', "/")
}

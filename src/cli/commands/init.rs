//! `init`: scaffold a default config file in the current directory.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::LogSymbols;
use crate::config::{CONFIG_FILE_NAME, default_config_json};
use crate::core::fs::{OsFs, SourceFs};

pub fn init() -> Result<ExitStatus> {
    if !write_default_config(&OsFs, Path::new(CONFIG_FILE_NAME))? {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    let symbols = LogSymbols::detect();
    println!(
        "{} {}",
        symbols.success.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    Ok(ExitStatus::Success)
}

/// Returns `false` without writing when `path` is already taken.
fn write_default_config<F: SourceFs + ?Sized>(fs: &F, path: &Path) -> Result<bool> {
    if fs.exists(path) {
        return Ok(false);
    }
    fs.write_text(path, &default_config_json()?)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::fs::DryRunFs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_writes_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert!(write_default_config(&OsFs, &path).unwrap());
        let config: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config.entry, "app");
    }

    #[test]
    fn test_existing_config_is_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ \"entry\": \"main\" }").unwrap();

        let dry_run = DryRunFs::new();
        assert!(!write_default_config(&dry_run, &path).unwrap());
        assert!(dry_run.writes().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"entry\": \"main\" }");
    }
}

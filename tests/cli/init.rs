use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .taromigraterc.json"));

    let content = test.read_file(".taromigraterc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceRoot"], "src");
    assert_eq!(parsed["entry"], "app");
    assert_eq!(parsed["projectConfig"], "config/index");
    assert_eq!(parsed["framework"], "nerv");
    assert!(
        content.contains("\n  \"sourceRoot\""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".taromigraterc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".taromigraterc.json already exists"));
    assert_eq!(test.read_file(".taromigraterc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::project()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/app.js",
        "export default class App { config = { pages: [] } }",
    )?;

    let output = test.migrate_command().output()?;
    assert!(
        output.status.success(),
        "Migrate should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.exists("src/app.config.js"));

    Ok(())
}

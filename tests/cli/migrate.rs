use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const APP: &str = r#"
import { Component } from '@tarojs/taro'

export default class App extends Component {
  config = {
    pages: ['pages/index/index', 'pkg/pages/detail/detail'],
    subPackages: [
      { root: 'pkg', pages: ['pages/detail/detail', 'pages/more/more'] }
    ],
    window: { navigationBarTitleText: 'Demo' }
  }

  render () {
    return this.props.children
  }
}
"#;

const INDEX_PAGE: &str = r#"
import { View } from '@tarojs/components'
import Card from '../../components/card'

export default function Index () {
  return <View><Card /></View>
}

Index.config = { navigationBarTitleText: 'Home' }
"#;

const CARD: &str = r#"
import Avatar from './avatar'

export default function Card () {
  return <Avatar />
}

Card.config = {
  usingComponents: { 'ec-canvas': '../native/ec-canvas/ec-canvas' }
}
"#;

fn demo_project() -> Result<CliTest> {
    let test = CliTest::project()?;
    test.write_file("src/app.tsx", APP)?;
    test.write_file("src/pages/index/index.tsx", INDEX_PAGE)?;
    test.write_file("src/components/card.tsx", CARD)?;
    test.write_file(
        "src/components/avatar.tsx",
        "export default function Avatar () { return null }",
    )?;
    test.write_file("src/native/ec-canvas/ec-canvas.js", "Component({})")?;
    test.write_file(
        "src/pkg/pages/detail/detail.tsx",
        "export default function Detail () { return null }",
    )?;
    test.write_file(
        "src/pkg/pages/more/more.jsx",
        "export default function More () { return null }",
    )?;
    Ok(test)
}

#[test]
fn test_migrate_writes_config_artifacts() -> Result<()> {
    let test = demo_project()?;

    let output = test.migrate_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Migrating to Taro 3..."));
    assert!(out.contains("✔ Generated babel.config.js"));
    assert!(out.contains("✔ Generated src/pages/index/index.config.ts"));
    assert!(out.contains("✔ Generated src/pkg/pages/more/more.config.js"));
    assert!(out.contains("✔ Generated src/app.config.ts"));

    assert_eq!(
        test.read_file("src/pages/index/index.config.ts")?,
        r#"export default {
  "navigationBarTitleText": "Home",
  "usingComponents": {
    "ec-canvas": "../../native/ec-canvas/ec-canvas"
  }
}"#
    );
    assert_eq!(
        test.read_file("src/pkg/pages/detail/detail.config.ts")?,
        "export default {}"
    );
    let app_config = test.read_file("src/app.config.ts")?;
    assert!(app_config.starts_with("export default {\n  \"pages\": ["));
    assert!(app_config.contains("\"navigationBarTitleText\": \"Demo\""));

    let babel = test.read_file("babel.config.js")?;
    assert!(babel.contains("ts: false"));

    Ok(())
}

#[test]
fn test_migrate_without_package_json() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app.js", APP)?;

    let output = test.migrate_command().output()?;
    assert!(output.status.success());
    assert!(stderr(&output).contains("package.json not found"));
    assert!(!test.exists("babel.config.js"));
    assert!(!test.exists("src/app.config.js"));

    Ok(())
}

#[test]
fn test_migrate_without_entry() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file("src/pages/index/index.tsx", INDEX_PAGE)?;

    let output = test.migrate_command().output()?;
    assert!(output.status.success());
    assert!(stderr(&output).contains("app entry src/app not found"));
    assert!(!test.exists("src/pages/index/index.config.ts"));

    Ok(())
}

#[test]
fn test_dry_run_lists_without_writing() -> Result<()> {
    let test = demo_project()?;

    let output = test.migrate_command().arg("--dry-run").output()?;
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("ℹ Would generate babel.config.js"));
    assert!(out.contains("ℹ Would generate src/app.config.ts"));
    assert!(!test.exists("babel.config.js"));
    assert!(!test.exists("src/app.config.ts"));
    assert!(!test.exists("src/pages/index/index.config.ts"));

    Ok(())
}

#[test]
fn test_recovered_issues_need_verbose() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file(
        "src/app.js",
        "export default class App { config = { pages: ['pages/gone/gone'] } }",
    )?;

    let output = test.migrate_command().output()?;
    assert!(output.status.success());
    assert!(!stdout(&output).contains("missing-page"));
    assert!(stderr(&output).contains("1 recovered issue(s) not shown"));

    let output = test.migrate_command().arg("-v").output()?;
    let out = stdout(&output);
    assert!(out.contains("warning: page \"pages/gone/gone\" not found, skipped  missing-page"));
    assert!(out.contains("--> src/pages/gone/gone"));

    Ok(())
}

#[test]
fn test_parse_errors_are_always_shown() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file(
        "src/app.js",
        "export default class App { config = { pages: ['pages/index/index'] } }",
    )?;
    test.write_file("src/pages/index/index.js", "export default function (")?;

    let output = test.migrate_command().output()?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("error: file could not be parsed  parse-error"));
    assert!(out.contains("--> src/pages/index/index.js"));
    assert!(!test.exists("src/pages/index/index.config.js"));
    assert!(test.exists("src/app.config.js"));

    Ok(())
}

#[test]
fn test_target_version_two_only_inspects_project_config() -> Result<()> {
    let test = demo_project()?;
    test.write_file(
        "config/index.js",
        "const config = { weapp: { module: {} } }\nmodule.exports = function (merge) { return merge({}, config) }",
    )?;

    let output = test
        .migrate_command()
        .args(["--target-version", "2"])
        .output()?;
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("[1] Project config: config/index.js"));
    assert!(out.contains("renamed to \"mini\""));
    assert!(out.contains("file migration applies to Taro 3 only"));
    assert!(!test.exists("babel.config.js"));
    assert!(!test.exists("src/app.config.ts"));

    Ok(())
}

#[test]
fn test_source_root_and_platform_flags() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file(
        "client/app.js",
        "export default class App { config = { pages: ['pages/index/index'] } }",
    )?;
    test.write_file(
        "client/pages/index/index.js",
        "export default function Index () {}\nIndex.config = { title: 'any' }",
    )?;
    test.write_file(
        "client/pages/index/index.weapp.js",
        "export default function Index () {}\nIndex.config = { title: 'weapp' }",
    )?;

    let output = test
        .migrate_command()
        .args(["--source-root", "client", "--platform", "weapp"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("client/pages/index/index.weapp.config.js")?,
        "export default {\n  \"title\": \"weapp\"\n}"
    );
    assert!(!test.exists("client/pages/index/index.config.js"));

    Ok(())
}

#[test]
fn test_config_file_is_respected() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file(
        ".taromigraterc.json",
        r#"{ "sourceRoot": "app/src", "entry": "main", "ignores": ["pages/legacy/**"] }"#,
    )?;
    test.write_file(
        "app/src/main.js",
        "export default class Main { config = { pages: ['pages/legacy/old', 'pages/new/new'] } }",
    )?;
    test.write_file("app/src/pages/legacy/old.js", "export default function Old () {}")?;
    test.write_file("app/src/pages/new/new.js", "export default function New () {}")?;

    let output = test.migrate_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("ℹ pages/legacy/old ignored"));
    assert!(test.exists("app/src/main.config.js"));
    assert!(test.exists("app/src/pages/new/new.config.js"));
    assert!(!test.exists("app/src/pages/legacy/old.config.js"));

    Ok(())
}

#[test]
fn test_invalid_config_file_is_an_error() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file(".taromigraterc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.migrate_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    assert!(stderr(&output).contains("ignores"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("migrate"));

    Ok(())
}

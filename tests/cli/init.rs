use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["translationsRoot"], "./translations");
    assert!(parsed["ignores"].is_array());
    assert!(parsed["ignoreTexts"].is_array());
    assert_eq!(parsed["checkObsolete"], false);

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .tsglotrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".tsglotrc.json").exists());
    assert_config_content(&test.read_file(".tsglotrc.json")?)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".tsglotrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ .tsglotrc.json already exists

    ----- stderr -----
    ");

    assert_eq!(test.read_file(".tsglotrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_then_check() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    test.run(cmd)?;

    let output = test.run(test.check_command())?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Checked 0 catalogue files"));

    Ok(())
}

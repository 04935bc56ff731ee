use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, IT_CLEAN};

fn lookup_command(test: &CliTest, args: &[&str]) -> std::process::Command {
    let mut cmd = test.command();
    cmd.args(["lookup", "translations/drawpile_it.ts"]);
    cmd.args(args);
    cmd
}

#[test]
fn test_lookup_translated() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_CLEAN)?;

    assert_cmd_snapshot!(lookup_command(&test, &["docks::Navigator", "Navigator"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Navigatore

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_lookup_numerus() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_CLEAN)?;

    assert_cmd_snapshot!(lookup_command(&test, &["docks::LayerList", "%n layer(s)", "-n", "1"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    1 livello

    ----- stderr -----
    ");
    assert_cmd_snapshot!(lookup_command(&test, &["docks::LayerList", "%n layer(s)", "-n", "12"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    12 livelli

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_lookup_falls_back_to_source() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_CLEAN)?;

    assert_cmd_snapshot!(lookup_command(&test, &["MainWindow", "Navigator"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Navigator

    ----- stderr -----
    ");

    // Verbose mode explains the fallback on stderr.
    let output = test.run(lookup_command(&test, &["MainWindow", "Navigator", "-v"]))?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Navigator\n");
    assert!(output.stderr.contains("Not translated"));
    Ok(())
}

#[test]
fn test_lookup_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(lookup_command(&test, &["docks::Navigator", "Navigator"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to read TS file: "translations/drawpile_it.ts": No such file or directory (os error 2)
    "#);

    Ok(())
}

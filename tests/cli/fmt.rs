use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, IT_CLEAN};

const IT_COMPACT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="it_IT">
<context><name>docks::Navigator</name>
<message><location filename="../src/desktop/docks/navigator.cpp" line="354"/><source>Navigator</source><translation>Navigatore</translation></message>
<message><source>Zoom: %1%</source><translation>Ingrandimento: %1%</translation></message>
</context>
<context><name>docks::LayerList</name>
<message numerus="yes"><source>%n layer(s)</source><translation><numerusform>%n livello</numerusform><numerusform>%n livelli</numerusform></translation></message>
</context>
</TS>
"#;

#[test]
fn test_fmt_dry_run() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_COMPACT)?;

    let mut cmd = test.command();
    cmd.arg("fmt");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Would reformat 1 file(s):
      - ./translations/drawpile_it.ts
    Run with --apply to rewrite these files.

    ----- stderr -----
    ");

    assert_eq!(test.read_file("translations/drawpile_it.ts")?, IT_COMPACT);
    Ok(())
}

#[test]
fn test_fmt_apply() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_COMPACT)?;

    let mut cmd = test.command();
    cmd.args(["fmt", "--apply"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Reformatted 1 file(s):
      - ./translations/drawpile_it.ts

    ----- stderr -----
    ");

    assert_eq!(test.read_file("translations/drawpile_it.ts")?, IT_CLEAN);
    Ok(())
}

#[test]
fn test_fmt_already_formatted() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_CLEAN)?;

    let mut cmd = test.command();
    cmd.arg("fmt");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ 1 catalogue file(s) already formatted

    ----- stderr -----
    ");

    Ok(())
}

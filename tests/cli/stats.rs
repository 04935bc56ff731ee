use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, IT_CLEAN};

const DE_PARTIAL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="de_DE">
<context>
    <name>docks::Navigator</name>
    <message>
        <source>Navigator</source>
        <translation>Navigator</translation>
    </message>
    <message>
        <source>Reset</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Old</source>
        <translation type="vanished">Alt</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_stats_table() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_CLEAN)?;
    test.write_file("translations/drawpile_de.ts", DE_PARTIAL)?;

    let mut cmd = test.command();
    cmd.arg("stats");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    File                           Language  Finished  Unfinished  Obsolete  Complete
    ./translations/drawpile_de.ts  de_DE            1           1         1     50.0%
    ./translations/drawpile_it.ts  it_IT            3           0         0    100.0%
    Total                                           4           1         1     80.0%

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_stats_single_catalogue_has_no_total() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_de.ts", DE_PARTIAL)?;

    let mut cmd = test.command();
    cmd.arg("stats");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    File                           Language  Finished  Unfinished  Obsolete  Complete
    ./translations/drawpile_de.ts  de_DE            1           1         1     50.0%

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_stats_without_catalogues() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("stats");
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "No catalogue files found.\n");
    assert!(output.stderr.contains("Translations root does not exist"));
    Ok(())
}

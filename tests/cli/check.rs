use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, IT_CLEAN};

const IT_BROKEN: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="it_IT">
<context>
    <name>dialogs::JoinDialog</name>
    <message>
        <source>Joining %1 as %2</source>
        <translation>Connessione a %1</translation>
    </message>
    <message>
        <source>Session</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Password</source>
        <translation></translation>
    </message>
    <message>
        <source>Tablet</source>
        <translation>Tablet</translation>
    </message>
</context>
<context>
    <name>docks::LayerList</name>
    <message numerus="yes">
        <source>%n layer(s)</source>
        <translation>
            <numerusform>%n livelli</numerusform>
        </translation>
    </message>
</context>
</TS>
"#;

const UNTAGGED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1">
<context>
    <name>MainWindow</name>
    <message>
        <source>Open</source>
        <translation>Apri</translation>
    </message>
    <message>
        <source>Open</source>
        <translation>Apri</translation>
    </message>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n file</numerusform>
            <numerusform>%n file</numerusform>
        </translation>
    </message>
</context>
<context>
    <name>MainWindow</name>
</context>
</TS>
"#;

#[test]
fn test_check_clean_catalogue() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_CLEAN)?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalogue file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_reports_issues() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_BROKEN)?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Joining %1 as %2"  placeholder-mismatch
      --> ./translations/drawpile_it.ts:6:1
       = context: dialogs::JoinDialog
       = note: missing %2

    warning: "Session"  unfinished
      --> ./translations/drawpile_it.ts:10:1
       = context: dialogs::JoinDialog

    error: "Password"  empty-translation
      --> ./translations/drawpile_it.ts:14:1
       = context: dialogs::JoinDialog
       = note: translation is marked finished but empty
       = hint: translate it or mark it type="unfinished"

    warning: "Tablet"  identical
      --> ./translations/drawpile_it.ts:18:1
       = context: dialogs::JoinDialog
       = hint: add the text to "ignoreTexts" if it needs no translation

    error: "%n layer(s)"  numerus-mismatch
      --> ./translations/drawpile_it.ts:25:1
       = context: docks::LayerList
       = note: it_IT needs 2 numerus form(s), found 1

    ✘ 5 problems (3 errors, 2 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_selected_rules() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_BROKEN)?;

    // Warnings alone do not fail the run.
    let mut cmd = test.check_command();
    cmd.arg("unfinished");
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "Session"  unfinished
      --> ./translations/drawpile_it.ts:10:1
       = context: dialogs::JoinDialog

    ✘ 1 problems (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_duplicates_and_missing_language() -> Result<()> {
    let test = CliTest::with_file("translations/strings.ts", UNTAGGED)?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: "missing language attribute"  unknown-language
      --> ./translations/strings.ts
       = note: numerus forms cannot be checked

    error: "Open"  duplicate-message
      --> ./translations/strings.ts:10:1
       = context: MainWindow
       = note: first defined at line 6

    error: "MainWindow"  duplicate-context
      --> ./translations/strings.ts:22:1
       = note: first defined at line 4

    ✘ 3 problems (2 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_ignore_texts_from_config() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_BROKEN)?;
    test.write_file(".tsglotrc.json", r#"{ "ignoreTexts": ["Tablet"] }"#)?;

    let mut cmd = test.check_command();
    cmd.arg("identical");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalogue file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_parse_error_does_not_abort() -> Result<()> {
    let test = CliTest::with_file("translations/drawpile_it.ts", IT_CLEAN)?;
    test.write_file(
        "translations/drawpile_de.ts",
        "<TS version=\"2.1\" language=\"de\">\n<context>\n<lengthvariant/>\n</context>\n</TS>\n",
    )?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "unexpected <lengthvariant> inside <context> at line 3"  parse-error
      --> ./translations/drawpile_de.ts:3:1

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_translations_root_override() -> Result<()> {
    let test = CliTest::with_file("src/i18n/drawpile_it.ts", IT_BROKEN)?;

    let mut cmd = test.check_command();
    cmd.args(["--translations-root", "src/i18n", "empty-translation"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Password"  empty-translation
      --> src/i18n/drawpile_it.ts:14:1
       = context: dialogs::JoinDialog
       = note: translation is marked finished but empty
       = hint: translate it or mark it type="unfinished"

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_project_root_argument() -> Result<()> {
    let test = CliTest::with_file("app/translations/drawpile_it.ts", IT_BROKEN)?;
    let root = test.root().join("app");

    let mut cmd = test.check_command();
    cmd.arg("--root").arg(&root).arg("unfinished");

    let root_pattern = regex::escape(&root.display().to_string());
    insta::with_settings!({ filters => vec![(root_pattern.as_str(), "[ROOT]")] }, {
        assert_cmd_snapshot!(cmd, @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        warning: "Session"  unfinished
          --> [ROOT]/translations/drawpile_it.ts:10:1
           = context: dialogs::JoinDialog

        ✘ 1 problems (0 errors, 1 warning)

        ----- stderr -----
        "#);
    });

    Ok(())
}

#[test]
fn test_check_invalid_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tsglotrc.json", r#"{ "ignores": ["**/[old"] }"#)?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Invalid glob pattern in 'ignores'"));
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(0));
    for command in ["check", "stats", "lookup", "fmt", "init"] {
        assert!(output.stdout.contains(command));
    }
    Ok(())
}

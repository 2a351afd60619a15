use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, run};

const CLEAN_CATALOG: &str = r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

#: library/os.rst:10
msgid "Hello world"
msgstr "Bonjour le monde"
"#;

const DOUBLE_SPACE_CATALOG: &str = r#"#: library/os.rst:10
msgid "Hello world"
msgstr "Bonjour le monde"

#: library/os.rst:20
msgid "Hello again"
msgstr "Bonjour  encore"
"#;

const NBSP_CATALOG: &str = r#"#: library/os.rst:10
msgid "Example:"
msgstr "Exemple:"

#: library/os.rst:20
#, fuzzy
msgid "Hello"
msgstr "Bonjour"
"#;

#[test]
fn test_clean_catalog() -> Result<()> {
    let test = CliTest::with_file("fr/os.po", CLEAN_CATALOG)?;

    let output = run(&mut test.check_command())?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("✓ Checked 1 catalog - no issues found"));

    Ok(())
}

#[test]
fn test_warnings_do_not_fail() -> Result<()> {
    let test = CliTest::with_file("fr/os.po", DOUBLE_SPACE_CATALOG)?;

    let output = run(&mut test.check_command())?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains(
        "warning: Double spaces detected between ###Bonjour### and ###encore###  Double space"
    ));
    assert!(output.stdout.contains("fr/os.po:5"));
    assert!(output.stdout.contains("1 problems (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_errors_fail() -> Result<()> {
    let test = CliTest::with_file("fr/os.po", NBSP_CATALOG)?;

    let output = run(test.check_command().arg("fr/os.po"))?;
    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stdout
            .contains(r#"error: There should be a non-breakable space before ":""#)
    );
    assert!(output.stdout.contains("--> fr/os.po:1"));
    assert!(output.stdout.contains("This entry is tagged as fuzzy."));
    assert!(output.stdout.contains("2 problems (1 error, 1 warning)"));

    Ok(())
}

#[test]
fn test_regular_space_before_colon_fails() -> Result<()> {
    let test = CliTest::with_file(
        "fr.po",
        "#: a.rst:1\nmsgid \"Example:\"\nmsgstr \"Exemple : voici\"\n",
    )?;

    let output = run(&mut test.check_command())?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("###Exemple ### and ###: voici###"));

    let test = CliTest::with_file(
        "fr.po",
        "#: a.rst:1\nmsgid \"Example:\"\nmsgstr \"Exemple\u{a0}: voici\"\n",
    )?;
    let output = run(&mut test.check_command())?;
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let test = CliTest::with_file("fr/os.po", NBSP_CATALOG)?;

    let output = run(test.check_command().args(["--format", "json", "fr"]))?;
    assert_eq!(output.code, Some(1));

    let report: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["filesChecked"], 1);
    assert_eq!(report["errorCount"], 1);
    assert_eq!(report["warningCount"], 1);
    assert_eq!(report["issues"][0]["checker"], "NBSP");
    assert_eq!(report["issues"][0]["line"], 1);
    assert_eq!(report["issues"][1]["checker"], "Fuzzy");
    assert_eq!(report["issues"][1]["line"], 5);

    Ok(())
}

#[test]
fn test_diff_restricts_report() -> Result<()> {
    let test = CliTest::with_file("fr/os.po", NBSP_CATALOG)?;
    // Lines 8 to 11 of the new file changed: only the fuzzy entry (5-8) is touched.
    test.write_file(
        "pr.diff",
        "diff --git a/fr/os.po b/fr/os.po\n--- a/fr/os.po\n+++ b/fr/os.po\n@@ -5,4 +5,10 @@\n #: library/os.rst:20\n",
    )?;

    let output = run(test.check_command().args(["--diff", "pr.diff"]))?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("This entry is tagged as fuzzy."));
    assert!(!output.stdout.contains("non-breakable"));

    Ok(())
}

#[test]
fn test_diff_without_matching_file() -> Result<()> {
    let test = CliTest::with_file("fr/os.po", NBSP_CATALOG)?;
    test.write_file(
        "pr.diff",
        "--- a/fr/other.po\n+++ b/fr/other.po\n@@ -1,10 +1,10 @@\n",
    )?;

    let output = run(test.check_command().args(["--diff", "pr.diff", "fr"]))?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("(changed entries only)"));

    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let test = CliTest::with_file("fr/a.po", CLEAN_CATALOG)?;
    test.write_file("fr/b.po", "#: x\nmsgfoo \"\"\n")?;

    let output = run(test.check_command().arg("fr"))?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("unknown keyword `msgfoo`"));
    assert!(output.stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_config_line_length() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".polintrc.json", r#"{ "maxLineLength": 20 }"#)?;
    test.write_file(
        "fr.po",
        "#: a.rst:1\nmsgid \"Hello\"\nmsgstr \"Bonjour tout le monde et les autres\"\n",
    )?;

    let output = run(&mut test.check_command())?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("Line too long (37 > 20)"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".polintrc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;
    test.write_file("generated/fr.po", NBSP_CATALOG)?;
    test.write_file("fr.po", CLEAN_CATALOG)?;

    let output = run(&mut test.check_command())?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Checked 1 catalog"));

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".polintrc.json", r#"{ "maxLineLength": 1 }"#)?;

    let output = run(&mut test.check_command())?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("maxLineLength"));

    Ok(())
}

#[test]
fn test_missing_diff_file() -> Result<()> {
    let test = CliTest::with_file("fr.po", CLEAN_CATALOG)?;

    let output = run(test.check_command().args(["--diff", "missing.diff"]))?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read diff file"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().arg("--help"))?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("check"));
    assert!(output.stdout.contains("init"));

    Ok(())
}

use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["maxLineLength"], 79);
    assert!(
        parsed.get("ignores").is_some(),
        "Config should have 'ignores' field"
    );
    assert_eq!(parsed["grammar"]["program"], "grammalecte-cli.py");
    assert_eq!(parsed["personalWords"][0], "HMAC");

    // Pretty printed with 2-space indentation
    assert!(content.contains("\n  \"ignores\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().arg("init"))?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created .polintrc.json"));

    assert!(test.root().join(".polintrc.json").exists());
    let content = test.read_file(".polintrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".polintrc.json", "{}")?;

    let output = run(test.command().arg("init"))?;
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains(".polintrc.json already exists"));
    assert_eq!(test.read_file(".polintrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_used_by_check() -> Result<()> {
    let test = CliTest::new()?;
    run(test.command().arg("init"))?;
    test.write_file(
        "fr.po",
        "#: a.rst:1\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n",
    )?;

    let output = run(&mut test.check_command())?;
    assert_eq!(output.code, Some(0));

    Ok(())
}

use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "modelRoot",
        "includes",
        "ignores",
        "outputRoot",
        "strictMarkers",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{field}' field");
    }
    assert_eq!(parsed["strictMarkers"], Value::Bool(false));

    // Pretty-printed with 2-space indentation
    assert!(content.contains("\n  \"modelRoot\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "✓ Created .viewbindrc.json\n"
    );
    assert!(test.root().join(".viewbindrc.json").exists());

    let content = test.read_file(".viewbindrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".viewbindrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "Error: .viewbindrc.json already exists\n"
    );
    assert_eq!(test.read_file(".viewbindrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "build/viewbind/app.viewbind.json",
        r#"{ "classes": [{ "name": "Main", "package": "app", "contentView": 1 }] }"#,
    )?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "Generate should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(test.read_generated("app.Main_ViewBinding").is_ok());

    Ok(())
}

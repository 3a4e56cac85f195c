use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["project", "outputDir", "templatesPath", "compact", "showIds"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["compact"], Value::Bool(true));
    assert_eq!(parsed["outputDir"], Value::from("_build/gettext"));

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .potgenrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".potgenrc.json").exists());
    let content = test.read_file(".potgenrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".potgenrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ .potgenrc.json already exists
    ");
    assert_eq!(test.read_file(".potgenrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "index.doctree.json",
        r#"{ "source": "index.rst", "body": [{ "type": "paragraph", "text": "Hello", "line": 1 }] }"#,
    )?;

    let output = test.build_command().output()?;
    assert!(
        output.status.success(),
        "Build should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(test.root().join("_build/gettext/index.pot").exists());

    Ok(())
}

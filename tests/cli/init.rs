use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stdout_json};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "version",
        "features",
        "ignoredVisibilities",
        "includeSourceLocations",
        "includes",
        "ignores",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{field}' field");
    }
    assert_eq!(parsed["ignoredVisibilities"], serde_json::json!(["private", "protected"]));

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created .sveltedocrc.json"));

    assert!(test.root().join(".sveltedocrc.json").exists());
    let content = test.read_file(".sveltedocrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".sveltedocrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(test.read_file(".sveltedocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/Hello.svelte",
        "<script>\n/** Who to greet. */\nexport let name = 'world';\n</script>\n<h1>Hello {name}!</h1>",
    )?;

    let output = test.parse_command().output()?;
    assert!(
        output.status.success(),
        "Parse should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let document = stdout_json(&output)?;
    assert_eq!(document["name"], "Hello");
    assert_eq!(document["data"][0]["description"], "Who to greet.");

    Ok(())
}

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stdout_json};

const BUTTON: &str = r#"<script>
    import { createEventDispatcher } from 'svelte';

    const dispatch = createEventDispatcher();

    /** Text shown on the button. */
    export let label = 'Click';

    let pressed = false;

    /**
     * Press the button.
     * @param {boolean} silent - skip the press event
     */
    export function press(silent = false) {
        pressed = true;
        if (!silent) dispatch('press');
    }
</script>

<button on:click={() => press()}><slot>{label}</slot></button>
"#;

#[test]
fn test_single_file_prints_bare_document() -> Result<()> {
    let test = CliTest::with_file("src/Button.svelte", BUTTON)?;

    let output = test.parse_command().arg("src/Button.svelte").output()?;
    assert!(output.status.success());

    let document = stdout_json(&output)?;
    assert_eq!(document["version"], 3);
    assert_eq!(document["name"], "Button");

    let data = document["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(data.len(), 1, "private 'pressed' should be hidden");
    assert_eq!(data[0]["name"], "label");
    assert_eq!(data[0]["description"], "Text shown on the button.");
    assert_eq!(data[0]["type"]["text"], "string");
    assert_eq!(data[0]["visibility"], "public");

    let method = &document["methods"][0];
    assert_eq!(method["name"], "press");
    assert_eq!(method["params"][0]["name"], "silent");
    assert_eq!(method["params"][0]["optional"], true);
    assert_eq!(method["params"][0]["description"], "skip the press event");

    assert_eq!(document["events"][0]["name"], "press");
    assert_eq!(document["slots"][0]["name"], "default");

    Ok(())
}

#[test]
fn test_directory_prints_documents_keyed_by_path() -> Result<()> {
    let test = CliTest::with_file("src/Button.svelte", BUTTON)?;
    test.write_file(
        "src/forms/Field.svelte",
        "<script>\nexport let value = 0;\n</script>\n<input bind:value>",
    )?;
    test.write_file("src/forms/helpers.js", "export const x = 1;")?;

    let output = test.parse_command().arg("src").output()?;
    assert!(output.status.success());

    let documents = stdout_json(&output)?;
    let keys: Vec<&String> = documents
        .as_object()
        .map(|map| map.keys().collect())
        .unwrap_or_default();
    assert_eq!(keys, vec!["src/Button.svelte", "src/forms/Field.svelte"]);
    assert_eq!(documents["src/forms/Field.svelte"]["data"][0]["type"]["text"], "number");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Documented 2 components"));

    Ok(())
}

#[test]
fn test_failed_file_sets_exit_code_and_keeps_others() -> Result<()> {
    let test = CliTest::with_file("src/Button.svelte", BUTTON)?;
    test.write_file("src/Broken.svelte", "<script>\nlet = ;\n</script>")?;

    let output = test.parse_command().arg("src").output()?;
    assert_eq!(output.status.code(), Some(1));

    let documents = stdout_json(&output)?;
    assert!(documents.get("src/Button.svelte").is_some());
    assert!(documents.get("src/Broken.svelte").is_none());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("src/Broken.svelte"));
    assert!(stderr.contains("syntax error"));

    Ok(())
}

#[test]
fn test_no_components_is_fatal() -> Result<()> {
    let test = CliTest::with_file("src/index.js", "export {};")?;

    let output = test.parse_command().arg("src").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No .svelte files found"));

    Ok(())
}

#[test]
fn test_flags_override_config() -> Result<()> {
    let test = CliTest::with_file("src/Button.svelte", BUTTON)?;
    test.write_file(
        ".sveltedocrc.json",
        r#"{ "features": ["data"], "ignoredVisibilities": [] }"#,
    )?;

    let output = test.parse_command().arg("src/Button.svelte").output()?;
    let document = stdout_json(&output)?;
    let names: Vec<&str> = document["data"]
        .as_array()
        .map(|data| data.iter().filter_map(|e| e["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["dispatch", "label", "pressed"]);
    assert_eq!(document["methods"], json!([]));
    assert_eq!(document["name"], json!(null));

    let output = test
        .parse_command()
        .args(["src/Button.svelte", "--features", "name,methods", "--locations"])
        .output()?;
    let document = stdout_json(&output)?;
    assert_eq!(document["name"], "Button");
    assert_eq!(document["data"], json!([]));
    let locations = document["methods"][0]["locations"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    assert_eq!(locations.len(), 1);
    let start = locations[0]["start"].as_u64().unwrap_or_default() as usize;
    assert!(BUTTON[start..].starts_with("press"));

    Ok(())
}

#[test]
fn test_explicit_v2_dialect() -> Result<()> {
    let test = CliTest::with_file(
        "Counter.html",
        r#"<p>{{count}}</p>
<script>
  export default {
    data() {
      return {
        /** Current count. */
        count: 0
      };
    },
    methods: {
      increment() {
        this.fire('change');
      }
    }
  };
</script>
"#,
    )?;

    let output = test
        .parse_command()
        .args(["Counter.html", "--svelte-version", "2", "--compact"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(output.stdout.iter().filter(|b| **b == b'\n').count(), 1);

    let document = stdout_json(&output)?;
    assert_eq!(document["version"], 2);
    assert_eq!(document["data"][0]["name"], "count");
    assert_eq!(document["data"][0]["description"], "Current count.");
    assert_eq!(document["methods"][0]["name"], "increment");
    assert_eq!(document["events"][0]["name"], "change");

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file("src/Button.svelte", BUTTON)?;
    test.write_file(".sveltedocrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.parse_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ignores"));

    Ok(())
}

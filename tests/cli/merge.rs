use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_merge_json() -> Result<()> {
    let test = CliTest::with_german_bundle()?;

    assert_cmd_snapshot!(test.merge_command().args(["--out", "merged"]), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Merged 1 bundle(s) for 1 locale(s) into 'merged' (1 json file(s) written)

    ----- stderr -----
    "###);

    assert!(test.root().join("merged/PropertiesTest_de.json").exists());

    let content = test.read_file("merged/PropertiesTest_de.json")?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(value["key"], "Die Platte \"{1}\" enthält {0}.");
    assert_eq!(value["madeUp"], "Das hier gibt es nur auf Deutsch.");
    // Base file order first, appended override keys last.
    assert!(content.find("\"key\"").unwrap() < content.find("\"madeUp\"").unwrap());

    Ok(())
}

#[test]
fn test_merge_properties_format() -> Result<()> {
    let test = CliTest::with_german_bundle()?;

    let output = test
        .merge_command()
        .args(["--out", "merged", "--format", "properties"])
        .output()?;
    assert!(output.status.success());

    let content = test.read_file("merged/PropertiesTest_de.properties")?;
    assert_eq!(
        content,
        "key = Die Platte \"{1}\" enthält {0}.\nmadeUp = Das hier gibt es nur auf Deutsch.\n"
    );

    Ok(())
}

#[test]
fn test_merge_specific_locale_falls_back_to_base() -> Result<()> {
    let test = CliTest::with_german_bundle()?;

    let output = test
        .merge_command()
        .args(["--out", "merged", "--locale", "fr"])
        .output()?;
    assert!(output.status.success());

    let content = test.read_file("merged/PropertiesTest_fr.json")?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(value["key"], "The disk \"{1}\" contains {0}.");
    assert!(value.get("madeUp").is_none());

    Ok(())
}

#[test]
fn test_merge_substitutes_references() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("properties/Other.properties", "title = Base title\n")?;
    test.write_file("properties/Other_de.properties", "title = Deutscher Titel\n")?;
    test.write_file(
        "properties/Main.properties",
        "heading = Resource(key='title', bundle='Other')\n",
    )?;

    let output = test.merge_command().args(["--out", "merged"]).output()?;
    assert!(output.status.success());

    let content = test.read_file("merged/Main_de.json")?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(value["heading"], "Deutscher Titel");

    Ok(())
}

#[test]
fn test_merge_warns_on_unresolved_reference() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "properties/Main.properties",
        "heading = Resource(key='title', bundle='Gone')\n",
    )?;
    test.write_file("properties/Main_de.properties", "heading = Resource(key='title', bundle='Gone')\n")?;

    assert_cmd_snapshot!(test.merge_command().args(["--out", "merged"]), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Merged 1 bundle(s) for 1 locale(s) into 'merged' (1 json file(s) written)

    ----- stderr -----
    warning: 1 unresolved reference(s) left as raw values (run proplint check for details)
    "###);

    Ok(())
}

#[test]
fn test_merge_requires_out() -> Result<()> {
    let test = CliTest::with_german_bundle()?;

    let output = test.merge_command().output()?;
    assert!(!output.status.success());

    Ok(())
}

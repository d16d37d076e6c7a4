use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_clean_dry_run() -> Result<()> {
    let test = CliTest::with_german_bundle()?;

    assert_cmd_snapshot!(test.clean_command(), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ./properties/PropertiesTest_de.properties:
      - madeUp (line 2) ("Das hier gibt es nur auf Deutsch.")

    Would delete 1 orphan key(s) in 1 file(s).
    Run with --apply to delete these keys.

    ----- stderr -----
    "###);

    // Dry run must not touch the file.
    let content = test.read_file("properties/PropertiesTest_de.properties")?;
    assert!(content.contains("madeUp"));

    Ok(())
}

#[test]
fn test_clean_apply() -> Result<()> {
    let test = CliTest::with_german_bundle()?;

    assert_cmd_snapshot!(test.clean_command().arg("--apply"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ./properties/PropertiesTest_de.properties:
      - madeUp (line 2) ("Das hier gibt es nur auf Deutsch.")

    Deleted 1 orphan key(s) in 1 file(s).

    ----- stderr -----
    "###);

    // The orphan is gone, the remaining line is untouched.
    let content = test.read_file("properties/PropertiesTest_de.properties")?;
    assert_eq!(content, "key = Die Platte \"{1}\" enth\\u00E4lt {0}.\n");

    Ok(())
}

#[test]
fn test_clean_nothing_to_clean() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("properties/Errors.properties", "full = The disk is full.\n")?;
    test.write_file(
        "properties/Errors_de.properties",
        "full = Die Platte ist voll.\n",
    )?;

    assert_cmd_snapshot!(test.clean_command(), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No keys to clean.

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_clean_refuses_on_parse_errors() -> Result<()> {
    let test = CliTest::with_german_bundle()?;
    test.write_file("properties/Broken.properties", "bad = \\u00ZZ\n")?;

    assert_cmd_snapshot!(test.clean_command().arg("--apply"), @r###"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: ✘ Cannot clean, 1 file(s) could not be parsed.
    Run `proplint check` to see details and fix them.
    "###);

    // Nothing was deleted.
    let content = test.read_file("properties/PropertiesTest_de.properties")?;
    assert!(content.contains("madeUp"));

    Ok(())
}

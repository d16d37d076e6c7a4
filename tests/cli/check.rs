use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("properties/Errors.properties", "full = The disk is full.\n")?;
    test.write_file(
        "properties/Errors_de.properties",
        "full = Die Platte ist voll.\n",
    )?;

    assert_cmd_snapshot!(test.check_command(), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 bundle (2 files) - no issues found

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_check_orphan_key() -> Result<()> {
    let test = CliTest::with_german_bundle()?;

    assert_cmd_snapshot!(test.check_command(), @r###"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "madeUp"  orphan-key
      --> ./properties/PropertiesTest_de.properties:2:1
      = note: in de ("Das hier gibt es nur auf Deutsch.")


    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_check_warnings_only() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "properties/Errors.properties",
        "ok = OK\nfull = The disk is full.\n",
    )?;
    test.write_file("properties/Errors_de.properties", "ok = OK\n")?;

    assert_cmd_snapshot!(test.check_command(), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "ok"  untranslated
      --> ./properties/Errors.properties:1:1
      = note: ("OK") identical in: de

    warning: "full"  missing-override
      --> ./properties/Errors.properties:2:1
      = note: ("The disk is full.") missing in: de


    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_check_selected_rules() -> Result<()> {
    // The German fixture has an orphan key, but only the missing rule runs.
    let test = CliTest::with_german_bundle()?;

    assert_cmd_snapshot!(test.check_command().arg("missing"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 bundle (2 files) - no issues found

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_check_duplicate_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("properties/Dup.properties", "a = 1\nb = 2\na = 3\n")?;

    assert_cmd_snapshot!(test.check_command(), @r###"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "a"  duplicate-key
      --> ./properties/Dup.properties:3:1
      |
    3 | a = 3
      | ^
      = note: first defined at line 1


    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_check_placeholder_mismatch() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("properties/Errors.properties", "full = {0} of {1} used\n")?;
    test.write_file("properties/Errors_de.properties", "full = {0} belegt\n")?;

    assert_cmd_snapshot!(test.check_command().arg("placeholder"), @r###"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "full"  placeholder-mismatch
      --> ./properties/Errors_de.properties:1:1
      = note: in de: expected {0}, {1}; found {0}


    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_check_missing_bundles_root() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.check_command(), @r###"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Bundles directory './properties' does not exist.
    Hint: Check your .proplintrc.json 'bundlesRoot' setting.
    "###);

    Ok(())
}

#[test]
fn test_check_respects_config_bundles_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".proplintrc.json", r#"{ "bundlesRoot": "./i18n" }"#)?;
    test.write_file("i18n/App.properties", "title = App\n")?;

    assert_cmd_snapshot!(test.check_command(), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 bundle (1 file) - no issues found

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_check_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".proplintrc.json",
        r#"{ "ignores": ["generated/**"] }"#,
    )?;
    test.write_file("properties/App.properties", "title = App\n")?;
    // Would be an orphan (no base), but the directory is ignored.
    test.write_file("properties/generated/Gen_de.properties", "x = 1\n")?;

    assert_cmd_snapshot!(test.check_command(), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 bundle (1 file) - no issues found

    ----- stderr -----
    "###);

    Ok(())
}

#[test]
fn test_check_expected_locales_from_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".proplintrc.json", r#"{ "locales": ["de"] }"#)?;
    test.write_file("properties/App.properties", "title = The app\n")?;

    assert_cmd_snapshot!(test.check_command().arg("missing"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "title"  missing-override
      --> ./properties/App.properties:1:1
      = note: ("The app") missing in: de


    ✘ 1 problems (0 errors, 1 warning)

    ----- stderr -----
    "###);

    Ok(())
}

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .proplintrc.json

    ----- stderr -----
    "###);

    let content = test.read_file(".proplintrc.json")?;
    assert!(content.contains("bundlesRoot"));
    assert!(content.contains("ignoreUntranslated"));

    Ok(())
}

#[test]
fn test_init_twice_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r###"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .proplintrc.json already exists
    "###);

    Ok(())
}

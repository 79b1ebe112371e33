use predicates::prelude::*;
use rstest::rstest;

mod common;

#[test]
fn test_version() {
    let mut ctx = common::filevol();
    ctx.cmd
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("filevol "));
}

#[test]
fn test_capabilities_local() {
    let mut ctx = common::filevol();
    ctx.cmd
        .arg("capabilities")
        .assert()
        .success()
        .stdout("{\"scope\":\"local\"}\n");
}

#[test]
fn test_info_defaults_without_config_file() {
    let mut ctx = common::filevol();
    let output = ctx.cmd.arg("info").output().unwrap();
    assert!(output.status.success());

    let options: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(options["default_size"], 208896);
    assert_eq!(options["fs_type"], "ext4");
}

#[rstest]
#[case("size=4096\n", "default_size", serde_json::json!(4096))]
#[case("fstyp=xfs\n", "fs_type", serde_json::json!("xfs"))]
#[case("# fstyp=xfs\nfstyp=ext3\n", "fs_type", serde_json::json!("ext3"))]
fn test_info_config_file_overrides(
    #[case] config: &str,
    #[case] key: &str,
    #[case] expected: serde_json::Value,
) {
    let ctx = common::filevol();
    ctx.write_config(config);

    let output = ctx.new_cmd().arg("info").output().unwrap();
    assert!(output.status.success());

    let options: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(options[key], expected);
}

#[test]
fn test_config_path_overridden_by_flag() {
    let ctx = common::filevol();
    ctx.write_config("path=/from/config\n");

    // new_cmd always passes --volume-dir, which wins over path=
    let output = ctx.new_cmd().arg("info").output().unwrap();
    let options: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(options["volume_dir"], ctx.volume_dir.to_str().unwrap());
}

#[test]
fn test_invalid_config_file_fails() {
    let ctx = common::filevol();
    ctx.write_config("size=lots\n");

    ctx.new_cmd()
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn test_log_file_written() {
    let ctx = common::filevol();
    let log_file = ctx.root().join("logs").join("filevol.log");

    ctx.new_cmd()
        .arg("--debug")
        .arg("--log-file")
        .arg(&log_file)
        .args(["rm", "ghost"])
        .assert()
        .success();

    let logs = std::fs::read_to_string(&log_file).unwrap();
    assert!(logs.contains("Remove: no image"));
}

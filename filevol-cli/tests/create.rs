use predicates::prelude::*;

mod common;

#[test]
fn test_create_existing_rejected() {
    let mut ctx = common::filevol();
    ctx.seed_image("web", b"original");

    ctx.cmd
        .args(["create", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(std::fs::read(ctx.image_path("web")).unwrap(), b"original");
}

#[test]
fn test_create_from_source_copies_image() {
    let mut ctx = common::filevol();
    ctx.seed_image("base", b"filesystem bytes");

    ctx.cmd
        .args(["create", "clone", "--source", "base"])
        .assert()
        .success()
        .stdout("clone\n");

    assert_eq!(
        std::fs::read(ctx.image_path("clone")).unwrap(),
        b"filesystem bytes"
    );
}

#[test]
fn test_create_from_source_via_opt() {
    let mut ctx = common::filevol();
    ctx.seed_image("base", b"bytes");

    ctx.cmd
        .args(["create", "-o", "source=base", "clone"])
        .assert()
        .success();

    assert!(ctx.image_path("clone").exists());
}

#[test]
fn test_create_missing_source() {
    let mut ctx = common::filevol();

    ctx.cmd
        .args(["create", "clone", "--source", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("source volume nope not found"));

    assert!(!ctx.image_path("clone").exists());
}

#[test]
fn test_create_invalid_size() {
    let mut ctx = common::filevol();

    ctx.cmd
        .args(["create", "web", "--size", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));

    assert!(!ctx.image_path("web").exists());
}

#[test]
fn test_create_invalid_name() {
    let mut ctx = common::filevol();

    ctx.cmd
        .args(["create", "../escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn test_failed_format_leaves_no_image() {
    let mut ctx = common::filevol();

    ctx.cmd
        .args(["--fs-type", "filevol-nosuchfs", "create", "web", "--size", "64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("format failed"));

    assert!(!ctx.image_path("web").exists());

    ctx.new_cmd()
        .args(["inspect", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

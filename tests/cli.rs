// CLI tests for the pathops binary (assert_cmd + predicates).

mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

use common::archive_listing;

fn pathops(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pathops").expect("binary built");
    // keep the user's own settings file out of the picture
    cmd.arg("--config").arg(temp.path().join("no-settings.toml"));
    cmd.env_remove("PATHOPS_LOG");
    cmd
}

#[test]
fn zip_then_unzip() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    temp.child("project/a.txt").write_str("hello")?;
    temp.child("project/sub").create_dir_all()?;
    let archive = temp.path().join("out.zip");

    pathops(&temp)
        .arg("zip")
        .arg(temp.child("project").path())
        .arg(&archive)
        .assert()
        .success();
    assert_eq!(archive_listing(&archive), vec!["a.txt", "sub/"]);

    pathops(&temp)
        .args(["unzip", "--overwrite"])
        .arg(&archive)
        .arg(temp.child("restored").path())
        .assert()
        .success();
    temp.child("restored/a.txt").assert("hello");
    temp.child("restored/sub").assert(predicate::path::is_dir());
    Ok(())
}

#[test]
fn cp_with_excludes_and_rm() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    temp.child("src/keep.txt").write_str("k")?;
    temp.child("src/node_modules/x.js").write_str("x")?;

    pathops(&temp)
        .arg("cp")
        .arg(temp.child("src").path())
        .arg(temp.child("dst").path())
        .args(["--exclude", "node_modules"])
        .assert()
        .success();
    temp.child("dst/keep.txt").assert("k");
    temp.child("dst/node_modules").assert(predicate::path::missing());

    for _ in 0..2 {
        pathops(&temp)
            .arg("rm")
            .arg(temp.child("dst").path())
            .assert()
            .success();
    }
    temp.child("dst").assert(predicate::path::missing());
    Ok(())
}

#[test]
fn mkdir_accepts_octal_mode() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dir = temp.child("a/b/c");

    pathops(&temp)
        .arg("mkdir")
        .arg(dir.path())
        .args(["--mode", "750"])
        .assert()
        .success();
    dir.assert(predicate::path::is_dir());

    pathops(&temp)
        .args(["mkdir", "--mode", "9z"])
        .arg(dir.path())
        .assert()
        .failure();
    Ok(())
}

#[test]
fn failures_exit_nonzero_with_message() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    pathops(&temp)
        .arg("zip")
        .arg(temp.child("missing").path())
        .arg(temp.path().join("out.zip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
    Ok(())
}

#[test]
fn malformed_settings_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let settings = temp.child("settings.toml");
    settings.write_str("dir_mode = \"wide open\"")?;

    Command::cargo_bin("pathops")?
        .arg("--config")
        .arg(settings.path())
        .arg("mkdir")
        .arg(temp.child("x").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid settings"));
    temp.child("x").assert(predicate::path::missing());
    Ok(())
}

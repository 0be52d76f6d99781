use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A git repository with nested files, all staged and committed
#[fixture]
pub fn committed_repository_dir(repository_dir: TempDir) -> TempDir {
    run_git_command(repository_dir.path(), &["init", "--quiet"])
        .assert()
        .success();

    write_file(FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));
    write_generated_files(&repository_dir.path().join("generated"), 5);

    run_git_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    git_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// Run git isolated from the user's and the system's configuration
pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .args([
            "-c",
            "user.name=Fake User",
            "-c",
            "user.email=fakeuser@example.com",
            "-c",
            "init.defaultBranch=main",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args);
    cmd
}

pub fn git_commit(dir: &Path, message: &str) -> Command {
    run_git_command(dir, &["commit", "--quiet", "-m", message])
}

pub fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_git_command(dir, args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run git {:?}: {}", args, e));

    String::from_utf8(output.stdout).expect("git output is not UTF-8")
}

pub fn run_dircache_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("dircache").expect("Failed to find dircache binary");
    cmd.current_dir(dir).args(args);
    cmd
}

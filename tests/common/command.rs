use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with `a.txt` (`"a\n"`) and `b.txt` (`"b\n"`) committed on master.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "a\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("b.txt"),
        "b\n".to_string(),
    ));
    twig_add(repository_dir.path(), &["a.txt", "b.txt"]);

    twig_commit(repository_dir.path(), "add a and b")
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    twig_commit_at(dir, message, COMMIT_DATE)
}

pub fn twig_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", "-m", message]);
    cmd.env("TWIG_COMMIT_DATE", date); // %Y-%m-%d %H:%M:%S %z
    cmd
}

pub fn twig_add(dir: &Path, files: &[&str]) {
    for file in files {
        run_twig_command(dir, &["add", file]).assert().success();
    }
}

/// Write, stage and commit one file.
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    twig_add(dir, &[file]);
    twig_commit(dir, message).assert().success();
}

/// Id of the commit the current branch points at.
pub fn head_commit_id(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".twig/HEAD")).expect("Failed to read HEAD");
    let ref_path = head
        .trim()
        .strip_prefix("ref: ")
        .expect("HEAD is not a symbolic ref")
        .to_string();

    branch_commit_id(dir, ref_path.trim_start_matches("refs/heads/"))
}

pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(".twig/refs/heads").join(branch))
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Ids printed by `find`, one per line.
pub fn find_commit_ids(dir: &Path, message: &str) -> Vec<String> {
    let output = run_twig_command(dir, &["find", message])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output)
        .expect("find printed invalid utf-8")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Two sibling repositories, `local` and `remote`, with `origin` in `local`
/// pointing at `remote`.
#[fixture]
pub fn linked_repositories_dir(repository_dir: TempDir) -> TempDir {
    let local = repository_dir.path().join("local");
    let remote = repository_dir.path().join("remote");

    run_twig_command(repository_dir.path(), &["init", "local"])
        .assert()
        .success();
    run_twig_command(repository_dir.path(), &["init", "remote"])
        .assert()
        .success();
    run_twig_command(&local, &["add-remote", "origin", "../remote/.twig"])
        .assert()
        .success();
    assert!(remote.join(".twig").is_dir());

    repository_dir
}

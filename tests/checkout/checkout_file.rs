use crate::common::command::{commit_file, head_commit_id, init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, random_content, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_file_reverts_working_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), random_content()));

    run_twig_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("a.txt")), "a\n");

    Ok(())
}

#[rstest]
fn checkout_file_from_an_older_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    commit_file(dir, "a.txt", "second\n", "rewrite a");

    run_twig_command(dir, &["checkout", &first, "--", "a.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("a.txt")), "a\n");

    // abbreviated ids resolve too
    commit_file(dir, "a.txt", "third\n", "rewrite a again");
    run_twig_command(dir, &["checkout", &first[..8], "--", "a.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("a.txt")), "a\n");

    // HEAD is untouched
    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rewrite a again"));

    Ok(())
}

#[rstest]
fn checkout_file_unstages_the_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), random_content()));
    run_twig_command(dir, &["add", "a.txt"]).assert().success();

    run_twig_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success();

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}

#[rstest]
fn checkout_file_missing_from_the_commit_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["checkout", "--", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File does not exist in that commit.",
        ));

    Ok(())
}

#[rstest]
fn checkout_file_from_an_unknown_commit_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(
        init_repository_dir.path(),
        &["checkout", "0000000000", "--", "a.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("No commit with that id exists."));

    Ok(())
}

#[rstest]
fn checkout_without_operands_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect operands."));

    Ok(())
}

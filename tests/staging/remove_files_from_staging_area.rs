use crate::common::command::{init_repository_dir, run_twig_command, twig_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn removing_a_tracked_file_deletes_it_and_stages_the_removal(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm", "b.txt"]).assert().success();
    assert!(!dir.join("b.txt").exists());

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\nb.txt\n\n"));

    twig_commit(dir, "drop b").assert().success();

    run_twig_command(dir, &["checkout", "--", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File does not exist in that commit.",
        ));

    Ok(())
}

#[rstest]
fn removing_a_staged_file_only_unstages_it(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("c.txt"), "c\n".to_string()));
    run_twig_command(dir, &["add", "c.txt"]).assert().success();
    run_twig_command(dir, &["rm", "c.txt"]).assert().success();

    assert!(dir.join("c.txt").is_file());
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains("=== Untracked Files ===\nc.txt\n\n"));

    Ok(())
}

#[rstest]
fn removing_an_unknown_file_is_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("stray.txt"), "stray\n".to_string()));

    run_twig_command(dir, &["rm", "stray.txt"])
        .assert()
        .success()
        .stdout("No reason to remove the file.\n");

    assert!(dir.join("stray.txt").is_file());

    Ok(())
}

use crate::common::command::{commit_file, find_commit_ids, init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn removing_a_branch_keeps_its_commits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();
    run_twig_command(dir, &["checkout", "dev"]).assert().success();
    commit_file(dir, "dev.txt", "dev\n", "dev only");
    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_twig_command(dir, &["rm-branch", "dev"])
        .assert()
        .success();

    assert!(!dir.join(".twig/refs/heads/dev").exists());
    assert_eq!(find_commit_ids(dir, "dev only").len(), 1);

    Ok(())
}

#[rstest]
fn removing_the_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["rm-branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove the current branch."));

    Ok(())
}

#[rstest]
fn removing_an_unknown_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["rm-branch", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));

    Ok(())
}

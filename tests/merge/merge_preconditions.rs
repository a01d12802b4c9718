use crate::common::command::{commit_file, head_commit_id, init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merging_the_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["merge", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot merge a branch with itself."));

    Ok(())
}

#[rstest]
fn merging_an_unknown_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["merge", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));

    Ok(())
}

#[rstest]
fn merging_with_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();
    write_file(FileSpec::new(dir.join("c.txt"), "c\n".to_string()));
    run_twig_command(dir, &["add", "c.txt"]).assert().success();

    run_twig_command(dir, &["merge", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You have uncommitted changes."));

    Ok(())
}

#[rstest]
fn untracked_file_in_the_way_blocks_the_merge(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();
    commit_file(dir, "m.txt", "m\n", "master work");
    run_twig_command(dir, &["checkout", "dev"]).assert().success();
    commit_file(dir, "c.txt", "dev c\n", "dev adds c");
    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();
    let master_tip = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("c.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["merge", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    assert_eq!(head_commit_id(dir), master_tip);
    assert_eq!(read_file(&dir.join("c.txt")), "mine\n");

    Ok(())
}

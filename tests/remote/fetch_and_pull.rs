use crate::common::command::{
    branch_commit_id, commit_file, head_commit_id, linked_repositories_dir, run_twig_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn fetch_copies_the_branch_into_a_tracking_branch(
    linked_repositories_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = linked_repositories_dir.path().join("local");
    let remote = linked_repositories_dir.path().join("remote");
    commit_file(&remote, "r.txt", "r\n", "remote work");
    let local_tip = head_commit_id(&local);

    run_twig_command(&local, &["fetch", "origin", "master"])
        .assert()
        .success();

    assert_eq!(
        branch_commit_id(&local, "origin/master"),
        head_commit_id(&remote)
    );
    // fetching does not touch the current branch
    assert_eq!(head_commit_id(&local), local_tip);
    run_twig_command(&local, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\n*master\norigin/master\n\n",
        ));

    run_twig_command(&local, &["checkout", "origin/master"])
        .assert()
        .success();
    assert_eq!(read_file(&local.join("r.txt")), "r\n");

    Ok(())
}

#[rstest]
fn fetch_of_an_unknown_branch_fails(
    linked_repositories_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = linked_repositories_dir.path().join("local");

    run_twig_command(&local, &["fetch", "origin", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "That remote does not have that branch.",
        ));

    Ok(())
}

#[rstest]
fn pull_merges_remote_work(
    linked_repositories_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = linked_repositories_dir.path().join("local");
    let remote = linked_repositories_dir.path().join("remote");
    commit_file(&remote, "r.txt", "r\n", "remote work");
    commit_file(&local, "l.txt", "l\n", "local work");

    run_twig_command(&local, &["pull", "origin", "master"])
        .assert()
        .success();

    assert_eq!(read_file(&local.join("l.txt")), "l\n");
    assert_eq!(read_file(&local.join("r.txt")), "r\n");
    run_twig_command(&local, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged origin/master into master."))
        .stdout(predicate::str::contains("Merge: "));

    // after pulling, pushing succeeds
    run_twig_command(&local, &["push", "origin", "master"])
        .assert()
        .success();
    assert_eq!(head_commit_id(&remote), head_commit_id(&local));

    Ok(())
}

#[rstest]
fn pull_fast_forwards_when_only_the_remote_moved(
    linked_repositories_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = linked_repositories_dir.path().join("local");
    let remote = linked_repositories_dir.path().join("remote");
    commit_file(&remote, "r.txt", "r\n", "remote work");

    run_twig_command(&local, &["pull", "origin", "master"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(head_commit_id(&local), head_commit_id(&remote));

    Ok(())
}

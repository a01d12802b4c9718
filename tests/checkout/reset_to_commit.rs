use crate::common::command::{commit_file, head_commit_id, init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::{PredicateBooleanExt, predicate};
use rstest::rstest;

#[rstest]
fn reset_moves_the_branch_and_restores_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    commit_file(dir, "a.txt", "rewritten\n", "rewrite a");
    commit_file(dir, "c.txt", "c\n", "add c");

    run_twig_command(dir, &["reset", &first]).assert().success();

    assert_eq!(head_commit_id(dir), first);
    assert_eq!(read_file(&dir.join("a.txt")), "a\n");
    assert!(!dir.join("c.txt").exists());
    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add c").not())
        .stdout(predicate::str::contains("add a and b"));

    Ok(())
}

#[rstest]
fn reset_is_blocked_by_an_untracked_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "c.txt", "c\n", "add c");
    let with_c = head_commit_id(dir);
    run_twig_command(dir, &["rm", "c.txt"]).assert().success();
    crate::common::command::twig_commit(dir, "drop c")
        .assert()
        .success();
    let without_c = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("c.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["reset", &with_c])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way",
        ));

    assert_eq!(head_commit_id(dir), without_c);
    assert_eq!(read_file(&dir.join("c.txt")), "mine\n");

    Ok(())
}

#[rstest]
fn reset_to_an_unknown_commit_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["reset", "abcdef0123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commit with that id exists."));

    Ok(())
}

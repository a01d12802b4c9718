use crate::common::command::{
    branch_commit_id, commit_file, head_commit_id, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn new_branch_points_at_the_current_commit_without_switching(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head_id = head_commit_id(dir);

    run_twig_command(dir, &["branch", "dev"]).assert().success();
    commit_file(dir, "c.txt", "c\n", "master moves on");

    assert_eq!(branch_commit_id(dir, "dev"), head_id);
    assert_ne!(head_commit_id(dir), head_id);
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\n*master\ndev\n\n",
        ));

    Ok(())
}

#[rstest]
fn hierarchical_branch_names_are_allowed(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    assert_eq!(branch_commit_id(dir, "feature/login"), head_commit_id(dir));

    Ok(())
}

#[rstest]
fn duplicate_branch_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();

    run_twig_command(dir, &["branch", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));

    Ok(())
}

#[rstest]
#[case::double_dot("a..b")]
#[case::leading_dot(".hidden")]
#[case::trailing_slash("dev/")]
#[case::lock_suffix("dev.lock")]
#[case::whitespace("my branch")]
fn invalid_branch_names_are_rejected(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid branch name"));

    Ok(())
}

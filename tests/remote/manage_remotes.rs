use crate::common::command::{linked_repositories_dir, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn remote_location_is_recorded(
    linked_repositories_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = linked_repositories_dir.path().join("local");

    assert_eq!(
        std::fs::read_to_string(local.join(".twig/remotes/origin"))?,
        "../remote/.twig"
    );

    Ok(())
}

#[rstest]
fn adding_a_remote_twice_fails(
    linked_repositories_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = linked_repositories_dir.path().join("local");

    run_twig_command(&local, &["add-remote", "origin", "/elsewhere/.twig"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name already exists.",
        ));

    Ok(())
}

#[rstest]
fn removing_remotes(linked_repositories_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let local = linked_repositories_dir.path().join("local");

    run_twig_command(&local, &["rm-remote", "origin"])
        .assert()
        .success();
    assert!(!local.join(".twig/remotes/origin").exists());

    run_twig_command(&local, &["rm-remote", "origin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name does not exist.",
        ));

    Ok(())
}

#[rstest]
#[case::push("push")]
#[case::fetch("fetch")]
#[case::pull("pull")]
fn remote_without_a_repository_fails(
    repository_dir: TempDir,
    #[case] command: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    run_twig_command(dir, &["add-remote", "nowhere", "../missing/.twig"])
        .assert()
        .success();

    run_twig_command(dir, &[command, "nowhere", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote directory not found."));

    run_twig_command(dir, &[command, "unknown", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name does not exist.",
        ));

    Ok(())
}

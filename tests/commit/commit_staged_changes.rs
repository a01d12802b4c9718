use crate::common::command::{
    head_commit_id, init_repository_dir, run_twig_command, twig_add, twig_commit, twig_commit_at,
};
use crate::common::file::{FileSpec, random_content, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_prints_branch_short_id_and_message(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("c.txt"), random_content()));
    twig_add(dir, &["c.txt"]);

    let output = twig_commit(dir, "add c")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[master [0-9a-f]{7}\] add c\n$")?)
        .get_output()
        .stdout
        .clone();

    let head_id = head_commit_id(dir);
    assert!(String::from_utf8(output)?.contains(&head_id[..7]));

    Ok(())
}

#[rstest]
fn commit_keeps_unstaged_files_from_the_parent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("c.txt"), "c\n".to_string()));
    twig_add(dir, &["c.txt"]);
    twig_commit(dir, "add c").assert().success();

    std::fs::remove_file(dir.join("a.txt"))?;
    std::fs::remove_file(dir.join("c.txt"))?;
    run_twig_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success();
    run_twig_command(dir, &["checkout", "--", "c.txt"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(dir.join("a.txt"))?, "a\n");
    assert_eq!(std::fs::read_to_string(dir.join("c.txt"))?, "c\n");

    Ok(())
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
fn commit_without_a_message_fails(
    init_repository_dir: TempDir,
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("c.txt"), random_content()));
    twig_add(dir, &["c.txt"]);

    twig_commit(dir, message)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a commit message."));

    Ok(())
}

#[rstest]
fn commit_without_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head_id = head_commit_id(dir);

    // unstaged edits do not count
    write_file(FileSpec::new(dir.join("a.txt"), random_content()));

    twig_commit(dir, "nothing staged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
    assert_eq!(head_commit_id(dir), head_id);

    Ok(())
}

#[rstest]
fn commit_date_can_be_pinned_from_the_environment(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("c.txt"), random_content()));
    twig_add(dir, &["c.txt"]);

    twig_commit_at(dir, "dated", "Wed, 15 Mar 2023 09:30:00 +0200")
        .assert()
        .success();

    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Date: Wed Mar 15 09:30:00 2023 +0200\ndated\n",
        ));

    Ok(())
}

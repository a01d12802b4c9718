use crate::common::command::{
    commit_file, head_commit_id, init_repository_dir, run_twig_command, twig_add,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// master: a.txt, b.txt
/// dev:    a.txt ("dev a"), c.txt, b.txt removed
#[rstest::fixture]
fn diverged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();
    run_twig_command(dir, &["checkout", "dev"]).assert().success();

    commit_file(dir, "a.txt", "dev a\n", "dev edits a");
    commit_file(dir, "c.txt", "c\n", "dev adds c");
    run_twig_command(dir, &["rm", "b.txt"]).assert().success();
    crate::common::command::twig_commit(dir, "dev drops b")
        .assert()
        .success();

    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();

    init_repository_dir
}

#[rstest]
fn checkout_branch_replaces_the_working_files(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    assert_eq!(read_file(&dir.join("a.txt")), "a\n");
    assert!(dir.join("b.txt").is_file());
    assert!(!dir.join("c.txt").exists());

    run_twig_command(dir, &["checkout", "dev"]).assert().success();

    assert_eq!(read_file(&dir.join("a.txt")), "dev a\n");
    assert!(!dir.join("b.txt").exists());
    assert_eq!(read_file(&dir.join("c.txt")), "c\n");
    assert_eq!(
        std::fs::read_to_string(dir.join(".twig/HEAD"))?.trim(),
        "ref: refs/heads/dev"
    );

    Ok(())
}

#[rstest]
fn checkout_branch_clears_the_staging_area(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    write_file(FileSpec::new(dir.join("notes.txt"), "notes\n".to_string()));
    twig_add(dir, &["notes.txt"]);

    run_twig_command(dir, &["checkout", "dev"]).assert().success();

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains(
            "=== Untracked Files ===\nnotes.txt\n\n",
        ));

    Ok(())
}

#[rstest]
fn untracked_file_in_the_way_blocks_checkout(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    let head_id = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("c.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["checkout", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    assert_eq!(read_file(&dir.join("c.txt")), "mine\n");
    assert_eq!(read_file(&dir.join("a.txt")), "a\n");
    assert_eq!(head_commit_id(dir), head_id);
    assert_eq!(
        std::fs::read_to_string(dir.join(".twig/HEAD"))?.trim(),
        "ref: refs/heads/master"
    );

    Ok(())
}

#[rstest]
fn checkout_of_the_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No need to checkout the current branch.",
        ));

    Ok(())
}

#[rstest]
fn checkout_of_an_unknown_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["checkout", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such branch exists."));

    Ok(())
}

const PNG_BYTES: [u8; 5] = [0x89, 0x50, 0xff, 0xfe, 0x00];

#[rstest]
fn untracked_binary_files_do_not_block_checkout(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    std::fs::write(dir.join("image.png"), PNG_BYTES)?;

    run_twig_command(dir, &["checkout", "dev"]).assert().success();
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Untracked Files ===\nimage.png\n"));

    assert_eq!(read_file(&dir.join("c.txt")), "c\n");
    assert_eq!(std::fs::read(dir.join("image.png"))?, PNG_BYTES);

    Ok(())
}

#[rstest]
fn committed_binary_files_are_restored_byte_for_byte(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    std::fs::write(dir.join("image.png"), PNG_BYTES)?;
    twig_add(dir, &["image.png"]);
    crate::common::command::twig_commit(dir, "add image")
        .assert()
        .success();

    run_twig_command(dir, &["checkout", "dev"]).assert().success();
    assert!(!dir.join("image.png").exists());

    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(std::fs::read(dir.join("image.png"))?, PNG_BYTES);

    Ok(())
}

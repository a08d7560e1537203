/// Security-focused integration tests
///
/// These tests verify trust boundaries: hostile project IDs, oversized or
/// malformed project files, and what reaches the terminal and the browser
mod common;

use std::fs;
use std::sync::Arc;

use assert_cmd::prelude::*;
use common::{HomeBuilder, cli, session_for};
use gcp_shortcuts::{ProjectSearch, ProjectStore};
use predicates::prelude::*;

#[test]
fn test_security_escape_sequences_not_printed() {
    let home = HomeBuilder::new().with_projects(&["evil\x1b[2J\x1b]0;pwned\x07", "good"]).build();

    let output = cli(home.path()).arg("projects").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains('\x1b'), "escape sequences leaked: {stdout:?}");
    assert!(!stdout.contains('\x07'));
    assert!(stdout.contains("good\t"));
}

#[test]
fn test_security_open_refuses_control_characters() {
    let home = HomeBuilder::new().build();

    cli(home.path())
        .args(["open", "proj\nx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("control characters"));
}

#[test]
fn test_security_oversized_project_file_rejected() {
    let home = HomeBuilder::new().build();
    let file = fs::File::create(home.path().join(common::PROJECTS_FILE)).unwrap();
    // Sparse file, no need to write 10MB
    file.set_len(10 * 1024 * 1024 + 1).unwrap();

    cli(home.path())
        .arg("projects")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not perform search"))
        .stderr(predicate::str::contains("File too large"));
}

#[test]
fn test_security_project_file_at_size_limit_accepted() {
    let home = HomeBuilder::new().build();
    let file = fs::File::create(home.path().join(common::PROJECTS_FILE)).unwrap();
    file.set_len(10 * 1024 * 1024).unwrap();

    let store = ProjectStore::new(home.path().join(common::PROJECTS_FILE));
    let (session, failures) = session_for(Arc::new(ProjectSearch::new(store)));
    session.submit("nothing-matches").wait().unwrap();

    assert!(failures.try_recv().is_err());
    assert!(session.state().results.is_empty());
}

#[test]
fn test_security_invalid_utf8_reported_not_panicking() {
    let home = HomeBuilder::new().with_projects_content([0x61, 0xff, 0xfe, 0x0a]).build();

    let store = ProjectStore::new(home.path().join(common::PROJECTS_FILE));
    let (session, failures) = session_for(Arc::new(ProjectSearch::new(store)));
    session.submit("").wait().unwrap();

    let report = failures.try_recv().unwrap();
    assert!(report.detail.contains("Failed to read project file"));
    assert!(session.state().is_loading);
}

#[test]
#[cfg(unix)]
fn test_security_symlinked_project_file_followed() {
    use std::os::unix::fs::symlink;

    let home = HomeBuilder::new().build();
    let target = home.path().join("dotfiles-projects");
    fs::write(&target, "linked-project").unwrap();
    symlink(&target, home.path().join(common::PROJECTS_FILE)).unwrap();

    cli(home.path())
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("linked-project"));
}

#[test]
fn test_security_long_query_handled() {
    let home = HomeBuilder::new().with_projects(&["alpha"]).build();
    let query = "a".repeat(10_000);

    cli(home.path()).args(["projects", query.as_str()]).assert().success().stdout("");
}

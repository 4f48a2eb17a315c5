// Author: Eshan Roy
// SPDX-License-Identifier: MIT

mod common;

use common::{commit_file, gfc, git, init_repo};
use predicates::prelude::*;

fn branches(dir: &std::path::Path) -> String {
    git(dir, &["branch", "--list"])
}

#[test]
fn test_flow_init_creates_develop_and_stores_settings() {
    let repo = init_repo();

    gfc(repo.path())
        .args(["flow", "init", "--defaults"])
        .assert()
        .success();

    assert!(branches(repo.path()).contains("develop"));
    assert_eq!(
        git(repo.path(), &["config", "--get", "workflow.branch.develop"]),
        "develop"
    );
    assert_eq!(
        git(repo.path(), &["config", "--get", "workflow.prefix.feature"]),
        "feature/"
    );
}

#[test]
fn test_flow_init_with_overrides() {
    let repo = init_repo();

    gfc(repo.path())
        .args(["flow", "init", "--defaults", "--develop", "dev", "--version-tag", "v"])
        .assert()
        .success();

    assert!(branches(repo.path()).contains("dev"));
    assert_eq!(
        git(repo.path(), &["config", "--get", "workflow.prefix.versiontag"]),
        "v"
    );
}

#[test]
fn test_flow_start_requires_init() {
    let repo = init_repo();

    gfc(repo.path())
        .args(["flow", "start", "feature", "login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_feature_round_trip_without_remote() {
    let repo = init_repo();
    let path = repo.path();

    gfc(path).args(["flow", "init", "--defaults"]).assert().success();

    // No remote: the pull steps fail and are skipped.
    gfc(path)
        .args(["flow", "start", "feature", "login"])
        .assert()
        .success();
    assert_eq!(git(path, &["symbolic-ref", "--short", "HEAD"]), "feature/login");

    commit_file(path, "login.rs", "// login\n", "add login");

    gfc(path)
        .args(["flow", "finish", "feature"])
        .assert()
        .success();

    assert_eq!(git(path, &["symbolic-ref", "--short", "HEAD"]), "develop");
    assert!(!branches(path).contains("feature/login"));
    assert!(git(path, &["log", "--format=%s", "develop"]).contains("add login"));
    // Feature merges never touch the stable branch.
    assert!(!git(path, &["log", "--format=%s", "master"]).contains("add login"));
}

#[test]
fn test_release_round_trip() {
    let repo = init_repo();
    let path = repo.path();

    gfc(path).args(["flow", "init", "--defaults"]).assert().success();
    gfc(path)
        .args(["flow", "start", "release", "1.0.0"])
        .assert()
        .success();
    commit_file(path, "VERSION", "1.0.0\n", "bump version");

    gfc(path)
        .args(["flow", "finish", "release", "1.0.0"])
        .assert()
        .success();

    // Tag sits on the merge commit of the stable branch.
    let tagged = git(path, &["rev-list", "-n", "1", "1.0.0"]);
    let master_tip = git(path, &["rev-parse", "master"]);
    assert_eq!(tagged, master_tip);
    assert_eq!(git(path, &["rev-list", "--parents", "-n", "1", "master"]).split(' ').count(), 3);
    assert_eq!(
        git(path, &["tag", "-l", "--format=%(contents:subject)", "1.0.0"]),
        "Release 1.0.0"
    );

    // Development branch holds the release work.
    assert!(git(path, &["log", "--format=%s", "develop"]).contains("bump version"));
    assert!(!branches(path).contains("release/1.0.0"));
    assert_eq!(git(path, &["symbolic-ref", "--short", "HEAD"]), "develop");
}

#[test]
fn test_hotfix_finish_keeps_branch_with_custom_message() {
    let repo = init_repo();
    let path = repo.path();

    gfc(path).args(["flow", "init", "--defaults"]).assert().success();
    gfc(path)
        .args(["flow", "start", "hotfix", "1.0.1"])
        .assert()
        .success();
    commit_file(path, "fix.txt", "patched\n", "patch crash");

    gfc(path)
        .args(["flow", "finish", "hotfix", "1.0.1", "--keep", "-m", "Emergency fix"])
        .assert()
        .success();

    assert!(branches(path).contains("hotfix/1.0.1"));
    assert_eq!(
        git(path, &["tag", "-l", "--format=%(contents:subject)", "1.0.1"]),
        "Emergency fix"
    );
    assert!(git(path, &["log", "--format=%s", "master"]).contains("patch crash"));
    assert!(git(path, &["log", "--format=%s", "develop"]).contains("patch crash"));
}

#[test]
fn test_finish_dry_run_prints_plan_only() {
    let repo = init_repo();
    let path = repo.path();

    gfc(path).args(["flow", "init", "--defaults"]).assert().success();
    gfc(path)
        .args(["flow", "start", "feature", "search"])
        .assert()
        .success();

    gfc(path)
        .args(["--dry-run", "flow", "finish", "feature", "search"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git merge --no-ff --no-edit feature/search"))
        .stdout(predicate::str::contains("git branch -d feature/search"));

    assert_eq!(git(path, &["symbolic-ref", "--short", "HEAD"]), "feature/search");
}

#[test]
fn test_merge_conflict_reports_failed_step() {
    let repo = init_repo();
    let path = repo.path();

    gfc(path).args(["flow", "init", "--defaults"]).assert().success();
    gfc(path)
        .args(["flow", "start", "feature", "clash"])
        .assert()
        .success();
    commit_file(path, "README.md", "feature side\n", "feature edit");

    git(path, &["checkout", "-q", "develop"]);
    commit_file(path, "README.md", "develop side\n", "develop edit");

    gfc(path)
        .args(["flow", "finish", "feature", "clash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("merge feature/clash into develop"))
        .stderr(predicate::str::contains("checkout develop"));

    // Nothing after the failed merge ran.
    assert!(branches(path).contains("feature/clash"));
}

#[test]
fn test_support_cannot_be_finished() {
    let repo = init_repo();
    let path = repo.path();

    gfc(path).args(["flow", "init", "--defaults"]).assert().success();
    gfc(path)
        .args(["flow", "start", "support", "1.x"])
        .assert()
        .success();
    assert_eq!(git(path, &["symbolic-ref", "--short", "HEAD"]), "support/1.x");

    gfc(path)
        .args(["flow", "finish", "support", "1.x"])
        .assert()
        .failure();
}

#[test]
fn test_flow_list_and_status() {
    let repo = init_repo();
    let path = repo.path();

    gfc(path).args(["flow", "init", "--defaults"]).assert().success();
    gfc(path).args(["flow", "start", "feature", "a"]).assert().success();
    gfc(path).args(["flow", "start", "feature", "b"]).assert().success();

    gfc(path)
        .args(["flow", "list", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a\n"))
        .stdout(predicate::str::contains("b\n"));

    gfc(path)
        .args(["flow", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature/b"))
        .stdout(predicate::str::contains("workflow.branch.master"));
}

#[test]
fn test_finish_without_name_off_branch_asks_for_one() {
    let repo = init_repo();
    let path = repo.path();

    gfc(path).args(["flow", "init", "--defaults"]).assert().success();
    gfc(path).args(["flow", "start", "feature", "a"]).assert().success();
    git(path, &["checkout", "-q", "develop"]);

    gfc(path)
        .args(["flow", "finish", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("A feature name is required"))
        .stderr(predicate::str::contains("''").not());
}

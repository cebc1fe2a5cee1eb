//! End-to-end tests for the jvcl binary.
//!
//! The binary is run with a cleared environment so every test states
//! exactly which job variables exist.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to get the jvcl binary command with an empty environment.
fn jvcl() -> Command {
    let mut cmd = Command::cargo_bin("jvcl").unwrap();
    cmd.env_clear();
    cmd
}

fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

fn commit(dir: &Path, file: &str, message: &str) -> String {
    std::fs::write(dir.join(file), message).unwrap();
    run_git(dir, &["add", file]);
    run_git(dir, &["commit", "-m", message]);
    run_git(dir, &["rev-parse", "HEAD"])
}

/// Repository with one base commit, returned as (repo, base sha).
fn init_repo() -> (assert_fs::TempDir, String) {
    let repo = assert_fs::TempDir::new().unwrap();
    run_git(repo.path(), &["init", "-b", "main"]);
    run_git(repo.path(), &["config", "user.email", "test@example.com"]);
    run_git(repo.path(), &["config", "user.name", "Test User"]);
    let base = commit(repo.path(), "README.md", "Project skeleton");
    (repo, base)
}

/// Apply a complete job environment to `cmd`.
fn job_env(cmd: &mut Command, workspace: &Path, head: &str, out: &Path, job_url: &str) {
    cmd.env("BRANCH", "main")
        .env("MODE", "debug")
        .env("BUILD_NAME", "2.0.0")
        .env("BUILD_ID", "50")
        .env("WORKSPACE", workspace)
        .env("GIT_COMMIT", head)
        .env("JOB_URL", job_url)
        .env("JENKINS_USERNAME", "ci-bot")
        .env("JENKINS_PASSWORD", "s3cret")
        .env("PWD", out);
}

// =============================================================================
// Arguments and help
// =============================================================================

mod arguments {
    use super::*;

    #[test]
    fn help_lists_environment() {
        jvcl()
            .args(["generate", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("JENKINS_PASSWORD"))
            .stdout(predicate::str::contains("LAST_BUILD_COMMIT"));
    }

    #[test]
    fn version_flag_works() {
        jvcl()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("jvcl"));
    }

    #[test]
    fn completion_bash() {
        jvcl()
            .args(["completion", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("jvcl"));
    }

    #[test]
    fn inspect_requires_positive_id() {
        jvcl().args(["inspect", "0"]).assert().failure();
    }
}

// =============================================================================
// Configuration failures
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn missing_variables_fail_with_error_on_stdout() {
        jvcl()
            .assert()
            .code(1)
            .stdout(predicate::str::starts_with("error:"))
            .stdout(predicate::str::contains("BRANCH"));
    }

    #[test]
    fn non_numeric_build_id_fails() {
        let out = assert_fs::TempDir::new().unwrap();
        let mut cmd = jvcl();
        job_env(&mut cmd, out.path(), "abc", out.path(), "http://127.0.0.1:1/job/app/");
        cmd.env("BUILD_ID", "latest")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("BUILD_ID"));
        out.child("git.log").assert(predicate::path::missing());
    }

    #[test]
    fn preset_changelog_skips_generation() {
        let out = assert_fs::TempDir::new().unwrap();
        jvcl()
            .env("CHANGE_LOG", "Notes written by hand")
            .env("PWD", out.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("skipping"));
        out.child("git.log").assert(predicate::path::missing());
    }
}

// =============================================================================
// Generation
// =============================================================================

mod generation {
    use super::*;

    #[test]
    fn anchor_override_writes_git_log_in_pwd() {
        let (repo, base) = init_repo();
        commit(repo.path(), "a.txt", "Fix crash on launch");
        let head = commit(repo.path(), "b.txt", "Add settings screen");
        let out = assert_fs::TempDir::new().unwrap();

        let mut cmd = jvcl();
        job_env(&mut cmd, repo.path(), &head, out.path(), "http://127.0.0.1:1/job/app/");
        cmd.env("LAST_BUILD_COMMIT", &base)
            .env("GIT_LOG", "QA build")
            .arg("generate")
            .assert()
            .success()
            .stdout(predicate::str::contains("LAST_BUILD_COMMIT"));

        out.child("git.log").assert(
            "代码分支: main\n\nQA build\nAdd settings screen\nFix crash on launch\n\n",
        );
    }

    #[test]
    fn dry_run_prints_instead_of_writing() {
        let (repo, base) = init_repo();
        let head = commit(repo.path(), "a.txt", "Add settings screen");
        let out = assert_fs::TempDir::new().unwrap();

        let mut cmd = jvcl();
        job_env(&mut cmd, repo.path(), &head, out.path(), "http://127.0.0.1:1/job/app/");
        cmd.env("LAST_BUILD_COMMIT", &base)
            .args(["generate", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Add settings screen"));

        out.child("git.log").assert(predicate::path::missing());
    }

    #[test]
    fn identical_anchor_fails() {
        let (repo, base) = init_repo();
        let out = assert_fs::TempDir::new().unwrap();

        let mut cmd = jvcl();
        job_env(&mut cmd, repo.path(), &base, out.path(), "http://127.0.0.1:1/job/app/");
        cmd.env("LAST_BUILD_COMMIT", &base)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("error: no changes between"));

        out.child("git.log").assert(predicate::path::missing());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn rejected_credentials_fail_the_run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (repo, base) = init_repo();
        let out = assert_fs::TempDir::new().unwrap();
        let job_url = format!("{}/job/app/", server.uri());

        let mut cmd = jvcl();
        job_env(&mut cmd, repo.path(), &base, out.path(), &job_url);
        cmd.assert()
            .code(1)
            .stdout(predicate::str::contains("error:"))
            .stdout(predicate::str::contains("s3cret").not());

        assert_eq!(server.received_requests().await.unwrap().len(), 1);
        out.child("git.log").assert(predicate::path::missing());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_window_still_writes_banner() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (repo, base) = init_repo();
        let out = assert_fs::TempDir::new().unwrap();
        let job_url = format!("{}/job/app/", server.uri());

        let mut cmd = jvcl();
        job_env(&mut cmd, repo.path(), &base, out.path(), &job_url);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("warning:"));

        assert_eq!(server.received_requests().await.unwrap().len(), 20);
        out.child("git.log").assert("代码分支: main\n\n");
    }
}

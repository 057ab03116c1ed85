//! Integration tests for the repos subcommand.
//!
//! These cover flag validation, query construction as observed through
//! web mode, and the browser failure path. Fetch-mode coverage that
//! needs a live search service lives in the library's unit tests against
//! captured responses instead.

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("reposcout").expect("binary exists");
    cmd.env("RUST_LOG", "error")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .env_remove("REPOSCOUT_HOST")
        .env_remove("PAGER");
    cmd
}

#[test]
fn repos_without_arguments_fails() {
    cli().arg("repos")
        .assert()
        .failure()
        .stderr(predicate::str::contains("specify search keywords or flags"));
}

#[test]
fn repos_rejects_out_of_bounds_limit() {
    for limit in ["0", "1001"] {
        cli().args(["repos", "cli", "--limit", limit])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--limit must be between 1 and 1000"));
    }
}

#[test]
fn repos_rejects_invalid_visibility() {
    cli().args(["repos", "cli", "--visibility", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn web_mode_launches_browser_with_search_url() {
    cli().env("BROWSER", "echo")
        .args(["repos", "cli", "shell", "--web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github.com/search"))
        .stdout(predicate::str::contains("type=repositories"))
        .stdout(predicate::str::contains("q=cli+shell"));
}

#[test]
fn web_mode_encodes_qualifiers() {
    cli().env("BROWSER", "echo")
        .args([
            "repos",
            "--owner",
            "microsoft",
            "--visibility",
            "public",
            "--web",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("q=is%3Apublic+org%3Amicrosoft"));
}

#[test]
fn web_mode_includes_sort_only_when_set() {
    cli().env("BROWSER", "echo")
        .args(["repos", "cli", "--web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("&s=").not());

    cli().env("BROWSER", "echo")
        .args(["repos", "cli", "--web", "--sort", "stars", "--order", "asc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s=stars"))
        .stdout(predicate::str::contains("o=asc"));
}

#[test]
fn web_mode_reports_browser_failure() {
    cli().env("BROWSER", "false")
        .args(["repos", "cli", "--web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to open the search in your browser",
        ));
}

#[cfg(unix)]
#[test]
fn web_mode_passes_exact_url_to_browser() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().expect("create temp dir");
    let capture = temp.path().join("url.txt");
    let script = temp.path().join("browser.sh");
    fs::write(&script, "#!/bin/sh\nprintf '%s' \"$1\" > \"$BROWSER_CAPTURE\"\n")
        .expect("write fake browser");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("mark executable");

    cli().env("BROWSER", &script)
        .env("BROWSER_CAPTURE", &capture)
        .args(["repos", "vim plugin", "--web"])
        .assert()
        .success();

    let url = fs::read_to_string(&capture).expect("fake browser wrote url");
    assert_eq!(
        url,
        "https://github.com/search?type=repositories&q=%22vim+plugin%22"
    );
}

#[test]
fn fetch_mode_reports_unreachable_host() {
    cli().env("REPOSCOUT_HOST", "localhost:9")
        .args(["repos", "cli"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search request failed"));
}

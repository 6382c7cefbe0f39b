//! Tests for usage errors and fatal failures.

use crate::support::*;
use predicates::prelude::*;

#[tokio::test(flavor = "multi_thread")]
async fn test_help_shows_usage() {
    let t = Test::offline().await;

    let output = t.run(&["--help"]);
    assert_success(&output);
    assert_stdout_contains(&output, "<role> [var...] -- <command> [args...]");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_version_flag() {
    let t = Test::offline().await;

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("secret-bootstrap"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_role() {
    let t = Test::offline().await;

    let output = t.run(&[]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "missing role");
    assert_stderr_contains(&output, "usage: secret-bootstrap");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_option_is_usage_error() {
    let t = Test::offline().await;

    let output = t.run(&["--bogus", "api", "--", "true"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "--bogus");
    assert_stderr_contains(&output, "usage: secret-bootstrap");
    assert_stderr_excludes(&output, "identity document");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_option_after_escape_is_not_a_role() {
    let t = Test::offline().await;

    let output = t.run(&["--", "--bogus", "api", "--", "true"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid role '--bogus'");
    assert_stderr_contains(&output, "usage:");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_role() {
    let t = Test::offline().await;

    let output = t.run(&["", "DATABASE_URL", "--", "true"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid role '': cannot be empty");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_separator() {
    let t = Test::offline().await;

    let output = t.run(&["api", "DATABASE_URL", "API_KEY"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "missing command");
    assert_stderr_contains(&output, "usage:");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_separator_without_command() {
    let t = Test::offline().await;

    t.cmd()
        .args(["api", "DATABASE_URL", "--"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing command"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_command_not_found_fails_before_network() {
    let t = Test::offline().await;

    let output = t.run(&["api", "DATABASE_URL", "--", "no-such-binary-for-bootstrap-test"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "command not found: no-such-binary-for-bootstrap-test");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_variable_name() {
    let t = Test::offline().await;

    let output = t.run(&["api", "BAD=NAME", "--", "true"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid variable name 'BAD=NAME'");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_variable_cannot_leave_role_namespace() {
    let t = Test::offline().await;

    for name in ["../admin/ROOT_PW", "A?x", ".."] {
        let output = t.run(&["api", name, "--", "env"]);
        assert_exit_code(&output, 1);
        assert_stderr_contains(&output, &format!("invalid variable name '{}'", name));
        assert_stdout_excludes(&output, name);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_vault_address() {
    let t = Test::offline().await;

    let output = t.run(&["--vault-addr", "ftp://vault", "api", "--", "true"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid vault address");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_denied_fetches_nothing() {
    let t = Test::new().await;
    mount_identity(&t.server).await;
    mount_login_denied(&t.server).await;
    forbid_secret_reads(&t.server).await;

    let output = t.run(&["api", "DATABASE_URL", "API_KEY", "--", "echo", "ran"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "vault login rejected (403): permission denied");
    assert_stdout_excludes(&output, "ran");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bad_instance_profile_is_fatal() {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let t = Test::new().await;
    Mock::given(method("GET"))
        .and(path("/latest/dynamic/instance-identity/pkcs7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("MIAG"))
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest/meta-data/iam/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "InstanceProfileArn": "arn:aws:iam::123456789012:instance-profile/a/b"
        })))
        .mount(&t.server)
        .await;
    forbid_secret_reads(&t.server).await;

    let output = t.run(&["api", "DATABASE_URL", "--", "true"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(
        &output,
        "could not parse instance profile arn 'arn:aws:iam::123456789012:instance-profile/a/b'",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_metadata_service() {
    let t = Test::offline().await;

    let output = t
        .cmd()
        .env("EC2_METADATA_ADDR", "http://127.0.0.1:9")
        .args(["api", "--", "true"])
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "could not fetch identity document");
}

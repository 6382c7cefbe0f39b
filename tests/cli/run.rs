//! Tests for the exec path: secrets land in the replaced process.

use crate::support::*;

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_run_injects_secrets() {
    let t = Test::with_secrets("api", STANDARD_SECRETS).await;

    let output = t.run(&[
        "api",
        "DATABASE_URL",
        "API_KEY",
        "JWT_SECRET",
        "--",
        "sh",
        "-c",
        "printf '%s|%s|%s' \"$DATABASE_URL\" \"$API_KEY\" \"$JWT_SECRET\"",
    ]);

    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "postgres://localhost/mydb|sk-test-12345|super-secret-jwt-token"
    );
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_run_failed_secret_is_set_empty() {
    let t = Test::with_secrets("api", &[("API_KEY", "sk-test-12345")]).await;
    mount_missing(&t.server, "api", "MISSING").await;

    let output = t.run(&[
        "api",
        "API_KEY",
        "MISSING",
        "--",
        "sh",
        "-c",
        "if [ -z \"${MISSING+x}\" ]; then echo unset; else echo \"set:[$MISSING] $API_KEY\"; fi",
    ]);

    assert_success(&output);
    assert_stdout_contains(&output, "set:[] sk-test-12345");
    assert_stderr_contains(&output, "MISSING");
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_run_without_vars_still_authenticates() {
    let t = Test::authenticated().await;
    forbid_secret_reads(&t.server).await;

    let output = t.run(&["api", "--", "echo", "hello"]);
    assert_success(&output);
    assert_stdout_contains(&output, "hello");
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_run_preserves_inherited_environment() {
    let t = Test::with_secrets("api", &[("API_KEY", "from-vault")]).await;

    let output = t
        .cmd()
        .env("INHERITED", "from-parent")
        .env("API_KEY", "stale")
        .args([
            "api",
            "API_KEY",
            "--",
            "sh",
            "-c",
            "printf '%s %s' \"$INHERITED\" \"$API_KEY\"",
        ])
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(stdout(&output), "from-parent from-vault");
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_run_exit_code_passthrough() {
    let t = Test::authenticated().await;

    let output = t.run(&["api", "--", "sh", "-c", "exit 42"]);
    assert_exit_code(&output, 42);
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_run_replaces_process() {
    let t = Test::authenticated().await;

    let child = std::process::Command::new(commands::BIN)
        .env("VAULT_ADDR", t.server.uri())
        .env("EC2_METADATA_ADDR", t.server.uri())
        .args(["api", "--", "sh", "-c", "echo $$"])
        .stdout(std::process::Stdio::piped())
        .spawn()
        .unwrap();
    let pid = child.id();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), pid.to_string());
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_run_passes_args_after_separator_untouched() {
    let t = Test::authenticated().await;

    let output = t.run(&["api", "--", "printf", "%s,", "--", "-v", "a b"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "--,-v,a b,");
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_strict_mode_aborts_before_exec() {
    let t = Test::with_secrets("api", &[("API_KEY", "sk-test-12345")]).await;
    mount_missing(&t.server, "api", "MISSING").await;

    let output = t.run_strict(&["api", "API_KEY", "MISSING", "--", "echo", "ran"]);

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "could not fetch secret MISSING");
    assert_stdout_excludes(&output, "ran");
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_nonce_is_sent_with_login() {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    let t = Test::new().await;
    mount_identity(&t.server).await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/aws/login"))
        .and(body_partial_json(json!({"role": PROFILE_ROLE, "nonce": "fixed-nonce"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"auth": {"client_token": TOKEN}})))
        .expect(1)
        .mount(&t.server)
        .await;

    let output = t
        .cmd()
        .env("SECRET_BOOTSTRAP_NONCE", "fixed-nonce")
        .args(["api", "--", "true"])
        .output()
        .unwrap();
    assert_success(&output);
}

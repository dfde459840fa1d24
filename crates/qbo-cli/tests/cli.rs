//! CLI tests against a mock Quickbooks server.
//!
//! The binary is pointed at wiremock through `QBO_TOKEN_URL` and
//! `QBO_API_BASE`, so no real credentials are needed.

use std::process::{Command, Output};

use serde_json::{Value, json};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/oauth2/v1/tokens/bearer";
const COMPANY_PATH: &str = "/v3/company/123";

/// Run the CLI with a clean environment and the given variables.
fn run_cli(args: &[&str], env: &[(&str, String)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qbo"));
    cmd.env_clear();
    cmd.env("NO_COLOR", "1");
    cmd.args(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so the mock server keeps serving.
async fn run_cli_async(args: &[&str], env: Vec<(&'static str, String)>) -> Output {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &env)
    })
    .await
    .expect("CLI task panicked")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn credentials_env() -> Vec<(&'static str, String)> {
    vec![
        ("QBO_CLIENT_ID", "client-id".to_string()),
        ("QBO_CLIENT_SECRET", "client-secret".to_string()),
        ("QBO_REFRESH_TOKEN", "R1".to_string()),
        ("QBO_REALM_ID", "123".to_string()),
    ]
}

fn mock_env(server: &MockServer) -> Vec<(&'static str, String)> {
    let mut env = credentials_env();
    env.push(("QBO_TOKEN_URL", format!("{}{}", server.uri(), TOKEN_PATH)));
    env.push(("QBO_API_BASE", format!("{}{}", server.uri(), COMPANY_PATH)));
    env
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string("grant_type=refresh_token&refresh_token=R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A1",
            "refresh_token": "R2",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

#[test]
fn test_urls_sandbox() {
    let output = run_cli(&["urls"], &credentials_env());
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("sandbox"));
    assert!(out.contains("https://sandbox-quickbooks.api.intuit.com/v3/company/123"));
    assert!(out.contains("https://app.sandbox.qbo.intuit.com"));
    assert!(out.contains("https://oauth.platform.intuit.com/oauth2/v1/tokens/bearer"));
}

#[test]
fn test_urls_production() {
    let output = run_cli(&["urls", "--environment", "production"], &credentials_env());
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("https://quickbooks.api.intuit.com/v3/company/123"));
    assert!(out.contains("https://app.qbo.intuit.com"));
}

#[test]
fn test_unknown_environment_fails() {
    let output = run_cli(&["urls", "--environment", "staging"], &credentials_env());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("environment can only be production / sandbox"));
}

#[test]
fn test_missing_credentials_fails() {
    let output = run_cli(&["urls"], &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("QBO_CLIENT_ID"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_refresh_token_prints_pair() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let output = run_cli_async(&["refresh-token", "--json"], mock_env(&server)).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let pair: Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(pair["access_token"], "A1");
    assert_eq!(pair["refresh_token"], "R2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_refresh_token_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"error\":\"invalid_grant\"}"))
        .mount(&server)
        .await;

    let output = run_cli_async(&["refresh-token"], mock_env(&server)).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to obtain an access token"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_accounts() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{}/query", COMPANY_PATH)))
        .and(header("authorization", "Bearer A1"))
        .and(query_param(
            "query",
            "select * from Account STARTPOSITION 1 MAXRESULTS 1000",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "QueryResponse": {
                "Account": [
                    {"Id": "1", "Name": "Checking"},
                    {"Id": "2", "Name": "Savings"}
                ],
                "startPosition": 1,
                "maxResults": 2
            }
        })))
        .mount(&server)
        .await;

    let output = run_cli_async(&["list", "accounts"], mock_env(&server)).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let records: Vec<Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Name"], "Checking");
    assert_eq!(records[1]["Id"], "2");

    // The rotated refresh token is reported on stderr, not stdout.
    assert!(stderr(&output).contains("QBO_REFRESH_TOKEN: R2"));
    assert!(!stdout(&output).contains("R2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_employee() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{}/employee/55", COMPANY_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Employee": {"Id": "55", "DisplayName": "Emily Platt"},
            "time": "2024-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let output = run_cli_async(&["get", "employees", "55"], mock_env(&server)).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let record: Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(record["DisplayName"], "Emily Platt");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_missing_record_fails() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{}/class/999", COMPANY_PATH)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let output = run_cli_async(&["get", "classes", "999"], mock_env(&server)).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("HTTP 404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_count_departments() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{}/query", COMPANY_PATH)))
        .and(query_param("query", "select count(*) from Department"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "QueryResponse": {"totalCount": 7}
        })))
        .mount(&server)
        .await;

    let output = run_cli_async(&["count", "departments"], mock_env(&server)).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "7");
}

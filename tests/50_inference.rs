mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// The test server points its inference endpoint at a closed local port, so
// every relay attempt exercises the upstream-failure path.

#[tokio::test]
async fn unreachable_upstream_is_a_proxy_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/query_nemotron", server.base_url))
        .json(&json!({ "message": "hello" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());

    Ok(())
}

#[tokio::test]
async fn empty_message_is_still_relayed() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // An empty message passes validation; the failure here is the
    // unreachable upstream, not the payload.
    let res = client
        .post(format!("{}/query_nemotron", server.base_url))
        .json(&json!({ "message": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "error");

    Ok(())
}

#[tokio::test]
async fn missing_message_field_is_a_validation_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/query_nemotron", server.base_url))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "error");

    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// Tests in this file run concurrently against one server, so each uses its
// own user name and checks store effects through user-scoped log queries.

async fn log_for_user(base_url: &str, user: &str) -> Result<Vec<Value>> {
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/get_log", base_url))
        .query(&[("user", user)])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    Ok(body["log"].as_array().cloned().unwrap_or_default())
}

#[tokio::test]
async fn save_without_token_is_unauthorized_and_writes_nothing() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/save_canvas", server.base_url))
        .json(&json!({ "user": "NoTokenProbe", "canvas": "X" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "unauthorized");

    assert!(log_for_user(&server.base_url, "NoTokenProbe").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn save_with_wrong_token_is_unauthorized_and_writes_nothing() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/save_canvas", server.base_url))
        .bearer_auth("open-sesame")
        .json(&json!({ "user": "WrongTokenProbe", "canvas": "X" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert!(log_for_user(&server.base_url, "WrongTokenProbe").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn save_without_canvas_or_sections_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/save_canvas", server.base_url))
        .bearer_auth(common::WRITE_TOKEN)
        .json(&json!({ "user": "ShapeProbe", "data": { "alignment": "Gray" } }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "error");

    assert!(log_for_user(&server.base_url, "ShapeProbe").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn save_with_malformed_json_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/save_canvas", server.base_url))
        .bearer_auth(common::WRITE_TOKEN)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "error");

    Ok(())
}

#[tokio::test]
async fn save_and_fetch_roundtrip_applies_defaults() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/save_canvas", server.base_url))
        .bearer_auth(common::WRITE_TOKEN)
        .json(&json!({
            "user": "Han",
            "canvas": "Force_HUD",
            "data": { "alignment": "Gray" },
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "success");
    let id = body["id"].as_str().expect("save response carries an id").to_string();

    let res = client
        .get(format!("{}/get_canvas_by_id", server.base_url))
        .query(&[("id", id.as_str())])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let record = &body["canvas"];
    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["user"], "Han");
    assert_eq!(record["campaign"], "Unknown Campaign");
    assert_eq!(record["canvas"], "Force_HUD");
    assert_eq!(record["meta"]["alignment"], "Gray");
    assert_eq!(record["meta"]["entries"], 1);
    let timestamp = record["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'), "timestamp not UTC Zulu: {timestamp}");

    Ok(())
}

#[tokio::test]
async fn sections_payload_counts_entries_and_defaults_canvas_name() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/save_canvas", server.base_url))
        .bearer_auth(common::WRITE_TOKEN)
        .json(&json!({
            "user": "SectionsProbe",
            "canvas_sections": [
                { "title": "Vitals", "content": "HP 12/20" },
                { "title": "Powers", "content": ["Force Push"] },
                { "title": "Notes", "content": { "mood": "wary" } },
            ],
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let id = res.json::<Value>().await?["id"].as_str().unwrap().to_string();

    let log = log_for_user(&server.base_url, "SectionsProbe").await?;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["id"], id.as_str());
    assert_eq!(log[0]["canvas"], "Unnamed HUD");
    assert_eq!(log[0]["meta"]["entries"], 3);
    assert_eq!(log[0]["canvas_sections"].as_array().unwrap().len(), 3);

    Ok(())
}

#[tokio::test]
async fn empty_sections_list_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/save_canvas", server.base_url))
        .bearer_auth(common::WRITE_TOKEN)
        .json(&json!({ "user": "EmptySectionsProbe", "canvas_sections": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(log_for_user(&server.base_url, "EmptySectionsProbe").await?.is_empty());
    Ok(())
}

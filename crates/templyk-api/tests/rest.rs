//! Integration tests for the Templyk REST surface.
//!
//! Drives the assembled router in-process with `tower::ServiceExt` and
//! asserts the documented status codes and body shapes for each route.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use templyk_core::Config;
use tower::ServiceExt;

const RUNBOOK: &str = "---\nname: incident-runbook\ndescription: Step-by-step incident response\ntags:\n  - ops\n  - oncall\n---\n\n# Runbook\n\nDo the thing.\n";

const POSTMORTEM: &str = "---\nname: postmortem\ndescription: Incident postmortem write-up\ntags:\n  - ops\n---\n\n# Postmortem\n";

fn write_template(dir: &Path, rel: &str, content: &str) -> String {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

/// Percent-encode a template path into a single URI segment.
fn encode_ref(path: &str) -> String {
    path.replace('/', "%2F")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Extractor rejections carry plain-text bodies; map those to Null.
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ----------------------------------------------------------------------------
// Health
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let app = templyk_api::app(Config::default());
    let (status, body) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ----------------------------------------------------------------------------
// Templates collection
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_list_templates() {
    let dir = tempfile::tempdir().unwrap();
    write_template(dir.path(), "a-runbook.md", RUNBOOK);
    write_template(dir.path(), "b-postmortem.md", POSTMORTEM);

    let app = templyk_api::app(Config::local(dir.path()));
    let (status, body) = send(app, get("/templates")).await;

    assert_eq!(status, StatusCode::OK);
    let templates = body.as_array().unwrap();
    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0]["name"], "incident-runbook");
    assert_eq!(templates[1]["name"], "postmortem");
}

#[tokio::test]
async fn test_list_templates_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = templyk_api::app(Config::local(dir.path()));
    let (status, body) = send(app, get("/templates")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_templates_server_mode_is_501() {
    let app = templyk_api::app(Config::server());
    let (status, body) = send(app, get("/templates")).await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["error"].as_str().unwrap().contains("server-mode"));
}

#[tokio::test]
async fn test_get_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_template(dir.path(), "runbook.md", RUNBOOK);

    let app = templyk_api::app(Config::local(dir.path()));
    let uri = format!("/templates/{}", encode_ref(&path));
    let (status, body) = send(app, get(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "incident-runbook");
    assert_eq!(body["description"], "Step-by-step incident response");
    assert_eq!(body["tags"][0], "ops");
    assert_eq!(body["path"], path);
}

#[tokio::test]
async fn test_get_template_not_found_is_404() {
    let app = templyk_api::app(Config::default());
    let uri = format!("/templates/{}", encode_ref("/definitely/not/here.md"));
    let (status, body) = send(app, get(&uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_get_template_url_ref_is_501() {
    let app = templyk_api::app(Config::default());
    let uri = format!("/templates/{}", encode_ref("https://example.com/t.md"));
    let (status, body) = send(app, get(&uri)).await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["error"].as_str().unwrap().contains("URL"));
}

#[tokio::test]
async fn test_create_template_echoes_with_201() {
    let app = templyk_api::app(Config::default());
    let request = with_json(
        "POST",
        "/templates",
        json!({
            "name": "New Template",
            "description": "A new template",
            "tags": ["new", "test"],
            "content": "# New Template\n\nThis is a new template.",
        }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "New Template");
    assert_eq!(body["description"], "A new template");
}

#[tokio::test]
async fn test_create_template_with_missing_fields_is_422() {
    let app = templyk_api::app(Config::default());
    let request = with_json("POST", "/templates", json!({ "name": "Invalid Template" }));
    let (status, _body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_template_merges_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_template(dir.path(), "runbook.md", RUNBOOK);

    let app = templyk_api::app(Config::local(dir.path()));
    let uri = format!("/templates/{}", encode_ref(&path));
    let request = with_json("PATCH", &uri, json!({ "name": "Updated Template" }));
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Updated Template");
    assert_eq!(body["description"], "Step-by-step incident response");
}

#[tokio::test]
async fn test_update_missing_template_is_404() {
    let app = templyk_api::app(Config::default());
    let uri = format!("/templates/{}", encode_ref("/nope/none.md"));
    let request = with_json("PATCH", &uri, json!({ "name": "Updated" }));
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_delete_template_is_204() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_template(dir.path(), "runbook.md", RUNBOOK);

    let app = templyk_api::app(Config::local(dir.path()));
    let uri = format!("/templates/{}", encode_ref(&path));
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, _body) = send(app, request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

// ----------------------------------------------------------------------------
// Generation
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_generate_template() {
    let app = templyk_api::app(Config::default());
    let request = with_json(
        "POST",
        "/templates/generate",
        json!({
            "raw_markdown": "# Title\n\nThis is an explanatory paragraph.\n",
        }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], "# Title\n\n[Paragraph 1]\n");
}

#[tokio::test]
async fn test_generate_template_with_curly_style() {
    let app = templyk_api::app(Config::default());
    let request = with_json(
        "POST",
        "/templates/generate",
        json!({
            "raw_markdown": "## Sub-heading\n\nAnother paragraph.\n",
            "token_style": "curly",
        }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], "## Sub-heading\n\n{{Paragraph 1}}\n");
}

#[tokio::test]
async fn test_generate_with_invalid_frontmatter_is_422() {
    let app = templyk_api::app(Config::default());
    let request = with_json(
        "POST",
        "/templates/generate",
        json!({
            "raw_markdown": "# Doc\n\nBody.\n",
            "frontmatter": { "name": "only-a-name" },
        }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("description"));
}

#[tokio::test]
async fn test_generate_with_empty_markdown_is_422() {
    let app = templyk_api::app(Config::default());
    let request = with_json(
        "POST",
        "/templates/generate",
        json!({ "raw_markdown": "" }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

// ----------------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_get_user_returns_fixed_profile() {
    let app = templyk_api::app(Config::default());
    let (status, body) = send(app, get("/users/user-123")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "user-123");
    assert_eq!(body["email"], "test@test.com");
}

#[tokio::test]
async fn test_get_user_templates_is_empty() {
    let app = templyk_api::app(Config::default());
    let (status, body) = send(app, get("/users/user-123/templates")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

//! Integration tests for the host client against a local server.

use std::collections::HashMap;

use axum::extract::{Form, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use mmh_core::{RequestDescriptor, Transport, TransportError};
use mmh_http::{HostClient, USER_AGENT_VALUE};
use serde_json::{Value, json};

async fn defaults(Query(query): Query<HashMap<String, String>>, headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    Json(json!({
        "MessageTemplate": {
            "TemplateName": query.get("reasonId").cloned().unwrap_or_default(),
            "Footer": "Regards,\n\nModerators"
        },
        "Cookie": header("cookie"),
        "UserAgent": header("user-agent")
    }))
}

async fn save(Form(fields): Form<HashMap<String, String>>) -> Result<Redirect, StatusCode> {
    if fields.get("fkey").map(String::as_str) == Some("f") {
        Ok(Redirect::to("/users/42/moderator-messages"))
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

async fn serve() -> String {
    let router = Router::new()
        .route("/admin/template/defaults", get(defaults))
        .route("/admin/template/array", get(|| async { Json(json!([1, 2])) }))
        .route("/admin/template/html", get(|| async { "<html></html>" }))
        .route("/users/message/save", post(save))
        .route("/users/42/moderator-messages", get(|| async { "sent" }))
        .route("/users/42", get(|| async { Redirect::permanent("/users/42/jane-doe") }))
        .route("/users/42/jane-doe", get(|| async { "profile" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{address}")
}

#[tokio::test]
async fn test_get_json_sends_session_and_query() {
    let origin = serve().await;
    let client = HostClient::new(&origin, Some("acct=t=secret")).unwrap();
    let request = RequestDescriptor::get("/admin/template/defaults")
        .with_query("reasonId", "OtherViolation");

    let defaults = client.get_json(&request).await.unwrap();
    assert_eq!(defaults.template_name(), Some("OtherViolation"));
    assert_eq!(defaults.footer(), Some("Regards,\n\nModerators"));
    assert_eq!(defaults.as_map()["Cookie"], "acct=t=secret");
    assert_eq!(defaults.as_map()["UserAgent"], USER_AGENT_VALUE);
}

#[tokio::test]
async fn test_error_statuses_and_bad_payloads() {
    let origin = serve().await;
    let client = HostClient::new(&origin, None).unwrap();

    let missing = client
        .get_json(&RequestDescriptor::get("/admin/template/missing"))
        .await
        .unwrap_err();
    assert_eq!(
        missing,
        TransportError::Status {
            path: "/admin/template/missing".to_string(),
            status: 404,
        }
    );

    let array = client
        .get_json(&RequestDescriptor::get("/admin/template/array"))
        .await
        .unwrap_err();
    assert!(matches!(array, TransportError::InvalidResponse { .. }));

    let html = client
        .get_json(&RequestDescriptor::get("/admin/template/html"))
        .await
        .unwrap_err();
    assert!(matches!(html, TransportError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_post_form_follows_redirect() {
    let origin = serve().await;
    let client = HostClient::new(&origin, None).unwrap();
    let fields = vec![
        ("fkey".to_string(), "f".to_string()),
        ("templateEdit".to_string(), "Hello & goodbye".to_string()),
    ];

    let response = client.post_form("/users/message/save", &fields).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.url, format!("{origin}/users/42/moderator-messages"));
    assert_eq!(response.body, "sent");
}

#[tokio::test]
async fn test_post_form_returns_error_status() {
    let origin = serve().await;
    let client = HostClient::new(&origin, None).unwrap();
    let fields = vec![("fkey".to_string(), "wrong".to_string())];

    let response = client.post_form("/users/message/save", &fields).await.unwrap();
    assert_eq!(response.status, 403);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_resolve_url_follows_redirects() {
    let origin = serve().await;
    let client = HostClient::new(&origin, None).unwrap();
    let url = client.resolve_url("/users/42").await.unwrap();
    assert_eq!(url, format!("{origin}/users/42/jane-doe"));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = HostClient::new("http://127.0.0.1:9", None).unwrap();
    let err = client.resolve_url("/users/1").await.unwrap_err();
    assert!(matches!(err, TransportError::Network { .. }));
    assert_eq!(err.path(), "/users/1");
}

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use dokploy_setup::client::{ApiError, ClientOptions, DokployClient};
use dokploy_setup::Connection;

fn client(base_url: &str, key: &str) -> DokployClient {
    let connection = Connection::new(base_url, key).unwrap();
    let options = ClientOptions {
        timeout: Duration::from_secs(5),
        ..ClientOptions::default()
    };
    DokployClient::new(connection, &options).unwrap()
}

#[tokio::test]
async fn test_health_ok() {
    let base = common::spawn(common::dokploy_router(common::projects_body(0))).await;
    // Users often paste the API URL; it must resolve to the same endpoint.
    let body = client(&format!("{base}/api/"), common::API_KEY)
        .health()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_unauthorized() {
    let base = common::spawn(common::dokploy_router(common::projects_body(0))).await;
    let err = client(&base, "wrong-key").health().await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 401, .. }));
    let message = err.to_string();
    assert!(message.contains("401"), "{message}");
    assert!(message.contains("Unauthorized"), "{message}");
}

#[tokio::test]
async fn test_health_connection_refused() {
    let base = common::closed_port_url().await;
    let err = client(&base, common::API_KEY).health().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_health_non_json_body() {
    let app = Router::new().route("/api/settings.health", get(|| async { "<html>login</html>" }));
    let base = common::spawn(app).await;
    let err = client(&base, common::API_KEY).health().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_projects_listed_in_order() {
    let base = common::spawn(common::dokploy_router(common::projects_body(3))).await;
    let projects = client(&base, common::API_KEY).projects().await;
    let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["project-1", "project-2", "project-3"]);
    assert_eq!(projects[0].id, "prj_001_abcdefghijklmnopqrstuvwxyz");
}

#[tokio::test]
async fn test_projects_errors_degrade_to_empty() {
    let app = Router::new().route(
        "/api/trpc/project.all",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = common::spawn(app).await;
    assert!(client(&base, common::API_KEY).projects().await.is_empty());

    let base = common::spawn(common::dokploy_router(common::projects_body(2))).await;
    assert!(client(&base, "wrong-key").projects().await.is_empty());

    let base = common::closed_port_url().await;
    assert!(client(&base, common::API_KEY).projects().await.is_empty());
}

#[tokio::test]
async fn test_health_non_standard_status_keeps_reason() {
    let base = common::spawn_raw(
        "HTTP/1.1 520 Origin Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;
    let err = client(&base, common::API_KEY).health().await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 520, .. }));
    assert_eq!(err.to_string(), "HTTP 520: Origin Error");
}

#[tokio::test]
async fn test_self_signed_certificate_accepted_by_default() {
    let base = common::spawn_tls(common::HEALTH_OK_RESPONSE).await;
    let body = client(&base, common::API_KEY).health().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_self_signed_certificate_rejected_when_strict() {
    let base = common::spawn_tls(common::HEALTH_OK_RESPONSE).await;
    let connection = Connection::new(&base, common::API_KEY).unwrap();
    let options = ClientOptions {
        timeout: Duration::from_secs(5),
        accept_invalid_certs: false,
    };
    let err = DokployClient::new(connection, &options)
        .unwrap()
        .health()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}

//! In-process mock of the two Dokploy endpoints used by setup.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use rustls::pki_types::{CertificateDer, PrivatePkcs8KeyDer};
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

pub const API_KEY: &str = "abc123";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == API_KEY)
}

/// tRPC envelope as returned by `project.all`.
pub fn projects_body(count: usize) -> Value {
    let projects: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "name": format!("project-{i}"),
                "projectId": format!("prj_{i:0>3}_abcdefghijklmnopqrstuvwxyz"),
            })
        })
        .collect();
    json!({ "result": { "data": { "json": projects } } })
}

/// Router serving `settings.health` and `trpc/project.all` under `/api`.
pub fn dokploy_router(projects: Value) -> Router {
    Router::new()
        .route(
            "/api/settings.health",
            get(|headers: HeaderMap| async move {
                if authorized(&headers) {
                    (StatusCode::OK, Json(json!({ "status": "ok" })))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Unauthorized" })),
                    )
                }
            }),
        )
        .route(
            "/api/trpc/project.all",
            get(move |headers: HeaderMap| {
                let projects = projects.clone();
                async move {
                    if authorized(&headers) {
                        (StatusCode::OK, Json(projects))
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "message": "Unauthorized" })),
                        )
                    }
                }
            }),
        )
}

/// Serve `app` on an ephemeral port, returning its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Fixed `200 OK` health body, as written on the wire.
pub const HEALTH_OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\n\
Content-Type: application/json\r\n\
Content-Length: 15\r\n\
Connection: close\r\n\
\r\n\
{\"status\":\"ok\"}";

async fn answer<S>(mut stream: S, response: &'static str)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Answer every request with `response` verbatim, for status lines axum
/// cannot produce.
pub async fn spawn_raw(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(answer(stream, response));
        }
    });
    format!("http://{}", addr)
}

/// Like `spawn_raw`, behind TLS with a freshly generated self-signed
/// certificate.
pub async fn spawn_tls(response: &'static str) -> String {
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let key = PrivatePkcs8KeyDer::from(cert.key_pair.serialize_der());
    let chain = vec![CertificateDer::from(cert.cert.der().to_vec())];

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(chain, key.into())
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(tls) = acceptor.accept(stream).await {
                    answer(tls, response).await;
                }
            });
        }
    });
    format!("https://{}", addr)
}

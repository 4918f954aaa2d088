// File: crates/pie-core/tests/http_gateway.rs
// Purpose: HttpGateway against an in-process HTTP server (provider URLs, API key header, status mapping).

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use pie_core::{
    resolve, resolve_or_empty, Configuration, DataSource, DataSourceMode, FetchError, FileReference,
    GatewayConfig, HttpGateway,
};
use serde_json::{json, Value};

fn rows(tag: &str) -> Value {
    json!({
        "metadata": { "column_names": ["entity", "eth"] },
        "rows": [{ "entity": tag, "eth": 1 }]
    })
}

async fn query_results(Path(id): Path<String>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if headers.get("X-Dune-API-Key").and_then(|v| v.to_str().ok()) != Some("secret") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({ "execution_id": "01H", "result": rows(&format!("query-{id}")) })))
}

async fn content(Path(cid): Path<String>) -> Json<Value> {
    Json(rows(&format!("cid-{cid}")))
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/v1/query/:id/results", get(query_results))
        .route("/ipfs/:cid", get(content))
        .route("/custom", get(|| async { Json(rows("custom")) }))
        .route("/broken", get(|| async { "not json" }))
        .route("/down", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn gateway(addr: SocketAddr, api_key: Option<&str>) -> HttpGateway {
    HttpGateway::new(GatewayConfig {
        ipfs_gateway_url: format!("http://{addr}/ipfs"),
        dune_base_url: format!("http://{addr}/api/v1"),
        dune_api_key: api_key.map(str::to_string),
        timeout: Duration::from_secs(5),
    })
    .expect("client")
}

fn custom(addr: SocketAddr, path: &str) -> Configuration {
    Configuration {
        data_source: Some(DataSource::Custom),
        api_endpoint: Some(format!("http://{addr}{path}")),
        ..Configuration::default()
    }
}

#[tokio::test]
async fn dune_query_sends_api_key_and_unwraps_result() {
    let addr = spawn_server().await;
    let config = Configuration { query_id: Some("2030664".into()), ..Configuration::default() };

    let ds = resolve(&gateway(addr, Some("secret")), &config).await.expect("dataset");
    assert_eq!(ds.column_names, vec!["entity", "eth"]);
    assert_eq!(ds.rows[0]["entity"], "query-2030664");

    let err = resolve(&gateway(addr, None), &config).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 401, .. }), "got {err:?}");
}

#[tokio::test]
async fn custom_endpoint_and_snapshot_content() {
    let addr = spawn_server().await;
    let gw = gateway(addr, None);

    let ds = resolve(&gw, &custom(addr, "/custom")).await.expect("custom");
    assert_eq!(ds.rows[0]["entity"], "custom");

    let snapshot = Configuration {
        mode: DataSourceMode::Snapshot,
        file: Some(FileReference::new("bafy1")),
        ..Configuration::default()
    };
    let ds = resolve(&gw, &snapshot).await.expect("snapshot");
    assert_eq!(ds.rows[0]["entity"], "cid-bafy1");
}

#[tokio::test]
async fn upstream_failures_map_to_errors_and_degrade_to_empty() {
    let addr = spawn_server().await;
    let gw = gateway(addr, None);

    let err = resolve(&gw, &custom(addr, "/down")).await.unwrap_err();
    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(resolve(&gw, &custom(addr, "/broken")).await, Err(FetchError::MalformedPayload(_))));
    assert!(resolve_or_empty(&gw, &custom(addr, "/down")).await.is_empty());
}

#[tokio::test]
async fn unreachable_host_degrades_to_empty() {
    // port of a listener that is already closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let gw = gateway(addr, None);
    let err = resolve(&gw, &custom(addr, "/custom")).await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)), "got {err:?}");
    assert!(resolve_or_empty(&gw, &custom(addr, "/custom")).await.is_empty());
}

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use adapter::{AdapterError, Client, ClientOptions, Connection, RemoteResponse};
use async_trait::async_trait;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Scripted connection double: every verb answers with the same status and
/// body, and records the paths and bodies it saw.
struct ScriptedConnection {
    status: u16,
    body: Value,
    calls: Mutex<Vec<(String, String, Option<Value>)>>,
}

impl ScriptedConnection {
    fn new(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self { status, body, calls: Mutex::new(Vec::new()) })
    }

    fn record(&self, verb: &str, path: &str, body: Option<Value>) -> RemoteResponse {
        self.calls.lock().unwrap().push((verb.to_string(), path.to_string(), body));
        RemoteResponse { status: self.status, body: self.body.clone() }
    }

    fn calls(&self) -> Vec<(String, String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn get(&self, path: &str) -> Result<RemoteResponse, AdapterError> {
        Ok(self.record("GET", path, None))
    }
    async fn post(&self, path: &str, body: Value) -> Result<RemoteResponse, AdapterError> {
        Ok(self.record("POST", path, Some(body)))
    }
    async fn put(&self, path: &str, body: Value) -> Result<RemoteResponse, AdapterError> {
        Ok(self.record("PUT", path, Some(body)))
    }
    async fn delete(&self, path: &str) -> Result<RemoteResponse, AdapterError> {
        Ok(self.record("DELETE", path, None))
    }
}

fn client_with(connection: Arc<dyn Connection>) -> Client {
    Client::new(ClientOptions { connection: Some(connection), base_url: None })
}

#[tokio::test]
async fn get_service_passes_2xx_bodies_through_unmodified() -> anyhow::Result<()> {
    let body = json!({"id": "web-1", "actualState": "running", "desiredState": "running"});
    let conn = ScriptedConnection::new(200, body.clone());
    let client = client_with(conn.clone());

    let record = client.get_service("web-1").await?;
    assert_eq!(record, body);

    let calls = conn.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "GET");
    assert_eq!(calls[0].1, "v1/services/web-1");
    Ok(())
}

#[tokio::test]
async fn get_service_synthesizes_not_found_on_404() -> anyhow::Result<()> {
    let conn = ScriptedConnection::new(404, Value::Null);
    let client = client_with(conn);

    let record = client.get_service("ghost").await?;
    assert_eq!(record, json!({"id": "ghost", "actualState": "not found"}));
    Ok(())
}

#[tokio::test]
async fn get_service_never_fails_for_any_status() -> anyhow::Result<()> {
    for status in 100u16..=599 {
        let conn = ScriptedConnection::new(status, json!({"id": "s", "actualState": "running"}));
        let client = client_with(conn);
        let record = client.get_service("s").await?;

        match status {
            200..=299 => assert_eq!(record["actualState"], "running", "status {status}"),
            404 => assert_eq!(record, json!({"id": "s", "actualState": "not found"})),
            _ => assert_eq!(record, json!({"id": "s", "actualState": "error"}), "status {status}"),
        }
        // Synthesized records always echo the id they were asked for.
        assert_eq!(record["id"], "s");
    }
    Ok(())
}

#[tokio::test]
async fn update_service_returns_true_even_on_remote_5xx() -> anyhow::Result<()> {
    for status in [200u16, 400, 404, 500, 503] {
        let conn = ScriptedConnection::new(status, Value::Null);
        let client = client_with(conn.clone());

        assert!(client.update_service("web-1", json!("stopped")).await?);

        let calls = conn.calls();
        assert_eq!(calls[0].0, "PUT");
        assert_eq!(calls[0].1, "v1/services/web-1");
        assert_eq!(calls[0].2, Some(json!({"desiredState": "stopped"})));
    }
    Ok(())
}

#[tokio::test]
async fn delete_service_returns_true_without_inspecting_response() -> anyhow::Result<()> {
    let conn = ScriptedConnection::new(500, Value::Null);
    let client = client_with(conn.clone());

    assert!(client.delete_service("web-1").await?);
    assert_eq!(conn.calls()[0].0, "DELETE");
    assert_eq!(conn.calls()[0].1, "v1/services/web-1");
    Ok(())
}

#[tokio::test]
async fn create_services_returns_raw_response_body() -> anyhow::Result<()> {
    let created = json!([{"id": "web-1", "actualState": "pending"}]);
    let conn = ScriptedConnection::new(201, created.clone());
    let client = client_with(conn.clone());

    let specs = json!([{"id": "web-1", "desiredState": "running"}]);
    let body = client.create_services(&specs).await?;
    assert_eq!(body, created);

    let calls = conn.calls();
    assert_eq!(calls[0].0, "POST");
    assert_eq!(calls[0].1, "v1/services");
    assert_eq!(calls[0].2, Some(specs));
    Ok(())
}

// --- end-to-end against a mock orchestrator over real HTTP ---

/// Mock orchestrator: service ids that parse as a number answer with that
/// HTTP status; anything else answers 200 with a service record.
async fn mock_get(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    match id.parse::<u16>() {
        Ok(code) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(Value::Null),
        ),
        Err(_) => (
            StatusCode::OK,
            Json(json!({"id": id, "actualState": "running"})),
        ),
    }
}

async fn start_mock_orchestrator() -> anyhow::Result<String> {
    let app = Router::new()
        .route(
            "/v1/services",
            post(|Json(specs): Json<Value>| async move { (StatusCode::CREATED, Json(specs)) }),
        )
        .route(
            "/v1/services/:id",
            get(mock_get)
                .put(|| async { StatusCode::INTERNAL_SERVER_ERROR })
                .delete(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("mock orchestrator error: {}", e);
        }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

#[tokio::test]
async fn lifecycle_against_mock_orchestrator() -> anyhow::Result<()> {
    let base_url = start_mock_orchestrator().await?;
    let client = Client::new(ClientOptions { connection: None, base_url: Some(base_url) });

    // create echoes the submitted specs back
    let specs = json!([{"id": "web-1", "desiredState": "running"}]);
    assert_eq!(client.create_services(&specs).await?, specs);

    // 200 passes through, 404 and 500 are absorbed into data
    let record = client.get_service("web-1").await?;
    assert_eq!(record, json!({"id": "web-1", "actualState": "running"}));
    assert_eq!(
        client.get_service("404").await?,
        json!({"id": "404", "actualState": "not found"})
    );
    assert_eq!(
        client.get_service("503").await?,
        json!({"id": "503", "actualState": "error"})
    );

    // write verbs succeed regardless of the remote's 500s
    assert!(client.update_service("web-1", json!("stopped")).await?);
    assert!(client.delete_service("web-1").await?);
    Ok(())
}

#[tokio::test]
async fn unreachable_orchestrator_surfaces_connect_error() -> anyhow::Result<()> {
    // Bind then drop a listener so the port is known to refuse connections.
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = Client::new(ClientOptions {
        connection: None,
        base_url: Some(format!("http://{}:{}", addr.ip(), addr.port())),
    });

    let err = client.get_service("web-1").await.unwrap_err();
    assert!(matches!(err, AdapterError::Connect(_)), "got {err:?}");
    Ok(())
}

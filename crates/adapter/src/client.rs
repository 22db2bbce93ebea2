use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::connection::{Connection, HttpConnection};
use crate::errors::AdapterError;

pub const API_VERSION: &str = "v1";

/// Environment variable carrying the orchestrator's port descriptor
/// (docker-link style, e.g. `tcp://172.17.0.2:2375`).
const ADAPTER_PORT_VAR: &str = "ADAPTER_PORT";

#[derive(Default)]
pub struct ClientOptions {
    /// Used verbatim when supplied; bypasses URL resolution entirely.
    pub connection: Option<Arc<dyn Connection>>,
    pub base_url: Option<String>,
}

/// Lifecycle client for orchestrator-managed services.
///
/// Stateless apart from the connection, which is read-only after
/// construction; cloning the `Arc` is safe for concurrent use insofar as
/// the underlying transport is.
pub struct Client {
    connection: Arc<dyn Connection>,
}

impl Client {
    pub fn new(options: ClientOptions) -> Self {
        let connection = options.connection.unwrap_or_else(|| {
            let base_url = resolve_base_url(options.base_url).unwrap_or_default();
            Arc::new(HttpConnection::new(base_url))
        });
        Self { connection }
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Submit one or more service specifications to the orchestrator.
    /// Returns the raw parsed response body; no local validation, and
    /// transport failures propagate to the caller.
    pub async fn create_services<T: Serialize>(&self, services: &T) -> Result<Value, AdapterError> {
        let body = serde_json::to_value(services)
            .map_err(|e| AdapterError::Serialize(e.to_string()))?;
        let response = self.connection.post(&services_path(None), body).await?;
        Ok(response.body)
    }

    /// Read one service. Remote statuses are absorbed into the returned
    /// record rather than surfaced as errors:
    /// - 2xx: parsed body unchanged
    /// - 404: `{ id, actualState: "not found" }`
    /// - anything else: `{ id, actualState: "error" }`
    pub async fn get_service(&self, service_id: &str) -> Result<Value, AdapterError> {
        let response = self.connection.get(&services_path(Some(service_id))).await?;
        debug!(service_id, status = response.status, "get_service response");
        let record = match response.status {
            200..=299 => response.body,
            404 => json!({ "id": service_id, "actualState": "not found" }),
            _ => json!({ "id": service_id, "actualState": "error" }),
        };
        Ok(record)
    }

    /// Request a desired-state change. The remote response status is not
    /// inspected; any reply counts as accepted (contrast with
    /// [`Client::get_service`]).
    pub async fn update_service(&self, service_id: &str, desired_state: Value) -> Result<bool, AdapterError> {
        let body = json!({ "desiredState": desired_state });
        self.connection.put(&services_path(Some(service_id)), body).await?;
        Ok(true)
    }

    /// Fire-and-forget deletion; the remote response is not inspected.
    pub async fn delete_service(&self, service_id: &str) -> Result<bool, AdapterError> {
        self.connection.delete(&services_path(Some(service_id))).await?;
        Ok(true)
    }
}

/// Resolution order: explicit base URL, then the `ADAPTER_PORT` port
/// descriptor with its `tcp` scheme token swapped for `http`.
fn resolve_base_url(explicit: Option<String>) -> Option<String> {
    explicit.or_else(|| {
        std::env::var(ADAPTER_PORT_VAR)
            .ok()
            .map(|port| port.replace("tcp", "http"))
    })
}

fn services_path(service_id: Option<&str>) -> String {
    match service_id {
        Some(id) => format!("{}/services/{}", API_VERSION, id),
        None => format!("{}/services", API_VERSION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_path_is_versioned() {
        assert_eq!(services_path(None), "v1/services");
    }

    #[test]
    fn resource_path_appends_id() {
        assert_eq!(services_path(Some("web-1")), "v1/services/web-1");
    }

    #[test]
    fn explicit_base_url_wins() {
        assert_eq!(
            resolve_base_url(Some("http://orc:2375".into())).as_deref(),
            Some("http://orc:2375")
        );
    }

    #[test]
    fn port_descriptor_scheme_is_rewritten() {
        std::env::set_var(ADAPTER_PORT_VAR, "tcp://172.17.0.2:2375");
        let url = resolve_base_url(None);
        std::env::remove_var(ADAPTER_PORT_VAR);
        assert_eq!(url.as_deref(), Some("http://172.17.0.2:2375"));
    }
}

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AdapterError;

/// One remote round trip's outcome: the raw status plus the parsed body.
/// Bodies that are empty or not valid JSON parse to `Value::Null`.
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: Value,
}

/// Transport seam between the client and the orchestrator.
///
/// The default implementation is [`HttpConnection`]; tests substitute
/// doubles that script arbitrary statuses and bodies.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn get(&self, path: &str) -> Result<RemoteResponse, AdapterError>;
    async fn post(&self, path: &str, body: Value) -> Result<RemoteResponse, AdapterError>;
    async fn put(&self, path: &str, body: Value) -> Result<RemoteResponse, AdapterError>;
    async fn delete(&self, path: &str) -> Result<RemoteResponse, AdapterError>;
}

/// reqwest-backed connection. Serializes request bodies as JSON and parses
/// response bodies as JSON. Does not override the transport's default
/// timeouts and never retries.
pub struct HttpConnection {
    http: reqwest::Client,
    base_url: String,
}

impl HttpConnection {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn read(&self, resp: reqwest::Response) -> Result<RemoteResponse, AdapterError> {
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok(RemoteResponse { status, body })
    }
}

#[async_trait]
impl Connection for HttpConnection {
    async fn get(&self, path: &str) -> Result<RemoteResponse, AdapterError> {
        let resp = self.http.get(self.url(path)).send().await?;
        self.read(resp).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<RemoteResponse, AdapterError> {
        let resp = self.http.post(self.url(path)).json(&body).send().await?;
        self.read(resp).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<RemoteResponse, AdapterError> {
        let resp = self.http.put(self.url(path)).json(&body).send().await?;
        self.read(resp).await
    }

    async fn delete(&self, path: &str) -> Result<RemoteResponse, AdapterError> {
        let resp = self.http.delete(self.url(path)).send().await?;
        self.read(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let conn = HttpConnection::new("http://orc:2375");
        assert_eq!(conn.url("v1/services"), "http://orc:2375/v1/services");
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        let conn = HttpConnection::new("http://orc:2375/");
        assert_eq!(conn.url("v1/services/web"), "http://orc:2375/v1/services/web");
    }
}

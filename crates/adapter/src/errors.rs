use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// Transport could not establish or maintain a connection to the
    /// orchestrator. The exception boundary maps this to a translated
    /// user-facing message instead of the raw transport text.
    #[error("connection to orchestrator failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Request(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

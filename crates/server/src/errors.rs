//! Exception boundary: the single place failures become HTTP responses.
//!
//! Every uncaught failure ends as a formed response here; nothing
//! re-raises past this module. Connectivity failures get a translated
//! user-facing message instead of leaking transport internals.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::error;

use adapter::AdapterError;
use common::translations::{Translations, ADAPTER_CONNECTION_ERROR};

/// Error body schema: one field, always a resolved string.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// How the response message should be chosen.
pub enum ErrorMessage {
    /// Use the failure's own message; connectivity failures are swapped
    /// for the translated connection-error message.
    Default,
    /// Use this text verbatim.
    Text(String),
    /// Resolve through the translation service; missing keys fall back to
    /// the key's literal string form.
    Key(String),
}

static TRANSLATIONS: OnceCell<Arc<Translations>> = OnceCell::new();

/// Install the translation catalog for the process. Later calls are
/// no-ops; without a call the built-in catalog is used.
pub fn install_translations(translations: Arc<Translations>) {
    let _ = TRANSLATIONS.set(translations);
}

fn translations() -> &'static Translations {
    TRANSLATIONS.get_or_init(|| Arc::new(Translations::new()))
}

/// Convert a failure into a 500 response with a `{ "message": ... }` body,
/// logging it at error level.
pub fn handle_exception(failure: &anyhow::Error, message: ErrorMessage) -> Response {
    error!(error = %failure, "request failed");
    let message = match message {
        ErrorMessage::Text(text) => text,
        ErrorMessage::Key(key) => translations().resolve_or_key(&key),
        ErrorMessage::Default => {
            if is_connectivity(failure) {
                translations().resolve_or_key(ADAPTER_CONNECTION_ERROR)
            } else {
                failure.to_string()
            }
        }
    };
    error_response(message)
}

/// Override hook: the handler produces the whole response (status and
/// body); default logging and response construction are skipped.
pub fn handle_exception_with<F>(failure: &anyhow::Error, handler: F) -> Response
where
    F: FnOnce(&anyhow::Error) -> Response,
{
    handler(failure)
}

fn is_connectivity(failure: &anyhow::Error) -> bool {
    matches!(
        failure.downcast_ref::<AdapterError>(),
        Some(AdapterError::Connect(_))
    )
}

fn error_response(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { message })).into_response()
}

/// Uncaught-failure wrapper for handlers; `?` converts any error into it
/// and `IntoResponse` routes it through the default boundary path.
pub struct AppError(pub anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_exception(&self.0, ErrorMessage::Default)
    }
}

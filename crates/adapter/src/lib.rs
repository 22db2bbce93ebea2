//! Client for the workload-orchestration backend.
//!
//! Issues lifecycle calls (create/get/update/delete) against the
//! orchestrator's versioned REST namespace and normalizes read responses
//! into a small, predictable shape. Transport failures propagate to the
//! caller; the server crate's exception boundary turns them into HTTP
//! responses.

pub mod client;
pub mod connection;
pub mod errors;

pub use client::{Client, ClientOptions, API_VERSION};
pub use connection::{Connection, HttpConnection, RemoteResponse};
pub use errors::AdapterError;

//! Data Transfer Objects for the dashboard API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `POST /api/run-algorithm`.
///
/// The demo producer only logs these fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAlgorithmRequest {
    #[serde(default)]
    pub problem_input: Value,
    #[serde(default)]
    pub want_output: Value,
}

/// Body of `POST /api/circuits/render`.
///
/// `frame` is decoded by the handler so frame errors map to `400`.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub frame: Value,
    /// Qubit lines to draw; the server default when absent.
    #[serde(default)]
    pub qubits: Option<usize>,
}

//! Circuit rendering endpoint.

use std::sync::Arc;

use axum::{Json, extract::State, http::header, response::IntoResponse};
use qcanvas_render::{CircuitFrame, QuantumCanvas};
use qcanvas_scene::Container;
use tracing::debug;

use crate::dto::RenderRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// Id of the container the server-side canvas mounts into.
const CONTAINER_ID: &str = "canvas-container";

/// POST /api/circuits/render - Render one frame to SVG.
pub async fn render(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let frame = CircuitFrame::from_value(req.frame)?;
    let qubits = req.qubits.unwrap_or(state.config.default_qubits);
    if qubits == 0 || qubits > state.config.max_qubits {
        return Err(ApiError::BadRequest(format!(
            "qubits must be between 1 and {}, got {qubits}",
            state.config.max_qubits
        )));
    }

    let mut canvas = QuantumCanvas::mount(
        Some(&Container::new(CONTAINER_ID)),
        state.config.render.clone(),
    )
    .ok_or_else(|| ApiError::Internal("canvas did not mount".into()))?;
    canvas.set_qubit_count(qubits);
    canvas.draw_frame(&frame);
    debug!(
        qubits,
        epoch = frame.epoch,
        gates = frame.gate_count(),
        "Rendered frame"
    );

    let svg = canvas.to_svg()?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

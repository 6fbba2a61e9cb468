//! Demo optimizer streaming circuit frames.
//!
//! Each run emits `total_epochs` frames as server-sent events. A frame is a
//! random draw of 3 to 5 distinct columns from a fixed pool of three-qubit
//! gate columns, so the canvas has something to redraw at every epoch.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::sse::{Event, Sse},
};
use futures::Stream;
use qcanvas_render::CircuitFrame;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dto::RunAlgorithmRequest;
use crate::state::AppState;

/// Columns the demo producer draws from.
pub const GATE_POOL: [[i64; 3]; 5] = [[1, 1, 3], [1, 3, 1], [1, 0, 3], [0, 0, 3], [0, 1, 3]];

/// Draw one demo frame.
pub fn sample_frame<R: Rng + ?Sized>(rng: &mut R, epoch: u64, total_epochs: u64) -> CircuitFrame {
    let count = rng.gen_range(3..=5);
    let columns = GATE_POOL.choose_multiple(rng, count).copied();
    CircuitFrame::from_codes(epoch, total_epochs, columns)
}

/// POST /api/run-algorithm - Stream a demo run as `text/event-stream`.
pub async fn run_algorithm(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunAlgorithmRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let run_id = Uuid::new_v4();
    let ordinal = state.start_run();
    let total = state.config.total_epochs;
    let interval = state.config.epoch_interval;
    info!(
        %run_id,
        ordinal,
        total_epochs = total,
        problem_input = %req.problem_input,
        want_output = %req.want_output,
        "Starting demo run"
    );

    let frames = futures::stream::unfold(1_u64, move |epoch| async move {
        if epoch > total {
            info!(%run_id, "Demo run finished");
            return None;
        }
        tokio::time::sleep(interval).await;

        let frame = sample_frame(&mut rand::thread_rng(), epoch, total);
        debug!(%run_id, epoch, columns = frame.columns().len(), "Emitting frame");
        Some((Ok(frame_event(&frame)), epoch + 1))
    });

    Sse::new(frames)
}

fn frame_event(frame: &CircuitFrame) -> Event {
    match Event::default().json_data(frame) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, epoch = frame.epoch, "Frame did not serialize");
            Event::default().comment("unserializable frame")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_frame_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for epoch in 1..=100 {
            let frame = sample_frame(&mut rng, epoch, 100);
            let columns = frame.columns();
            assert!((3..=5).contains(&columns.len()));
            for column in columns {
                let codes: Vec<i64> = column.iter().map(|c| c.code()).collect();
                assert!(GATE_POOL.iter().any(|p| p.as_slice() == codes.as_slice()));
            }
            for (i, a) in columns.iter().enumerate() {
                assert!(columns[i + 1..].iter().all(|b| a != b), "columns are distinct");
            }
        }
    }

    #[test]
    fn test_sample_frame_epochs() {
        let frame = sample_frame(&mut StdRng::seed_from_u64(1), 4, 50);
        assert_eq!(frame.epoch, 4);
        assert_eq!(frame.total_epochs, 50);
    }
}

//! qcanvas Dashboard - local server for the streaming circuit canvas.
//!
//! Serves a demo optimizer that streams circuit frames as server-sent events,
//! plus an endpoint that renders a single frame to SVG with the same painter
//! the canvas uses.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qcanvas_dashboard::{AppState, DashboardConfig, create_router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DashboardConfig::default();
//!     let state = Arc::new(AppState::with_config(config.clone()));
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind(config.bind_address).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod api;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;

pub use dto::{HealthResponse, RenderRequest, RunAlgorithmRequest};
pub use error::ApiError;
pub use server::create_router;
pub use state::{AppState, DashboardConfig};

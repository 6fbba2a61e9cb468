//! qcanvas Stream Consumer
//!
//! Posts a run request to a streaming endpoint and feeds each
//! `data:`-framed [`CircuitFrame`](qcanvas_render::CircuitFrame) to a
//! [`FrameSink`], usually a [`QuantumCanvas`](qcanvas_render::QuantumCanvas).
//!
//! # Example
//!
//! ```rust,no_run
//! use qcanvas_render::{QuantumCanvas, RenderConfig};
//! use qcanvas_scene::Container;
//! use qcanvas_stream::{HttpSource, RunRequest, StreamConsumer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut canvas = QuantumCanvas::mount(Some(&Container::new("canvas-container")), RenderConfig::default())
//!     .ok_or("no container")?;
//! canvas.set_qubit_count(3);
//!
//! let source = HttpSource::new("http://127.0.0.1:5000/api/run-algorithm")?;
//! let mut consumer = StreamConsumer::new(&mut canvas);
//! let summary = consumer.run(&source, &RunRequest::default()).await?;
//! println!("{} frames", summary.frames_rendered);
//! # Ok(())
//! # }
//! ```

pub mod consumer;
pub mod decoder;
pub mod error;
pub mod request;
pub mod source;

pub use consumer::{
    CONNECTING_MESSAGE, FrameSink, StreamConsumer, StreamState, StreamSummary, epoch_message,
};
pub use decoder::EventDecoder;
pub use error::{StreamError, StreamResult};
pub use request::RunRequest;
pub use source::{ByteStream, FrameSource, HttpSource, ReplaySource};

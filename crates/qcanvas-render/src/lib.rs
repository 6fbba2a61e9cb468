//! qcanvas Circuit Rendering
//!
//! Turns streamed circuit frames into a painted [`Stage`](qcanvas_scene::Stage).
//!
//! # Core Components
//!
//! - **Frames**: [`CircuitFrame`] and [`GateCode`], the wire format of one
//!   snapshot of a gate layout
//! - **Renderer**: [`CircuitRenderer`] places glyphs on a discrete grid and
//!   derives connectors and column labels from glyph positions alone
//! - **Overlay**: [`LoadingOverlay`], a modal dimmer with status text and a
//!   progress bar
//! - **Canvas**: [`QuantumCanvas`], the owned handle tying the three to one stage
//!
//! # Example
//!
//! ```rust
//! use qcanvas_render::{CircuitFrame, QuantumCanvas, RenderConfig};
//! use qcanvas_scene::Container;
//!
//! let container = Container::new("canvas-container");
//! let mut canvas = QuantumCanvas::mount(Some(&container), RenderConfig::default()).unwrap();
//! canvas.set_qubit_count(2);
//!
//! let frame = CircuitFrame::from_json(r#"{"epoch":1,"total_epochs":2,"circuit":[[3,1],[0,3]]}"#).unwrap();
//! canvas.set_progress(frame.epoch, frame.total_epochs);
//! canvas.draw_frame(&frame);
//!
//! assert_eq!(canvas.gates().len(), 4);
//! assert_eq!(canvas.connectors().len(), 2);
//! ```
//!
//! # Gate codes
//!
//! | Code | [`GateCode`] | Glyph |
//! |------|--------------|-------|
//! | `0` | `ControlZero` | hollow dot |
//! | `1` | `ControlOne` | filled dot |
//! | `3` | `Target` | ⊕ |
//! | other | `Empty` | none |

pub mod canvas;
pub mod config;
pub mod error;
pub mod frame;
pub mod overlay;
pub mod renderer;

pub use canvas::QuantumCanvas;
pub use config::{DEFAULT_QUBITS, RenderConfig, parse_qubit_count};
pub use error::{FrameError, FrameResult};
pub use frame::{CircuitFrame, Column, GateCode};
pub use overlay::LoadingOverlay;
pub use renderer::{CircuitRenderer, ColumnLabel, Connector, QubitLineSet};

//! qcanvas Scene Graph
//!
//! A small retained-mode scene graph used to paint streamed quantum circuits.
//!
//! # Overview
//!
//! A [`Stage`] owns five independently clearable [`Layer`]s that are painted in
//! a fixed order:
//!
//! ```text
//!   track  ──→  connector  ──→  gate  ──→  loading  ──→  scroll
//!  (bottom)                                              (top)
//! ```
//!
//! - **Track**: horizontal qubit lines and their `Q{i}` labels
//! - **Connector**: vertical lines joining glyphs of one column, column labels
//! - **Gate**: the circuit glyphs themselves ([`GlyphKind`])
//! - **Loading**: the modal progress overlay
//! - **Scroll**: horizontal and vertical [`Scrollbar`]s
//!
//! The gate, connector and track layers share one pan offset, driven only by
//! dragging a scrollbar thumb ([`Stage::drag_thumb`]).
//!
//! # Example
//!
//! ```rust
//! use qcanvas_scene::{Container, GlyphKind, Point, Stage};
//!
//! let container = Container::new("canvas-container");
//! let mut stage = Stage::initialize(Some(&container), 800.0, 500.0).unwrap();
//!
//! stage.add_gate(Point::new(100.0, 120.0), GlyphKind::Target);
//! stage.add_gate(Point::new(100.0, 220.0), GlyphKind::ControlOne);
//! assert_eq!(stage.gates().count(), 2);
//!
//! let svg = qcanvas_scene::to_svg(&stage).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod error;
pub mod geometry;
pub mod layer;
pub mod node;
pub mod scroll;
pub mod stage;
pub mod svg;

pub use error::{SceneError, SceneResult};
pub use geometry::{Axis, Point, Rect, Size};
pub use layer::{Layer, LayerKind, NodeId};
pub use node::{GlyphKind, Node, Shape, Stroke, TextStyle};
pub use scroll::{ScrollState, Scrollbar};
pub use stage::{Container, Gate, Stage};
pub use svg::to_svg;

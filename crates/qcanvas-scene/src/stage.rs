//! The stage: five layers, two scrollbars and the shared pan state.

use tracing::{debug, trace};

use crate::geometry::{Axis, Point, Rect, Size};
use crate::layer::{Layer, LayerKind, NodeId};
use crate::node::{GlyphKind, Node, Shape};
use crate::scroll::{ScrollState, Scrollbar};

/// Thickness of both scrollbars.
pub const SCROLL_SIZE: f64 = 10.0;

/// Gap between the stage edge and the start of a scrollbar track.
const SCROLL_MARGIN: f64 = 50.0;

/// Distance of a scrollbar from the far stage edge.
const SCROLL_INSET: f64 = 15.0;

/// Padding added past the last gate or qubit line when sizing content.
pub const CONTENT_MARGIN: f64 = 150.0;

/// A named host element a stage can be mounted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    id: String,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A gate glyph as placed on the gate layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    pub position: Point,
    pub kind: GlyphKind,
}

/// Owner of every layer and of the scroll state.
#[derive(Debug, Clone)]
pub struct Stage {
    container_id: String,
    size: Size,
    layers: [Layer; 5],
    h_scroll: Scrollbar,
    v_scroll: Scrollbar,
    scroll: ScrollState,
    virtual_extent: Size,
}

impl Stage {
    /// Mount a stage of the given size into `container`.
    ///
    /// Returns `None` without raising when the container is missing.
    pub fn initialize(container: Option<&Container>, width: f64, height: f64) -> Option<Self> {
        let Some(container) = container else {
            debug!("canvas container not found; stage not initialized");
            return None;
        };

        let h_scroll = Scrollbar::new(
            Axis::Horizontal,
            Rect::new(
                SCROLL_MARGIN,
                height - SCROLL_INSET,
                width - 2.0 * SCROLL_MARGIN,
                SCROLL_SIZE,
            ),
        );
        let v_scroll = Scrollbar::new(
            Axis::Vertical,
            Rect::new(
                width - SCROLL_INSET,
                SCROLL_MARGIN,
                SCROLL_SIZE,
                height - 2.0 * SCROLL_MARGIN,
            ),
        );

        let mut stage = Self {
            container_id: container.id().to_string(),
            size: Size::new(width, height),
            layers: LayerKind::PAINT_ORDER.map(Layer::new),
            h_scroll,
            v_scroll,
            scroll: ScrollState::default(),
            virtual_extent: Size::new(width, height),
        };
        stage.sync_scroll_layer();

        debug!(container = %stage.container_id, width, height, "stage initialized");
        Some(stage)
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Viewport size.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind.index()]
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        &mut self.layers[kind.index()]
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Remove gates and connectors and scroll back to the origin.
    ///
    /// Track lines and the loading overlay are left as they are.
    pub fn clear(&mut self) {
        self.layer_mut(LayerKind::Gate).destroy_children();
        self.layer_mut(LayerKind::Connector).destroy_children();

        self.scroll = ScrollState::default();
        self.apply_pan();

        self.h_scroll.reset();
        self.v_scroll.reset();
        self.sync_scroll_layer();
        trace!("stage cleared");
    }

    /// Append a non-draggable glyph to the gate layer.
    ///
    /// Overlapping gates are allowed; the later one paints on top.
    pub fn add_gate(&mut self, position: Point, kind: GlyphKind) -> NodeId {
        self.layer_mut(LayerKind::Gate).add(Node::glyph(position, kind))
    }

    /// Gates in paint order.
    pub fn gates(&self) -> impl Iterator<Item = Gate> + '_ {
        self.layer(LayerKind::Gate)
            .children()
            .iter()
            .filter_map(|node| {
                node.glyph_kind().map(|kind| Gate {
                    position: node.position,
                    kind,
                })
            })
    }

    /// Content width: the viewport, or further if a gate sits near the edge.
    pub fn virtual_width(&self) -> f64 {
        self.gates()
            .map(|gate| gate.position.x + CONTENT_MARGIN)
            .fold(self.size.width, f64::max)
    }

    /// Content height for the given qubit line positions.
    pub fn virtual_height(&self, track_ys: &[f64]) -> f64 {
        track_ys
            .last()
            .map_or(self.size.height, |y| y + CONTENT_MARGIN)
    }

    /// Extent the scrollbars were last sized for.
    pub fn virtual_extent(&self) -> Size {
        self.virtual_extent
    }

    /// Resize both thumbs for new content extents.
    pub fn update_scrollbars(&mut self, virtual_extent: Size) {
        self.virtual_extent = virtual_extent;
        self.h_scroll.resize(self.size.width, virtual_extent.width);
        self.v_scroll.resize(self.size.height, virtual_extent.height);

        // Thumbs may have been clamped; the scroll position follows them.
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let ratio = self.scrollbar(axis).ratio();
            let max = self.max_scroll(axis);
            self.scroll.set(axis, ratio * max, max);
        }
        self.apply_pan();
        self.sync_scroll_layer();
    }

    pub fn scrollbar(&self, axis: Axis) -> &Scrollbar {
        match axis {
            Axis::Horizontal => &self.h_scroll,
            Axis::Vertical => &self.v_scroll,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    /// Drag a scrollbar thumb to `position` along its axis.
    ///
    /// This is the only way the pan offset changes. Hidden scrollbars ignore
    /// the drag. Returns the resulting scroll position.
    pub fn drag_thumb(&mut self, axis: Axis, position: f64) -> f64 {
        let bar = match axis {
            Axis::Horizontal => &mut self.h_scroll,
            Axis::Vertical => &mut self.v_scroll,
        };
        if !bar.is_visible() {
            return self.scroll.get(axis);
        }

        let ratio = bar.drag_to(position);
        let max = self.max_scroll(axis);
        let scrolled = self.scroll.set(axis, ratio * max, max);
        self.apply_pan();
        self.sync_scroll_layer();

        trace!(%axis, scrolled, "scrollbar dragged");
        scrolled
    }

    fn max_scroll(&self, axis: Axis) -> f64 {
        (self.virtual_extent.along(axis) - self.size.along(axis)).max(0.0)
    }

    fn apply_pan(&mut self) {
        let offset = self.scroll.pan_offset();
        for layer in self.layers.iter_mut().filter(|l| l.kind().pans()) {
            layer.set_offset(offset);
        }
    }

    fn sync_scroll_layer(&mut self) {
        let bars = [self.h_scroll.clone(), self.v_scroll.clone()];
        let layer = self.layer_mut(LayerKind::Scroll);
        layer.destroy_children();

        for bar in bars {
            let track = bar.track();
            let mut track_node = rect_node(track, "#333", 0.5);
            track_node.visible = bar.is_visible();
            layer.add(track_node);

            let mut thumb_node = rect_node(bar.thumb(), "#888", 1.0);
            thumb_node.visible = bar.is_visible();
            thumb_node.draggable = true;
            layer.add(thumb_node);
        }
    }
}

fn rect_node(rect: Rect, fill: &'static str, opacity: f64) -> Node {
    Node::new(
        Point::new(rect.x, rect.y),
        Shape::Rect {
            width: rect.width,
            height: rect.height,
            fill,
            stroke: None,
            corner_radius: 5.0,
            opacity,
        },
    )
}

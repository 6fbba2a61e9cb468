//! Drawing layers.

use std::fmt;

use crate::geometry::Point;
use crate::node::Node;

/// The five layers of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Track,
    Connector,
    Gate,
    Loading,
    Scroll,
}

impl LayerKind {
    /// All layers, bottom to top.
    pub const PAINT_ORDER: [LayerKind; 5] = [
        LayerKind::Track,
        LayerKind::Connector,
        LayerKind::Gate,
        LayerKind::Loading,
        LayerKind::Scroll,
    ];

    /// Position of the layer in [`LayerKind::PAINT_ORDER`].
    pub fn index(self) -> usize {
        match self {
            LayerKind::Track => 0,
            LayerKind::Connector => 1,
            LayerKind::Gate => 2,
            LayerKind::Loading => 3,
            LayerKind::Scroll => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Track => "track",
            LayerKind::Connector => "connector",
            LayerKind::Gate => "gate",
            LayerKind::Loading => "loading",
            LayerKind::Scroll => "scroll",
        }
    }

    /// Whether the layer follows the scroll position.
    pub fn pans(self) -> bool {
        matches!(
            self,
            LayerKind::Track | LayerKind::Connector | LayerKind::Gate
        )
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a node inside one layer.
///
/// Stays valid until the layer's children are destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// An ordered list of nodes sharing one offset.
#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    offset: Point,
    nodes: Vec<Node>,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            offset: Point::ORIGIN,
            nodes: Vec::new(),
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Pan offset applied to every node of the layer.
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Append a node; later nodes paint on top of earlier ones.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Children in paint order.
    pub fn children(&self) -> &[Node] {
        &self.nodes
    }

    /// Remove every node. Outstanding [`NodeId`]s become dangling.
    pub fn destroy_children(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

//! Scene nodes and the shapes they draw.

use std::fmt;

use crate::geometry::Point;

/// Glyph drawn for a gate on the gate layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKind {
    /// The controlled-NOT target: a ring with a cross.
    Target,
    /// Control conditioned on |1⟩: a filled dot.
    ControlOne,
    /// Control conditioned on |0⟩: a hollow dot.
    ControlZero,
}

impl GlyphKind {
    /// Stable name used in SVG class attributes.
    pub fn name(self) -> &'static str {
        match self {
            GlyphKind::Target => "target",
            GlyphKind::ControlOne => "control-1",
            GlyphKind::ControlZero => "control-0",
        }
    }

    /// Primitive parts of the glyph, relative to the glyph's position.
    pub fn parts(self) -> Vec<Node> {
        match self {
            GlyphKind::Target => vec![
                // White halo masks the track line behind the ring.
                Node::new(
                    Point::ORIGIN,
                    Shape::Circle {
                        radius: 16.0,
                        fill: "white",
                        stroke: Some(Stroke::new("white", 3.0)),
                    },
                ),
                Node::new(
                    Point::ORIGIN,
                    Shape::Circle {
                        radius: 13.0,
                        fill: "white",
                        stroke: Some(Stroke::new("black", 1.0)),
                    },
                ),
                Node::line(
                    Point::new(-15.0, 0.0),
                    Point::new(15.0, 0.0),
                    Stroke::new("black", 2.0),
                ),
                Node::line(
                    Point::new(0.0, -15.0),
                    Point::new(0.0, 15.0),
                    Stroke::new("black", 2.0),
                ),
            ],
            GlyphKind::ControlOne | GlyphKind::ControlZero => vec![Node::new(
                Point::ORIGIN,
                Shape::Circle {
                    radius: 8.0,
                    fill: if self == GlyphKind::ControlOne {
                        "#1a1a1a"
                    } else {
                        "white"
                    },
                    stroke: Some(Stroke::new("black", 2.0)),
                },
            )],
        }
    }
}

impl fmt::Display for GlyphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stroke colour and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: &'static str, width: f64) -> Self {
        Self { color, width }
    }
}

/// Font settings for text nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub bold: bool,
    pub fill: &'static str,
    /// Fixed box width; text is centred inside it when set.
    pub width: Option<f64>,
}

impl TextStyle {
    pub const fn new(font_size: f64, fill: &'static str) -> Self {
        Self {
            font_size,
            bold: false,
            fill,
            width: None,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn centered_in(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

/// What a node draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Straight segment between two points relative to the node position.
    Line { from: Point, to: Point, stroke: Stroke },
    /// Text anchored at its top-left corner.
    Text { text: String, style: TextStyle },
    Rect {
        width: f64,
        height: f64,
        fill: &'static str,
        stroke: Option<Stroke>,
        corner_radius: f64,
        opacity: f64,
    },
    Circle {
        radius: f64,
        fill: &'static str,
        stroke: Option<Stroke>,
    },
    /// A gate glyph, expanded by [`GlyphKind::parts`] when painted.
    Glyph(GlyphKind),
}

/// A positioned, optionally hidden shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Point,
    pub shape: Shape,
    pub visible: bool,
    pub draggable: bool,
}

impl Node {
    pub fn new(position: Point, shape: Shape) -> Self {
        Self {
            position,
            shape,
            visible: true,
            draggable: false,
        }
    }

    /// A line from `from` to `to`, both in the coordinates of the layer.
    pub fn line(from: Point, to: Point, stroke: Stroke) -> Self {
        Self::new(Point::ORIGIN, Shape::Line { from, to, stroke })
    }

    pub fn text(position: Point, text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(
            position,
            Shape::Text {
                text: text.into(),
                style,
            },
        )
    }

    pub fn glyph(position: Point, kind: GlyphKind) -> Self {
        Self::new(position, Shape::Glyph(kind))
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// The glyph kind, if this node is a gate glyph.
    pub fn glyph_kind(&self) -> Option<GlyphKind> {
        match self.shape {
            Shape::Glyph(kind) => Some(kind),
            _ => None,
        }
    }

    /// The text content, if this node is a text node.
    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Width of a rectangle node.
    pub fn rect_width(&self) -> Option<f64> {
        match self.shape {
            Shape::Rect { width, .. } => Some(width),
            _ => None,
        }
    }

    /// Set the width of a rectangle node; other shapes are left untouched.
    pub fn set_rect_width(&mut self, new_width: f64) {
        if let Shape::Rect { width, .. } = &mut self.shape {
            *width = new_width;
        }
    }

    /// Replace the text of a text node; other shapes are left untouched.
    pub fn set_text(&mut self, new_text: impl Into<String>) {
        if let Shape::Text { text, .. } = &mut self.shape {
            *text = new_text.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_glyph_parts() {
        let parts = GlyphKind::Target.parts();
        assert_eq!(parts.len(), 4);
        assert!(matches!(parts[0].shape, Shape::Circle { radius, .. } if radius == 16.0));
        assert!(matches!(parts[1].shape, Shape::Circle { radius, .. } if radius == 13.0));
    }

    #[test]
    fn test_control_glyph_fill() {
        let filled = GlyphKind::ControlOne.parts();
        let hollow = GlyphKind::ControlZero.parts();
        assert!(matches!(filled[0].shape, Shape::Circle { fill: "#1a1a1a", .. }));
        assert!(matches!(hollow[0].shape, Shape::Circle { fill: "white", .. }));
    }

    #[test]
    fn test_set_rect_width_ignores_other_shapes() {
        let mut text = Node::text(Point::ORIGIN, "hi", TextStyle::new(12.0, "black"));
        text.set_rect_width(10.0);
        assert_eq!(text.text_content(), Some("hi"));
        assert_eq!(text.rect_width(), None);
    }

    #[test]
    fn test_glyph_nodes_are_not_draggable() {
        let node = Node::glyph(Point::new(100.0, 120.0), GlyphKind::Target);
        assert!(!node.draggable);
        assert_eq!(node.glyph_kind(), Some(GlyphKind::Target));
    }
}

//! SVG painter for a stage.
//!
//! Each layer becomes a `<g>` element translated by the layer's pan offset,
//! emitted bottom to top so the document paints in stage order. Hidden nodes
//! are skipped.

use std::fmt::Write;

use crate::error::SceneResult;
use crate::layer::Layer;
use crate::node::{Node, Shape, Stroke};
use crate::stage::Stage;

/// Serialize the whole stage as a standalone SVG document.
pub fn to_svg(stage: &Stage) -> SceneResult<String> {
    let mut out = String::new();
    let size = stage.size();

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        escape(stage.container_id()),
        size.width,
        size.height,
        size.width,
        size.height
    )?;
    writeln!(
        out,
        r#"<rect class="background" width="{}" height="{}" fill="white"/>"#,
        size.width, size.height
    )?;

    for layer in stage.layers() {
        write_layer(&mut out, layer)?;
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn write_layer(out: &mut String, layer: &Layer) -> SceneResult<()> {
    let offset = layer.offset();
    writeln!(
        out,
        r#"<g class="layer-{}" transform="translate({} {})">"#,
        layer.kind(),
        offset.x,
        offset.y
    )?;
    for node in layer.children().iter().filter(|n| n.visible) {
        write_node(out, node)?;
    }
    out.push_str("</g>\n");
    Ok(())
}

fn write_node(out: &mut String, node: &Node) -> SceneResult<()> {
    let pos = node.position;
    match &node.shape {
        Shape::Line { from, to, stroke } => {
            writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                pos.x + from.x,
                pos.y + from.y,
                pos.x + to.x,
                pos.y + to.y,
                stroke_attrs(Some(*stroke))
            )?;
        }
        Shape::Text { text, style } => {
            let (x, anchor) = match style.width {
                Some(width) => (pos.x + width / 2.0, "middle"),
                None => (pos.x, "start"),
            };
            writeln!(
                out,
                r#"<text x="{}" y="{}" font-size="{}"{} fill="{}" text-anchor="{}" dominant-baseline="hanging">{}</text>"#,
                x,
                pos.y,
                style.font_size,
                if style.bold { r#" font-weight="bold""# } else { "" },
                style.fill,
                anchor,
                escape(text)
            )?;
        }
        Shape::Rect {
            width,
            height,
            fill,
            stroke,
            corner_radius,
            opacity,
        } => {
            writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" opacity="{}"{}/>"#,
                pos.x,
                pos.y,
                width,
                height,
                corner_radius,
                fill,
                opacity,
                stroke_attrs(*stroke)
            )?;
        }
        Shape::Circle {
            radius,
            fill,
            stroke,
        } => {
            writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
                pos.x,
                pos.y,
                radius,
                fill,
                stroke_attrs(*stroke)
            )?;
        }
        Shape::Glyph(kind) => {
            writeln!(
                out,
                r#"<g class="gate {}" transform="translate({} {})">"#,
                kind, pos.x, pos.y
            )?;
            for part in kind.parts() {
                write_node(out, &part)?;
            }
            out.push_str("</g>\n");
        }
    }
    Ok(())
}

fn stroke_attrs(stroke: Option<Stroke>) -> String {
    match stroke {
        Some(s) => format!(r#" stroke="{}" stroke-width="{}""#, s.color, s.width),
        None => String::new(),
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Axis, Point, Size};
    use crate::layer::LayerKind;
    use crate::node::{GlyphKind, TextStyle};
    use crate::stage::Container;

    fn stage() -> Stage {
        Stage::initialize(Some(&Container::new("canvas-container")), 800.0, 500.0).unwrap()
    }

    #[test]
    fn test_layers_emitted_in_paint_order() {
        let svg = to_svg(&stage()).unwrap();
        let positions: Vec<_> = ["track", "connector", "gate", "loading", "scroll"]
            .iter()
            .map(|name| svg.find(&format!("layer-{name}")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_glyph_expanded() {
        let mut stage = stage();
        stage.add_gate(Point::new(100.0, 120.0), GlyphKind::Target);
        let svg = to_svg(&stage).unwrap();
        assert!(svg.contains(r#"class="gate target" transform="translate(100 120)""#));
        assert!(svg.contains(r#"r="16""#));
        assert!(svg.contains(r#"r="13""#));
    }

    #[test]
    fn test_hidden_nodes_skipped() {
        let mut stage = stage();
        stage.layer_mut(LayerKind::Loading).add(
            Node::text(Point::ORIGIN, "secret", TextStyle::new(20.0, "white")).hidden(),
        );
        let svg = to_svg(&stage).unwrap();
        assert!(!svg.contains("secret"));
    }

    #[test]
    fn test_text_escaped() {
        let mut stage = stage();
        stage.layer_mut(LayerKind::Track).add(Node::text(
            Point::ORIGIN,
            "a<b & c",
            TextStyle::new(16.0, "#1c1c1c"),
        ));
        let svg = to_svg(&stage).unwrap();
        assert!(svg.contains("a&lt;b &amp; c"));
    }

    #[test]
    fn test_pan_offset_in_transform() {
        let mut stage = stage();
        stage.update_scrollbars(Size::new(1600.0, 500.0));
        stage.drag_thumb(Axis::Horizontal, 10_000.0);
        let svg = to_svg(&stage).unwrap();
        assert!(svg.contains(r#"class="layer-gate" transform="translate(-800 0)""#));
        assert!(svg.contains(r#"class="layer-loading" transform="translate(0 0)""#));
    }
}

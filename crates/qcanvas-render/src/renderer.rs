//! Circuit renderer.
//!
//! Frames are redrawn wholesale: every call clears the gate and connector
//! layers and rebuilds them. Connectors and column labels are a purely
//! geometric derivation from the placed glyphs, never from gate codes.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use qcanvas_scene::{LayerKind, Node, Point, Size, Stage, Stroke, TextStyle};

use crate::config::{RenderConfig, palette};
use crate::frame::Column;

/// Horizontal offset of a column label from its column.
const LABEL_OFFSET_X: f64 = 20.0;

/// Height of a column label above qubit line 0.
const LABEL_OFFSET_Y: f64 = 50.0;

/// Track label position relative to the line start.
const TRACK_LABEL_X: f64 = 15.0;
const TRACK_LABEL_OFFSET_Y: f64 = 10.0;

/// Y positions of the qubit lines, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QubitLineSet {
    ys: Vec<f64>,
}

impl QubitLineSet {
    /// `count` lines starting at `first_y`, `pitch` apart.
    pub fn evenly_spaced(count: usize, first_y: f64, pitch: f64) -> Self {
        Self {
            ys: (0..count).map(|i| first_y + i as f64 * pitch).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    /// Y of line `row`, if the row has a line.
    pub fn get(&self, row: usize) -> Option<f64> {
        self.ys.get(row).copied()
    }

    pub fn first(&self) -> Option<f64> {
        self.ys.first().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.ys
    }
}

/// A vertical segment joining the glyphs of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
}

/// A `Gate n` label above a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLabel {
    pub text: String,
    pub position: Point,
}

/// Places gate glyphs for circuit frames and derives everything else.
#[derive(Debug, Clone)]
pub struct CircuitRenderer {
    config: RenderConfig,
    lines: QubitLineSet,
}

impl CircuitRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            lines: QubitLineSet::default(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn lines(&self) -> &QubitLineSet {
        &self.lines
    }

    /// Replace the qubit lines, clear the stage and redraw.
    ///
    /// Calling this again with the same count still clears and redraws.
    pub fn set_qubit_count(&mut self, stage: &mut Stage, count: usize) {
        self.lines =
            QubitLineSet::evenly_spaced(count, self.config.first_line_y, self.config.line_spacing);
        stage.clear();
        self.render_all(stage);
        debug!(qubits = count, "qubit lines updated");
    }

    /// Draw a circuit, replacing whatever was drawn before.
    ///
    /// An empty circuit leaves the stage untouched. Returns whether anything
    /// was redrawn.
    pub fn draw_circuit(&self, stage: &mut Stage, circuit: &[Column]) -> bool {
        if circuit.is_empty() {
            return false;
        }

        stage.clear();
        for (col, column) in circuit.iter().enumerate() {
            let x = self.config.column_x(col);
            // Rows past the last qubit line are dropped.
            for (row, code) in column.iter().enumerate() {
                let Some(y) = self.lines.get(row) else {
                    break;
                };
                if let Some(kind) = code.glyph() {
                    stage.add_gate(Point::new(x, y), kind);
                }
            }
        }

        self.render_all(stage);
        trace!(columns = circuit.len(), "circuit drawn");
        true
    }

    /// Redraw tracks, connectors and labels, then resize the scrollbars.
    pub fn render_all(&self, stage: &mut Stage) {
        self.draw_tracks(stage);
        self.render_connectors(stage);
        self.render_labels(stage);

        let extent = Size::new(
            stage.virtual_width(),
            stage.virtual_height(self.lines.as_slice()),
        );
        stage.update_scrollbars(extent);
    }

    fn draw_tracks(&self, stage: &mut Stage) {
        let full_width = stage.width().max(stage.virtual_width());
        let start_x = self.config.track_start_x;
        let layer = stage.layer_mut(LayerKind::Track);
        layer.destroy_children();

        for (i, &y) in self.lines.as_slice().iter().enumerate() {
            layer.add(Node::line(
                Point::new(start_x, y),
                Point::new(full_width, y),
                Stroke::new(palette::TRACK, 2.0),
            ));
            layer.add(Node::text(
                Point::new(TRACK_LABEL_X, y - TRACK_LABEL_OFFSET_Y),
                format!("Q{i}"),
                TextStyle::new(16.0, palette::TEXT),
            ));
        }
    }

    fn render_connectors(&self, stage: &mut Stage) {
        let mut groups: FxHashMap<i64, Vec<f64>> = FxHashMap::default();
        for gate in stage.gates() {
            groups
                .entry(gate.position.x.round() as i64)
                .or_default()
                .push(gate.position.y);
        }

        let mut connectors: Vec<Connector> = groups
            .into_iter()
            .filter(|(_, ys)| ys.len() > 1)
            .map(|(x, ys)| Connector {
                x: x as f64,
                top: ys.iter().copied().fold(f64::INFINITY, f64::min),
                bottom: ys.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            })
            .collect();
        connectors.sort_by(|a, b| a.x.total_cmp(&b.x));

        let layer = stage.layer_mut(LayerKind::Connector);
        layer.destroy_children();
        for c in connectors {
            layer.add(Node::line(
                Point::new(c.x, c.top),
                Point::new(c.x, c.bottom),
                Stroke::new(palette::CONNECTOR, 2.0),
            ));
        }
    }

    fn render_labels(&self, stage: &mut Stage) {
        let Some(top_line) = self.lines.first() else {
            return;
        };

        let mut columns: Vec<i64> = stage
            .gates()
            .map(|gate| gate.position.x.round() as i64)
            .collect();
        columns.sort_unstable();
        columns.dedup();

        let layer = stage.layer_mut(LayerKind::Connector);
        for (index, x) in columns.into_iter().enumerate() {
            layer.add(Node::text(
                Point::new(x as f64 - LABEL_OFFSET_X, top_line - LABEL_OFFSET_Y),
                format!("Gate {}", index + 1),
                TextStyle::new(13.0, palette::LABEL).bold(),
            ));
        }
    }
}

/// Connectors currently on the stage, left to right.
pub fn connectors(stage: &Stage) -> Vec<Connector> {
    stage
        .layer(LayerKind::Connector)
        .children()
        .iter()
        .filter_map(|node| match node.shape {
            qcanvas_scene::Shape::Line { from, to, .. } => Some(Connector {
                x: from.x,
                top: from.y,
                bottom: to.y,
            }),
            _ => None,
        })
        .collect()
}

/// Column labels currently on the stage, left to right.
pub fn column_labels(stage: &Stage) -> Vec<ColumnLabel> {
    stage
        .layer(LayerKind::Connector)
        .children()
        .iter()
        .filter_map(|node| {
            node.text_content().map(|text| ColumnLabel {
                text: text.to_string(),
                position: node.position,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::GateCode;
    use qcanvas_scene::{Container, GlyphKind};

    fn setup(qubits: usize) -> (CircuitRenderer, Stage) {
        let config = RenderConfig::default();
        let mut stage = Stage::initialize(
            Some(&Container::new("canvas-container")),
            config.stage_width,
            config.stage_height,
        )
        .unwrap();
        let mut renderer = CircuitRenderer::new(config);
        renderer.set_qubit_count(&mut stage, qubits);
        (renderer, stage)
    }

    fn column(codes: &[i64]) -> Column {
        codes.iter().copied().map(GateCode::from_code).collect()
    }

    #[test]
    fn test_lines_evenly_spaced() {
        let lines = QubitLineSet::evenly_spaced(3, 120.0, 100.0);
        assert_eq!(lines.as_slice(), &[120.0, 220.0, 320.0]);
        assert_eq!(lines.get(3), None);
    }

    #[test]
    fn test_rows_beyond_lines_ignored() {
        let (renderer, mut stage) = setup(2);
        renderer.draw_circuit(&mut stage, &[column(&[3, 1, 1, 0])]);
        assert_eq!(stage.gates().count(), 2);
    }

    #[test]
    fn test_empty_codes_draw_nothing() {
        let (renderer, mut stage) = setup(3);
        renderer.draw_circuit(&mut stage, &[column(&[2, 2, 3])]);
        let gates: Vec<_> = stage.gates().collect();
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].kind, GlyphKind::Target);
        assert!(connectors(&stage).is_empty());
        assert_eq!(column_labels(&stage).len(), 1);
    }

    #[test]
    fn test_connector_spans_extremes() {
        let (renderer, mut stage) = setup(3);
        renderer.draw_circuit(&mut stage, &[column(&[1, 2, 3])]);
        assert_eq!(
            connectors(&stage),
            vec![Connector {
                x: 100.0,
                top: 120.0,
                bottom: 320.0
            }]
        );
    }

    #[test]
    fn test_labels_above_first_line() {
        let (renderer, mut stage) = setup(2);
        renderer.draw_circuit(&mut stage, &[column(&[3, 1]), column(&[1, 3])]);
        let labels = column_labels(&stage);
        assert_eq!(labels[0].position, Point::new(80.0, 70.0));
        assert_eq!(labels[1].position, Point::new(160.0, 70.0));
    }

    #[test]
    fn test_tracks_extend_with_content() {
        let (renderer, mut stage) = setup(1);
        let wide: Vec<Column> = (0..20).map(|_| column(&[3])).collect();
        renderer.draw_circuit(&mut stage, &wide);

        // Last column at 100 + 19 * 80 = 1620, plus the content margin.
        let track = &stage.layer(LayerKind::Track).children()[0];
        assert!(matches!(
            track.shape,
            qcanvas_scene::Shape::Line { to, .. } if to.x == 1770.0
        ));
        assert!(stage.scrollbar(qcanvas_scene::Axis::Horizontal).is_visible());
    }

    #[test]
    fn test_zero_qubits_draws_no_gates() {
        let (renderer, mut stage) = setup(0);
        assert!(renderer.draw_circuit(&mut stage, &[column(&[3, 1])]));
        assert_eq!(stage.gates().count(), 0);
        assert!(stage.layer(LayerKind::Track).is_empty());
    }
}

//! The quantum canvas handle.

use qcanvas_scene::{Axis, Container, Gate, SceneResult, Stage};

use crate::config::{RenderConfig, parse_qubit_count};
use crate::frame::{CircuitFrame, Column};
use crate::overlay::LoadingOverlay;
use crate::renderer::{self, CircuitRenderer, ColumnLabel, Connector};

/// A mounted canvas: one stage, its circuit renderer and its loading overlay.
///
/// All state is owned here and mutated through `&mut self`; there is no
/// shared canvas.
#[derive(Debug, Clone)]
pub struct QuantumCanvas {
    stage: Stage,
    renderer: CircuitRenderer,
    overlay: LoadingOverlay,
}

impl QuantumCanvas {
    /// Mount a canvas into `container`.
    ///
    /// Returns `None` when the container is missing. The canvas starts with
    /// no qubit lines; call [`QuantumCanvas::set_qubit_count`] or
    /// [`QuantumCanvas::update_qubits`] to draw them.
    pub fn mount(container: Option<&Container>, config: RenderConfig) -> Option<Self> {
        let mut stage = Stage::initialize(container, config.stage_width, config.stage_height)?;
        let overlay = LoadingOverlay::install(&mut stage);
        Some(Self {
            stage,
            renderer: CircuitRenderer::new(config),
            overlay,
        })
    }

    /// Read the qubit count from a raw input value and redraw.
    pub fn update_qubits(&mut self, input: Option<&str>) {
        self.set_qubit_count(parse_qubit_count(input));
    }

    pub fn set_qubit_count(&mut self, count: usize) {
        self.renderer.set_qubit_count(&mut self.stage, count);
    }

    pub fn qubit_count(&self) -> usize {
        self.renderer.lines().len()
    }

    /// Y positions of the qubit lines.
    pub fn qubit_lines(&self) -> &[f64] {
        self.renderer.lines().as_slice()
    }

    /// Draw a frame's circuit. A frame without columns changes nothing.
    pub fn draw_frame(&mut self, frame: &CircuitFrame) -> bool {
        self.draw_circuit(frame.columns())
    }

    pub fn draw_circuit(&mut self, circuit: &[Column]) -> bool {
        self.renderer.draw_circuit(&mut self.stage, circuit)
    }

    /// Remove gates and connectors and scroll home.
    pub fn clear(&mut self) {
        self.stage.clear();
    }

    pub fn show_overlay(&mut self, message: &str) {
        self.overlay.show(&mut self.stage, message);
    }

    pub fn hide_overlay(&mut self) {
        self.overlay.hide(&mut self.stage);
    }

    pub fn set_progress(&mut self, current: u64, total: u64) {
        self.overlay.set_progress(&mut self.stage, current, total);
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_visible(&self.stage)
    }

    pub fn overlay_message(&self) -> Option<&str> {
        self.overlay.message(&self.stage)
    }

    /// Current width of the progress fill.
    pub fn progress_width(&self) -> f64 {
        self.overlay.fill_width(&self.stage)
    }

    /// Full width of the progress bar.
    pub fn progress_bar_width(&self) -> f64 {
        self.overlay.bar_width(&self.stage)
    }

    /// Drag a scrollbar thumb; see [`Stage::drag_thumb`].
    pub fn drag_scrollbar(&mut self, axis: Axis, position: f64) -> f64 {
        self.stage.drag_thumb(axis, position)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn gates(&self) -> Vec<Gate> {
        self.stage.gates().collect()
    }

    pub fn connectors(&self) -> Vec<Connector> {
        renderer::connectors(&self.stage)
    }

    pub fn column_labels(&self) -> Vec<ColumnLabel> {
        renderer::column_labels(&self.stage)
    }

    /// `Q{i}` labels of the qubit lines, top to bottom.
    pub fn track_labels(&self) -> Vec<String> {
        self.stage
            .layer(qcanvas_scene::LayerKind::Track)
            .children()
            .iter()
            .filter_map(|node| node.text_content().map(str::to_string))
            .collect()
    }

    /// Paint the stage as SVG.
    pub fn to_svg(&self) -> SceneResult<String> {
        qcanvas_scene::to_svg(&self.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> QuantumCanvas {
        QuantumCanvas::mount(
            Some(&Container::new("canvas-container")),
            RenderConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_container() {
        assert!(QuantumCanvas::mount(None, RenderConfig::default()).is_none());
    }

    #[test]
    fn test_update_qubits_defaults() {
        let mut canvas = canvas();
        canvas.update_qubits(Some("abc"));
        assert_eq!(canvas.qubit_count(), 3);
        canvas.update_qubits(Some("5"));
        assert_eq!(canvas.qubit_count(), 5);
    }

    #[test]
    fn test_qubit_change_clears_gates() {
        let mut canvas = canvas();
        canvas.set_qubit_count(2);
        canvas.draw_frame(&CircuitFrame::from_codes(1, 1, [[3, 1]]));
        assert_eq!(canvas.gates().len(), 2);

        canvas.set_qubit_count(4);
        assert!(canvas.gates().is_empty());
        assert!(canvas.connectors().is_empty());
        assert_eq!(canvas.track_labels().len(), 4);
    }

    #[test]
    fn test_svg_contains_gates() {
        let mut canvas = canvas();
        canvas.set_qubit_count(2);
        canvas.draw_frame(&CircuitFrame::from_codes(1, 1, [[3, 1]]));
        let svg = canvas.to_svg().unwrap();
        assert!(svg.contains("gate target"));
        assert!(svg.contains("gate control-1"));
        assert!(svg.contains("Gate 1"));
    }
}

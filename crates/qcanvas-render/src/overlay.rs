//! Loading overlay with a progress bar.
//!
//! The overlay is four nodes on the loading layer (backdrop, status text, bar
//! background, bar fill) that are always shown and hidden together.

use qcanvas_scene::{LayerKind, Node, NodeId, Point, Shape, Stage, Stroke, TextStyle};

use crate::config::palette;

const BAR_WIDTH: f64 = 300.0;
const BAR_HEIGHT: f64 = 20.0;
const TEXT_WIDTH: f64 = 300.0;

/// Status text shown before the first message arrives.
pub const INITIAL_MESSAGE: &str = "Preparing to iterate...";

/// Handles to the overlay nodes on a stage's loading layer.
#[derive(Debug, Clone)]
pub struct LoadingOverlay {
    backdrop: NodeId,
    status: NodeId,
    bar_background: NodeId,
    bar_fill: NodeId,
}

impl LoadingOverlay {
    /// Add the (hidden) overlay nodes to the stage's loading layer.
    pub fn install(stage: &mut Stage) -> Self {
        let (width, height) = (stage.width(), stage.height());
        let bar_x = width / 2.0 - BAR_WIDTH / 2.0;
        let bar_y = height / 2.0 + 30.0;

        let layer = stage.layer_mut(LayerKind::Loading);
        let backdrop = layer.add(
            Node::new(
                Point::ORIGIN,
                Shape::Rect {
                    width,
                    height,
                    fill: palette::BACKDROP,
                    stroke: None,
                    corner_radius: 0.0,
                    opacity: 0.4,
                },
            )
            .hidden(),
        );
        let status = layer.add(
            Node::text(
                Point::new(width / 2.0 - TEXT_WIDTH / 2.0, height / 2.0 - 40.0),
                INITIAL_MESSAGE,
                TextStyle::new(20.0, "white").bold().centered_in(TEXT_WIDTH),
            )
            .hidden(),
        );
        let bar_background = layer.add(
            Node::new(
                Point::new(bar_x, bar_y),
                Shape::Rect {
                    width: BAR_WIDTH,
                    height: BAR_HEIGHT,
                    fill: palette::BAR_BACKGROUND,
                    stroke: Some(Stroke::new(palette::BAR_BORDER, 2.0)),
                    corner_radius: 5.0,
                    opacity: 1.0,
                },
            )
            .hidden(),
        );
        let bar_fill = layer.add(
            Node::new(
                Point::new(bar_x, bar_y),
                Shape::Rect {
                    width: 0.0,
                    height: BAR_HEIGHT,
                    fill: palette::BAR_FILL,
                    stroke: None,
                    corner_radius: 5.0,
                    opacity: 1.0,
                },
            )
            .hidden(),
        );

        Self {
            backdrop,
            status,
            bar_background,
            bar_fill,
        }
    }

    /// Show the overlay. A non-empty `message` replaces the status text.
    pub fn show(&self, stage: &mut Stage, message: &str) {
        self.set_visible(stage, true);
        if message.is_empty() {
            return;
        }
        if let Some(status) = stage.layer_mut(LayerKind::Loading).get_mut(self.status) {
            status.set_text(message);
        }
    }

    /// Hide the overlay and empty the progress bar.
    pub fn hide(&self, stage: &mut Stage) {
        self.set_visible(stage, false);
        if let Some(fill) = stage.layer_mut(LayerKind::Loading).get_mut(self.bar_fill) {
            fill.set_rect_width(0.0);
        }
    }

    /// Fill the bar to `current / total` of its width.
    ///
    /// Not clamped: `current > total` overdraws the bar. `total` must be
    /// positive.
    pub fn set_progress(&self, stage: &mut Stage, current: u64, total: u64) {
        let full = self.bar_width(stage);
        let width = full * (current as f64 / total as f64);
        if let Some(fill) = stage.layer_mut(LayerKind::Loading).get_mut(self.bar_fill) {
            fill.set_rect_width(width);
        }
    }

    pub fn is_visible(&self, stage: &Stage) -> bool {
        stage
            .layer(LayerKind::Loading)
            .get(self.backdrop)
            .is_some_and(|node| node.visible)
    }

    /// Width of the bar background.
    pub fn bar_width(&self, stage: &Stage) -> f64 {
        stage
            .layer(LayerKind::Loading)
            .get(self.bar_background)
            .and_then(Node::rect_width)
            .unwrap_or(0.0)
    }

    /// Current width of the bar fill.
    pub fn fill_width(&self, stage: &Stage) -> f64 {
        stage
            .layer(LayerKind::Loading)
            .get(self.bar_fill)
            .and_then(Node::rect_width)
            .unwrap_or(0.0)
    }

    pub fn message<'a>(&self, stage: &'a Stage) -> Option<&'a str> {
        stage
            .layer(LayerKind::Loading)
            .get(self.status)
            .and_then(Node::text_content)
    }

    fn set_visible(&self, stage: &mut Stage, visible: bool) {
        let layer = stage.layer_mut(LayerKind::Loading);
        for id in [self.backdrop, self.status, self.bar_background, self.bar_fill] {
            if let Some(node) = layer.get_mut(id) {
                node.visible = visible;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcanvas_scene::Container;

    fn setup() -> (LoadingOverlay, Stage) {
        let mut stage =
            Stage::initialize(Some(&Container::new("canvas-container")), 1200.0, 500.0).unwrap();
        let overlay = LoadingOverlay::install(&mut stage);
        (overlay, stage)
    }

    #[test]
    fn test_installed_hidden() {
        let (overlay, stage) = setup();
        assert!(!overlay.is_visible(&stage));
        assert_eq!(overlay.message(&stage), Some(INITIAL_MESSAGE));
        assert_eq!(overlay.bar_width(&stage), 300.0);
        assert!(stage.layer(LayerKind::Loading).children().iter().all(|n| !n.visible));
    }

    #[test]
    fn test_show_and_hide_as_unit() {
        let (overlay, mut stage) = setup();
        overlay.show(&mut stage, "Connecting...");
        assert!(stage.layer(LayerKind::Loading).children().iter().all(|n| n.visible));
        assert_eq!(overlay.message(&stage), Some("Connecting..."));

        overlay.hide(&mut stage);
        assert!(stage.layer(LayerKind::Loading).children().iter().all(|n| !n.visible));
    }

    #[test]
    fn test_empty_message_keeps_text() {
        let (overlay, mut stage) = setup();
        overlay.show(&mut stage, "Iterating epoch 1 / 2");
        overlay.show(&mut stage, "");
        assert_eq!(overlay.message(&stage), Some("Iterating epoch 1 / 2"));
    }

    #[test]
    fn test_progress_fraction() {
        let (overlay, mut stage) = setup();
        overlay.set_progress(&mut stage, 25, 50);
        assert_eq!(overlay.fill_width(&stage), 150.0);
        overlay.set_progress(&mut stage, 0, 50);
        assert_eq!(overlay.fill_width(&stage), 0.0);
    }

    #[test]
    fn test_progress_not_clamped() {
        let (overlay, mut stage) = setup();
        overlay.set_progress(&mut stage, 75, 50);
        assert_eq!(overlay.fill_width(&stage), 450.0);
    }

    #[test]
    fn test_hide_resets_progress() {
        let (overlay, mut stage) = setup();
        overlay.show(&mut stage, "");
        overlay.set_progress(&mut stage, 40, 50);
        overlay.hide(&mut stage);
        assert_eq!(overlay.fill_width(&stage), 0.0);
    }

    #[test]
    fn test_clear_keeps_overlay() {
        let (overlay, mut stage) = setup();
        overlay.show(&mut stage, "busy");
        stage.clear();
        assert!(overlay.is_visible(&stage));
    }
}

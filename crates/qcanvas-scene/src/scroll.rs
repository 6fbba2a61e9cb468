//! Scrollbars and scroll state.
//!
//! A scrollbar is a track rectangle with a draggable thumb. The thumb length
//! is proportional to `viewport / virtual`, and the thumb's position along
//! its travel maps linearly onto the scroll position in
//! `[0, virtual - viewport]`.

use crate::geometry::{Axis, Point, Rect};

/// Thumbs never shrink below this length.
pub const MIN_THUMB_LENGTH: f64 = 30.0;

/// Content must exceed the viewport by more than this before a scrollbar
/// shows, so near-fit sizes don't flicker the thumb.
pub const VISIBILITY_SLACK: f64 = 10.0;

/// Thumb length before the first resize.
const INITIAL_THUMB_LENGTH: f64 = 100.0;

/// One scrollbar: a track and a thumb sliding along it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scrollbar {
    axis: Axis,
    track: Rect,
    thumb_start: f64,
    thumb_length: f64,
    visible: bool,
}

impl Scrollbar {
    /// Create a hidden scrollbar with its thumb at the start of the track.
    pub fn new(axis: Axis, track: Rect) -> Self {
        Self {
            axis,
            track,
            thumb_start: track.start(axis),
            thumb_length: INITIAL_THUMB_LENGTH,
            visible: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn track(&self) -> Rect {
        self.track
    }

    /// Absolute coordinate of the thumb's leading edge along the axis.
    pub fn thumb_start(&self) -> f64 {
        self.thumb_start
    }

    pub fn thumb_length(&self) -> f64 {
        self.thumb_length
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The thumb rectangle in stage coordinates.
    pub fn thumb(&self) -> Rect {
        match self.axis {
            Axis::Horizontal => Rect::new(
                self.thumb_start,
                self.track.y,
                self.thumb_length,
                self.track.height,
            ),
            Axis::Vertical => Rect::new(
                self.track.x,
                self.thumb_start,
                self.track.width,
                self.thumb_length,
            ),
        }
    }

    /// Distance the thumb can move.
    pub fn travel(&self) -> f64 {
        (self.track.length(self.axis) - self.thumb_length).max(0.0)
    }

    /// Move the thumb back to the start of its track.
    pub fn reset(&mut self) {
        self.thumb_start = self.track.start(self.axis);
    }

    /// Recompute thumb length and visibility for new extents.
    pub fn resize(&mut self, viewport: f64, virtual_extent: f64) {
        let virtual_extent = if virtual_extent > 0.0 {
            virtual_extent
        } else {
            viewport
        };
        let track_length = self.track.length(self.axis);
        self.thumb_length = (track_length * (viewport / virtual_extent)).max(MIN_THUMB_LENGTH);
        self.visible = virtual_extent > viewport + VISIBILITY_SLACK;
        self.thumb_start = self.clamp(self.thumb_start);
    }

    /// Drag the thumb to `position`, clamped to the track.
    ///
    /// Returns the new fraction of travel covered, in `[0, 1]`.
    pub fn drag_to(&mut self, position: f64) -> f64 {
        self.thumb_start = self.clamp(position);
        self.ratio()
    }

    /// Fraction of travel covered by the thumb.
    pub fn ratio(&self) -> f64 {
        let travel = self.travel();
        if travel == 0.0 {
            0.0
        } else {
            (self.thumb_start - self.track.start(self.axis)) / travel
        }
    }

    /// Place the thumb at a fraction of its travel.
    pub fn set_ratio(&mut self, ratio: f64) {
        let position = self.track.start(self.axis) + ratio.clamp(0.0, 1.0) * self.travel();
        self.thumb_start = self.clamp(position);
    }

    fn clamp(&self, position: f64) -> f64 {
        let min = self.track.start(self.axis);
        position.clamp(min, min + self.travel())
    }
}

/// Horizontal and vertical scroll positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub horizontal: f64,
    pub vertical: f64,
}

impl ScrollState {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Set one position, clamped to `[0, max]`. Returns the stored value.
    pub fn set(&mut self, axis: Axis, position: f64, max: f64) -> f64 {
        let clamped = position.clamp(0.0, max.max(0.0));
        match axis {
            Axis::Horizontal => self.horizontal = clamped,
            Axis::Vertical => self.vertical = clamped,
        }
        clamped
    }

    /// Layer offset that realizes this scroll position.
    pub fn pan_offset(&self) -> Point {
        // Subtract from zero so an unscrolled axis stays +0.
        Point::new(0.0 - self.horizontal, 0.0 - self.vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> Scrollbar {
        Scrollbar::new(Axis::Horizontal, Rect::new(50.0, 485.0, 700.0, 10.0))
    }

    #[test]
    fn test_new_scrollbar_hidden_at_start() {
        let bar = horizontal();
        assert!(!bar.is_visible());
        assert_eq!(bar.thumb_start(), 50.0);
        assert_eq!(bar.thumb_length(), 100.0);
    }

    #[test]
    fn test_resize_proportional_thumb() {
        let mut bar = horizontal();
        bar.resize(800.0, 1600.0);
        assert!(bar.is_visible());
        assert_eq!(bar.thumb_length(), 350.0);
    }

    #[test]
    fn test_resize_min_thumb_length() {
        let mut bar = horizontal();
        bar.resize(800.0, 800_000.0);
        assert_eq!(bar.thumb_length(), MIN_THUMB_LENGTH);
    }

    #[test]
    fn test_visibility_slack() {
        let mut bar = horizontal();
        bar.resize(800.0, 810.0);
        assert!(!bar.is_visible());
        bar.resize(800.0, 810.5);
        assert!(bar.is_visible());
    }

    #[test]
    fn test_drag_is_clamped() {
        let mut bar = horizontal();
        bar.resize(800.0, 1600.0);

        assert_eq!(bar.drag_to(-100.0), 0.0);
        assert_eq!(bar.thumb_start(), 50.0);

        assert_eq!(bar.drag_to(10_000.0), 1.0);
        assert_eq!(bar.thumb_start(), 50.0 + 700.0 - 350.0);

        let ratio = bar.drag_to(50.0 + 175.0);
        assert!((ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reset_returns_to_track_start() {
        let mut bar = horizontal();
        bar.resize(800.0, 1600.0);
        bar.drag_to(300.0);
        bar.reset();
        assert_eq!(bar.thumb_start(), 50.0);
        assert_eq!(bar.ratio(), 0.0);
    }

    #[test]
    fn test_vertical_thumb_rect() {
        let mut bar = Scrollbar::new(Axis::Vertical, Rect::new(785.0, 50.0, 10.0, 400.0));
        bar.resize(500.0, 1000.0);
        let thumb = bar.thumb();
        assert_eq!(thumb.x, 785.0);
        assert_eq!(thumb.y, 50.0);
        assert_eq!(thumb.height, 200.0);
    }

    #[test]
    fn test_scroll_state_clamps() {
        let mut state = ScrollState::default();
        assert_eq!(state.set(Axis::Horizontal, 500.0, 300.0), 300.0);
        assert_eq!(state.set(Axis::Vertical, -5.0, 300.0), 0.0);
        assert_eq!(state.set(Axis::Vertical, 50.0, -20.0), 0.0);
        assert_eq!(state.pan_offset(), Point::new(-300.0, 0.0));
    }
}

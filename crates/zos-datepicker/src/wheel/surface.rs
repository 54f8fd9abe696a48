//! Rendered wheels as seen by the snap controller
//!
//! The controller never touches a DOM. It reads geometry and writes scroll
//! offsets through [`WheelSurface`], and finds wheels through [`WheelHost`].
//! [`VirtualWheel`] is an in-memory surface with fixed row geometry, used
//! by headless hosts and tests.

use std::collections::HashMap;

use super::key::WheelKey;
use crate::scroll::ScrollMetrics;

/// Geometry of one rendered row
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowMetrics {
    /// Rendered height
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl RowMetrics {
    pub fn new(height: f32, margin_top: f32, margin_bottom: f32) -> Self {
        Self {
            height,
            margin_top,
            margin_bottom,
        }
    }

    /// Distance between the tops of consecutive rows
    pub fn extent(&self) -> f32 {
        self.height + self.margin_bottom
    }

    /// Correction that centres a row between its margins
    pub fn centering(&self) -> f32 {
        self.margin_top / 2.0 + self.margin_bottom / 2.0
    }
}

/// A scrollable list of rows
pub trait WheelSurface {
    fn scroll_top(&self) -> f32;

    fn set_scroll_top(&mut self, value: f32);

    fn row_count(&self) -> usize;

    /// Geometry of the first row; `None` when nothing is rendered
    fn row_metrics(&self) -> Option<RowMetrics>;

    /// Top offset of row `index` within the scroll content
    fn row_offset_top(&self, index: usize) -> Option<f32>;

    /// Displayed text of row `index`
    fn row_label(&self, index: usize) -> Option<String>;
}

/// Finds rendered wheels
pub trait WheelHost {
    /// `None` when the wheel is not currently rendered
    fn wheel(&mut self, key: WheelKey) -> Option<&mut dyn WheelSurface>;
}

/// In-memory wheel with uniform rows.
///
/// Rows are laid out after one row-extent of padding, so that the row at
/// scroll offset `i * extent` sits one row below the viewport top.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualWheel {
    labels: Vec<String>,
    metrics: RowMetrics,
    visible_rows: usize,
    scroll_top: f32,
}

impl VirtualWheel {
    pub fn new(labels: Vec<String>, metrics: RowMetrics, visible_rows: usize) -> Self {
        Self {
            labels,
            metrics,
            visible_rows,
            scroll_top: 0.0,
        }
    }

    /// Wheel rendering the rows of `key`
    pub fn for_key(
        key: WheelKey,
        minute_increment: u32,
        metrics: RowMetrics,
        visible_rows: usize,
    ) -> Self {
        let labels = key
            .rows(minute_increment)
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        Self::new(labels, metrics, visible_rows)
    }

    fn padding(&self) -> f32 {
        self.metrics.extent() + (self.metrics.margin_bottom - self.metrics.margin_top) / 2.0
    }

    /// Visible height
    pub fn viewport_height(&self) -> f32 {
        self.visible_rows as f32 * self.metrics.extent()
    }

    /// Full scrollable height
    pub fn content_height(&self) -> f32 {
        2.0 * self.padding()
            + self.metrics.margin_top
            + self.labels.len() as f32 * self.metrics.extent()
    }

    /// Largest reachable scroll offset
    pub fn max_scroll_top(&self) -> f32 {
        (self.content_height() - self.viewport_height()).max(0.0)
    }
}

impl WheelSurface for VirtualWheel {
    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, value: f32) {
        self.scroll_top = value.clamp(0.0, self.max_scroll_top());
    }

    fn row_count(&self) -> usize {
        self.labels.len()
    }

    fn row_metrics(&self) -> Option<RowMetrics> {
        (!self.labels.is_empty()).then_some(self.metrics)
    }

    fn row_offset_top(&self, index: usize) -> Option<f32> {
        (index < self.labels.len()).then(|| {
            self.padding() + self.metrics.margin_top + index as f32 * self.metrics.extent()
        })
    }

    fn row_label(&self, index: usize) -> Option<String> {
        self.labels.get(index).cloned()
    }
}

impl ScrollMetrics for VirtualWheel {
    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn scroll_height(&self) -> f32 {
        self.content_height()
    }

    fn offset_height(&self) -> f32 {
        self.viewport_height()
    }
}

/// Headless [`WheelHost`] backed by a map of virtual wheels
#[derive(Clone, Debug, Default)]
pub struct WheelSet {
    wheels: HashMap<WheelKey, VirtualWheel>,
}

impl WheelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render (or replace) a wheel
    pub fn set(&mut self, key: WheelKey, wheel: VirtualWheel) {
        self.wheels.insert(key, wheel);
    }

    /// Tear a wheel down
    pub fn remove(&mut self, key: WheelKey) -> Option<VirtualWheel> {
        self.wheels.remove(&key)
    }

    pub fn get(&self, key: WheelKey) -> Option<&VirtualWheel> {
        self.wheels.get(&key)
    }

    pub fn get_mut(&mut self, key: WheelKey) -> Option<&mut VirtualWheel> {
        self.wheels.get_mut(&key)
    }
}

impl WheelHost for WheelSet {
    fn wheel(&mut self, key: WheelKey) -> Option<&mut dyn WheelSurface> {
        self.wheels
            .get_mut(&key)
            .map(|wheel| wheel as &mut dyn WheelSurface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> RowMetrics {
        RowMetrics::new(30.0, 4.0, 4.0)
    }

    #[test]
    fn test_row_metrics() {
        let m = metrics();
        assert_eq!(m.extent(), 34.0);
        assert_eq!(m.centering(), 4.0);
    }

    #[test]
    fn test_layout() {
        let wheel = VirtualWheel::for_key(WheelKey::Hours, 1, metrics(), 3);
        assert_eq!(wheel.row_count(), 12);
        assert_eq!(wheel.row_offset_top(0), Some(38.0));
        assert_eq!(wheel.row_offset_top(2), Some(106.0));
        assert_eq!(wheel.row_offset_top(12), None);
        assert_eq!(wheel.row_label(0).as_deref(), Some("12"));
        assert_eq!(wheel.viewport_height(), 102.0);
        assert_eq!(wheel.content_height(), 480.0);
        assert_eq!(wheel.max_scroll_top(), 378.0);
    }

    #[test]
    fn test_scroll_top_is_clamped() {
        let mut wheel = VirtualWheel::for_key(WheelKey::Minutes, 15, metrics(), 3);
        wheel.set_scroll_top(-20.0);
        assert_eq!(WheelSurface::scroll_top(&wheel), 0.0);
        wheel.set_scroll_top(10_000.0);
        assert_eq!(WheelSurface::scroll_top(&wheel), wheel.max_scroll_top());
    }

    #[test]
    fn test_empty_wheel_has_no_metrics() {
        let wheel = VirtualWheel::new(Vec::new(), metrics(), 3);
        assert_eq!(wheel.row_metrics(), None);
        assert_eq!(wheel.row_count(), 0);
    }

    #[test]
    fn test_wheel_set_lookup() {
        let mut set = WheelSet::new();
        assert!(set.wheel(WheelKey::Year).is_none());

        set.set(WheelKey::Year, VirtualWheel::for_key(WheelKey::Year, 1, metrics(), 7));
        let surface = set.wheel(WheelKey::Year).unwrap();
        surface.set_scroll_top(340.0);
        assert_eq!(surface.scroll_top(), 340.0);

        assert!(set.remove(WheelKey::Year).is_some());
        assert!(set.get(WheelKey::Year).is_none());
    }
}

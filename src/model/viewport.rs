use serde::{Deserialize, Serialize};

/// Pan offset and zoom factor of the canvas, persisted with the graph so a
/// restored workflow reopens exactly where it was left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// The visible center in canvas coordinates, used for deterministic node
    /// placement when the caller supplies no position.
    pub fn center(&self, width: f64, height: f64) -> (f64, f64) {
        (
            (width / 2.0 - self.x) / self.zoom,
            (height / 2.0 - self.y) / self.zoom,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

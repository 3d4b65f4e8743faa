/// The drawing surface the simulation renders onto.
///
/// Only one primitive is needed: fill an axis-aligned rectangle with a
/// colour.  Alpha below 1.0 blends over whatever was there before.

use crate::entities::{Rect, Rgba};

pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
}

/// A canvas that only remembers the calls made to it, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<(Rect, Rgba)>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made with an exact colour match (alpha ignored).
    pub fn filled_with(&self, color: Rgba) -> impl Iterator<Item = &(Rect, Rgba)> {
        self.ops
            .iter()
            .filter(move |(_, c)| c.r == color.r && c.g == color.g && c.b == color.b)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ops.push((rect, color));
    }
}

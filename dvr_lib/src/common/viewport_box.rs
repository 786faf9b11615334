use std::{cmp::min, ops::Range};

use nalgebra::{point, Point2};

/// A 2D range in normalized screen coordinates `<0;1>`, described by two points
#[derive(Debug, Clone, Copy)]
pub struct ViewportBox {
    pub lower: Point2<f32>,
    pub upper: Point2<f32>,
}

impl ViewportBox {
    /// Inverted box, contains nothing until a point is added
    pub fn new() -> Self {
        Self {
            lower: point![f32::INFINITY, f32::INFINITY],
            upper: point![f32::NEG_INFINITY, f32::NEG_INFINITY],
        }
    }

    /// Whole screen
    pub fn full() -> Self {
        Self {
            lower: point![0.0, 0.0],
            upper: point![1.0, 1.0],
        }
    }

    pub fn add_point(&mut self, x: f32, y: f32) {
        self.upper.x = f32::max(self.upper.x, x);
        self.upper.y = f32::max(self.upper.y, y);
        self.lower.x = f32::min(self.lower.x, x);
        self.lower.y = f32::min(self.lower.y, y);
    }

    /// Pixels covered by the box, clipped to the screen.
    /// Ranges are empty when the box lies off screen.
    pub fn get_pixel_range(&self, resolution: (usize, usize)) -> (Range<usize>, Range<usize>) {
        let (width, height) = resolution;

        let clip = |low: f32, high: f32, size: usize| {
            let size_f = size as f32;
            let start = f32::floor(low.clamp(0.0, 1.0) * size_f) as usize;
            let end = f32::ceil(high.clamp(0.0, 1.0) * size_f) as usize;
            let end = min(end, size);
            start..end.max(start)
        };

        (
            clip(self.lower.x, self.upper.x, width),
            clip(self.lower.y, self.upper.y, height),
        )
    }
}

impl Default for ViewportBox {
    fn default() -> Self {
        Self::new()
    }
}

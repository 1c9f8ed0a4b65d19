// File: crates/axis-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use crate::types::Insets;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle; `min` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelRect {
    pub min: PixelPoint,
    pub max: PixelPoint,
}

impl PixelRect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { min: PixelPoint::new(left, top), max: PixelPoint::new(right, bottom) }
    }
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::from_ltrb(left, top, left + width, top + height)
    }
    pub fn width(&self) -> f32 { self.max.x - self.min.x }
    pub fn height(&self) -> f32 { self.max.y - self.min.y }

    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Shrink by `insets`; never produces a rectangle with negative extent.
    pub fn inset(&self, insets: &Insets) -> Self {
        let left = self.min.x + insets.left;
        let top = self.min.y + insets.top;
        let right = (self.max.x - insets.right).max(left);
        let bottom = (self.max.y - insets.bottom).max(top);
        Self::from_ltrb(left, top, right, bottom)
    }
}


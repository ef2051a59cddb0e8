//! Drawing surface abstraction
//!
//! The scene is drawn through this small 2D API (rectangles, arcs, linear
//! gradients and a save/restore transform stack). Coordinates are surface
//! pixels with the origin at the top-left and y pointing down.

use glam::Vec2;

/// RGBA, each channel in 0..=1 (sRGB)
pub type Color = [f32; 4];

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.min,
            Vec2::new(max.x, self.min.y),
            max,
            Vec2::new(self.min.x, max.y),
        ]
    }
}

/// Two-stop linear gradient between `start` and `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub from: Color,
    pub to: Color,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, from: Color, to: Color) -> Self {
        Self {
            start,
            end,
            from,
            to,
        }
    }

    /// Colour at a point, clamped to the end stops outside the axis
    pub fn color_at(&self, point: Vec2) -> Color {
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        let t = if len_sq > 0.0 {
            ((point - self.start).dot(axis) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        lerp_color(self.from, self.to, t)
    }
}

/// Fill style
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl Paint {
    pub fn color_at(&self, point: Vec2) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear(gradient) => gradient.color_at(point),
        }
    }
}

pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// A 2D drawing target
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Vec2;
    /// Erase everything drawn so far
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    /// Filled pie slice from `start` to `end` (radians, clockwise on screen)
    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Color);
    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
        line_width: f32,
    );
    /// Push the current transform
    fn save(&mut self);
    /// Pop back to the last saved transform
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_along_x() {
        let gradient = LinearGradient::new(
            Vec2::new(100.0, 0.0),
            Vec2::new(200.0, 0.0),
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 0.5, 0.0, 1.0],
        );
        assert_eq!(gradient.color_at(Vec2::new(150.0, 40.0)), [0.5, 0.25, 0.0, 1.0]);
        assert_eq!(gradient.color_at(Vec2::new(0.0, 0.0)), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(gradient.color_at(Vec2::new(500.0, 0.0)), [1.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_degenerate_gradient_uses_first_stop() {
        let gradient = LinearGradient::new(Vec2::ZERO, Vec2::ZERO, [1.0; 4], [0.0; 4]);
        assert_eq!(gradient.color_at(Vec2::new(3.0, 3.0)), [1.0; 4]);
    }

    #[test]
    fn test_rect_corners() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.corners()[2], Vec2::new(4.0, 6.0));
        assert_eq!(rect.corners()[3], Vec2::new(1.0, 6.0));
    }
}

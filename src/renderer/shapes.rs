//! Shape generation for 2D primitives
//!
//! [`Tessellator`] implements [`Surface`] by turning every primitive into
//! triangles, ready for the GPU pipeline. Gradients become per-vertex colours.

use glam::{Affine2, Vec2};
use std::f32::consts::TAU;

use super::surface::{Color, Paint, Rect, Surface};
use super::vertex::Vertex;

/// Number of fan segments for an arc spanning `span` radians
fn arc_segments(span: f32, segments_per_circle: u32) -> u32 {
    let fraction = (span.abs() / TAU).min(1.0);
    ((segments_per_circle as f32 * fraction).ceil() as u32).max(1)
}

fn point_on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    Vec2::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

/// Generate vertices for a filled pie slice
pub fn arc_fan(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: Color,
    segments_per_circle: u32,
) -> Vec<Vertex> {
    let span = end - start;
    let segments = arc_segments(span, segments_per_circle);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        let p1 = point_on_circle(center, radius, theta1);
        let p2 = point_on_circle(center, radius, theta2);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a thick arc band (a ring when the span is a full turn)
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    end: f32,
    color: Color,
    segments_per_circle: u32,
) -> Vec<Vertex> {
    let span = end - start;
    let segments = arc_segments(span, segments_per_circle);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        let inner1 = point_on_circle(center, inner_radius, theta1);
        let outer1 = point_on_circle(center, outer_radius, theta1);
        let inner2 = point_on_circle(center, inner_radius, theta2);
        let outer2 = point_on_circle(center, outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a filled rectangle
pub fn rect(rect: Rect, paint: &Paint) -> Vec<Vertex> {
    let corners = rect.corners();
    let vertex = |p: Vec2| Vertex::new(p.x, p.y, paint.color_at(p));
    vec![
        vertex(corners[0]),
        vertex(corners[1]),
        vertex(corners[2]),
        vertex(corners[0]),
        vertex(corners[2]),
        vertex(corners[3]),
    ]
}

/// Surface that records triangles
pub struct Tessellator {
    size: Vec2,
    clear_color: Color,
    segments_per_circle: u32,
    transform: Affine2,
    stack: Vec<Affine2>,
    vertices: Vec<Vertex>,
}

impl Tessellator {
    pub fn new(width: f32, height: f32, segments_per_circle: u32) -> Self {
        Self {
            size: Vec2::new(width, height),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            segments_per_circle: segments_per_circle.max(3),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            vertices: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Triangles recorded since the last clear, in surface pixels
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Colour of the last clear
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Append vertices given in the current local space
    fn push(&mut self, vertices: Vec<Vertex>) {
        let transform = self.transform;
        self.vertices.extend(vertices.into_iter().map(|v| {
            let p = transform.transform_point2(Vec2::from(v.position));
            Vertex::new(p.x, p.y, v.color)
        }));
    }
}

impl Surface for Tessellator {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
    }

    fn fill_rect(&mut self, area: Rect, paint: &Paint) {
        if area.size.x == 0.0 || area.size.y == 0.0 {
            return;
        }
        self.push(rect(area, paint));
    }

    fn stroke_rect(&mut self, area: Rect, color: Color, line_width: f32) {
        let half = line_width / 2.0;
        let min = area.min;
        let max = area.max();
        let paint = Paint::Solid(color);
        // Top, bottom, left, right bands centred on the outline
        let edges = [
            Rect::new(min.x - half, min.y - half, area.size.x + line_width, line_width),
            Rect::new(min.x - half, max.y - half, area.size.x + line_width, line_width),
            Rect::new(min.x - half, min.y + half, line_width, area.size.y - line_width),
            Rect::new(max.x - half, min.y + half, line_width, area.size.y - line_width),
        ];
        for edge in edges {
            if edge.size.x > 0.0 && edge.size.y > 0.0 {
                self.push(rect(edge, &paint));
            }
        }
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let vertices = arc_fan(center, radius, start, end, color, self.segments_per_circle);
        self.push(vertices);
    }

    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
        line_width: f32,
    ) {
        let half = line_width / 2.0;
        let vertices = arc_band(
            center,
            (radius - half).max(0.0),
            radius + half,
            start,
            end,
            color,
            self.segments_per_circle,
        );
        self.push(vertices);
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::LinearGradient;

    const WHITE: Color = [1.0; 4];

    fn approx(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-4 && (a[1] - b[1]).abs() < 1e-4
    }

    #[test]
    fn test_full_circle_fan() {
        let vertices = arc_fan(Vec2::ZERO, 10.0, 0.0, TAU, WHITE, 16);
        assert_eq!(vertices.len(), 16 * 3);
        assert!(approx(vertices[1].position, [10.0, 0.0]));
    }

    #[test]
    fn test_partial_arc_uses_fewer_segments() {
        let vertices = arc_band(Vec2::ZERO, 4.0, 6.0, 0.0, TAU / 4.0, WHITE, 16);
        assert_eq!(vertices.len(), 4 * 6);
    }

    #[test]
    fn test_gradient_rect_colors() {
        let gradient = LinearGradient::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
        );
        let vertices = rect(Rect::new(0.0, 0.0, 10.0, 5.0), &Paint::Linear(gradient));
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(vertices[1].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_transform_stack() {
        let mut tess = Tessellator::new(100.0, 100.0, 8);
        tess.save();
        tess.translate(Vec2::new(50.0, 50.0));
        tess.rotate(std::f32::consts::FRAC_PI_2);
        tess.fill_rect(Rect::new(0.0, 0.0, 10.0, 1.0), &Paint::Solid(WHITE));
        tess.restore();
        tess.fill_rect(Rect::new(0.0, 0.0, 10.0, 1.0), &Paint::Solid(WHITE));

        let v = tess.vertices();
        // Rotated quarter turn around (50, 50): +x maps to +y
        assert!(approx(v[1].position, [50.0, 60.0]));
        // After restore: untouched
        assert!(approx(v[7].position, [10.0, 0.0]));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut tess = Tessellator::new(10.0, 10.0, 8);
        tess.translate(Vec2::new(3.0, 3.0));
        tess.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Paint::Solid(WHITE));
        tess.clear([0.5, 0.5, 0.5, 1.0]);

        assert!(tess.vertices().is_empty());
        assert_eq!(tess.clear_color(), [0.5, 0.5, 0.5, 1.0]);
        tess.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Paint::Solid(WHITE));
        assert!(approx(tess.vertices()[0].position, [0.0, 0.0]));
    }

    #[test]
    fn test_unbalanced_restore_is_harmless() {
        let mut tess = Tessellator::new(10.0, 10.0, 8);
        tess.restore();
        tess.stroke_rect(Rect::new(1.0, 1.0, 4.0, 4.0), WHITE, 2.0);
        assert_eq!(tess.vertices().len(), 4 * 6);
    }
}

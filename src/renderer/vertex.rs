//! Vertex type for the triangle pipeline

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Map a surface-pixel vertex (origin top-left, y down) to clip space
    pub fn to_ndc(self, surface_size: Vec2) -> Self {
        let [x, y] = self.position;
        let w = surface_size.x.max(1.0);
        let h = surface_size.y.max(1.0);
        Self::new(x / w * 2.0 - 1.0, 1.0 - y / h * 2.0, self.color)
    }

    /// Convert the sRGB colour to linear for sRGB render targets
    pub fn linearized(self) -> Self {
        let [r, g, b, a] = self.color;
        Self {
            position: self.position,
            color: [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a],
        }
    }
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

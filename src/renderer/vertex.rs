//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
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
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub ground: [f32; 4],
    pub ground_dash: [f32; 4],
    pub wolf: [f32; 4],
    pub wolf_eye: [f32; 4],
    pub coin: [f32; 4],
    pub coin_mark: [f32; 4],
    pub obstacle: [f32; 4],
}

impl Palette {
    pub const NORMAL: Palette = Palette {
        background: [0.043, 0.059, 0.09, 1.0],
        ground: [1.0, 1.0, 1.0, 0.15],
        ground_dash: [1.0, 1.0, 1.0, 0.08],
        wolf: [0.945, 0.945, 0.945, 1.0],
        wolf_eye: [0.043, 0.059, 0.09, 1.0],
        coin: [1.0, 0.835, 0.29, 1.0],
        coin_mark: [0.043, 0.059, 0.09, 1.0],
        obstacle: [1.0, 0.302, 0.427, 1.0],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        ground: [1.0, 1.0, 1.0, 1.0],
        ground_dash: [1.0, 1.0, 1.0, 0.6],
        wolf: [1.0, 1.0, 1.0, 1.0],
        wolf_eye: [0.0, 0.0, 0.0, 1.0],
        coin: [1.0, 1.0, 0.0, 1.0],
        coin_mark: [0.0, 0.0, 0.0, 1.0],
        obstacle: [1.0, 0.0, 0.0, 1.0],
    };

    pub fn for_contrast(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::NORMAL
        }
    }
}

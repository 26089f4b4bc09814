//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Playfield-space vertex with a flat color
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
pub mod colors {
    /// #000020
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.125, 1.0];
    /// Light sky blue
    pub const PLAYER: [f32; 4] = [0.529, 0.808, 0.980, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Pink, yellow, orchid, light salmon, light blue
    pub const ENEMY_PALETTE: [[f32; 4]; 5] = [
        [1.0, 0.412, 0.706, 1.0],
        [1.0, 1.0, 0.0, 1.0],
        [0.855, 0.439, 0.839, 1.0],
        [1.0, 0.627, 0.478, 1.0],
        [0.678, 0.847, 0.902, 1.0],
    ];

    /// Palette lookup that tolerates out-of-range indices
    pub fn enemy(index: u8) -> [f32; 4] {
        ENEMY_PALETTE[index as usize % ENEMY_PALETTE.len()]
    }
}

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
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYFIELD: [f32; 4] = [0.05, 0.06, 0.09, 1.0];
    pub const PLAYER: [f32; 4] = [0.95, 0.55, 0.2, 1.0];
    pub const PLAYER_OUTLINE: [f32; 4] = [1.0, 0.9, 0.7, 1.0];
    pub const SKELETON_STATIC: [f32; 4] = [0.25, 0.45, 1.0, 1.0];
    pub const SKELETON_WANDERER: [f32; 4] = [0.3, 0.7, 1.0, 1.0];
    pub const SKELETON_CHASER: [f32; 4] = [0.45, 0.35, 1.0, 1.0];
    pub const POWER_UP: [f32; 4] = [1.0, 0.85, 0.25, 1.0];
    pub const POWER_UP_GLOW: [f32; 4] = [1.0, 0.85, 0.25, 0.35];
}

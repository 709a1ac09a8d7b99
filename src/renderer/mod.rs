//! WebGPU rendering module
//!
//! The sim is drawn as flat-colored triangle lists built on the CPU each frame.

pub mod pipeline;
pub mod shapes;
pub mod sprites;
pub mod vertex;

pub use pipeline::RenderState;
pub use sprites::{scene_vertices, world_to_ndc};
pub use vertex::Vertex;

//! WebGPU rendering module
//!
//! Turns a read-only run snapshot into colored triangles each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Palette, Vertex};

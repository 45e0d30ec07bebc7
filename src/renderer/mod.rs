//! Rendering module
//!
//! `scene` turns a snapshot into stroke triangles and a timer label;
//! `pipeline` draws those triangles with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Frame, build_frame, format_elapsed};
pub use vertex::Vertex;

//! Native wgpu renderer for the fixed desk scene.

pub mod camera;
pub mod renderer;
pub mod texture;

pub use camera::{Camera, MoveDirection, Projection, ProjectionMode};
pub use renderer::{RenderError, Renderer};

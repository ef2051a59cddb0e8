//! Rendering module
//!
//! `scene` draws the game through the [`Surface`] trait. On the web the
//! surface is a [`Tessellator`] whose triangles `pipeline` uploads to WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::draw_frame;
pub use shapes::Tessellator;
pub use surface::{Color, LinearGradient, Paint, Rect, Surface};
pub use vertex::Vertex;

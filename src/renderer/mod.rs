//! WebGPU rendering module
//!
//! Scene building and the HUD model are plain Rust and run everywhere; the
//! wgpu pipeline only needs a surface on the browser host.

pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use hud::HudView;
pub use pipeline::RenderState;
pub use scene::{Starfield, build_scene};
pub use vertex::Vertex;

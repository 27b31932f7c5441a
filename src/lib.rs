//! A CPU scanline rasterizer for lit, textured, depth-tested triangles.
//!
//! All rendering happens on the CPU into an ARGB8888 frame buffer. SDL2 is
//! used only by the optional `window` feature, for the interactive demo.
//!
//! # Quick Start
//!
//! ```ignore
//! use rastery::prelude::*;
//!
//! let mut engine = Engine::new(400, 300)?;
//! engine.load_cube_mesh();
//! engine.update(&InputState::default(), 1.0 / 60.0);
//! let stats = engine.render();
//! engine.frame().save_png("cube.png")?;
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod input;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

pub use config::{ConfigError, RenderConfig};
pub use engine::Engine;
pub use mesh::{LoadError, Mesh};
pub use projection::Projection;
pub use transform::Transform;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::{CameraView, FpsCamera, FpsCameraController};
    pub use crate::colors::Color;
    pub use crate::config::RenderConfig;
    pub use crate::engine::Engine;
    pub use crate::input::InputState;
    pub use crate::light::PointLight;
    pub use crate::mesh::{Face, Mesh, Vertex};
    pub use crate::projection::{Projection, Projector, ScreenPoint, YAxis};
    pub use crate::render::{
        CullMode, FrameBuffer, FrameStats, RasterVertex, RenderMode, RenderTarget, Renderer,
        ScanlineRasterizer,
    };
    pub use crate::texture::{Sampler, Texture};
    pub use crate::transform::Transform;

    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    #[cfg(feature = "window")]
    pub use crate::window::{FpsCounter, FrameLimiter, Window, WindowEvent};
}

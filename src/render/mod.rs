//! The CPU rendering core: buffers, culling, rasterization and the frame loop.

pub mod cull;
pub mod depth;
pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod target;

pub use cull::{CullMode, LitFace};
pub use depth::{DepthBuffer, DEPTH_CLEAR};
pub use framebuffer::FrameBuffer;
pub use rasterizer::{RasterVertex, ScanlineRasterizer, DEPTH_SCALE};
pub use renderer::{FrameStats, RenderMode, Renderer};
pub use target::{RenderTarget, TargetError};

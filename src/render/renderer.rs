//! Per-frame driver.
//!
//! [`Renderer`] owns the render target and runs one pass per frame over every
//! face of every mesh: cull and light, project, then rasterize. There is no
//! face sorting; visibility is resolved entirely by the depth buffer.

use serde::{Deserialize, Serialize};

use super::cull::{prepare_face, CullMode};
use super::rasterizer::{RasterVertex, ScanlineRasterizer};
use super::target::{RenderTarget, TargetError};
use super::FrameBuffer;
use crate::camera::CameraView;
use crate::colors::Color;
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::projection::{Projector, ScreenPoint, YAxis};
use crate::texture::Texture;

/// Lines whose endpoints project farther than this many pixels outside the
/// target are skipped rather than walked pixel by pixel.
const LINE_GUARD: f32 = 8192.0;

/// How meshes are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// One pixel per projected vertex.
    Points,
    /// Triangle edges, no culling or depth test.
    Wireframe,
    /// Culled, lit, depth-tested scanline fill.
    #[default]
    Shaded,
}

impl RenderMode {
    /// Cycle to the next mode.
    pub fn next(self) -> Self {
        match self {
            RenderMode::Points => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Shaded,
            RenderMode::Shaded => RenderMode::Points,
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Points => write!(f, "Points"),
            RenderMode::Wireframe => write!(f, "Wireframe"),
            RenderMode::Shaded => write!(f, "Shaded"),
        }
    }
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces submitted.
    pub faces: usize,
    /// Faces rejected by backface culling.
    pub culled: usize,
    /// Faces handed to the rasterizer (or drawn as points/lines).
    pub drawn: usize,
    /// Pixels that passed the depth test.
    pub pixels: usize,
}

pub struct Renderer {
    target: RenderTarget,
    projector: Projector,
    rasterizer: ScanlineRasterizer,
    cull_mode: CullMode,
    render_mode: RenderMode,
    background: Color,
    draw_axes: bool,
}

impl Renderer {
    pub fn new(width: u32, height: u32, y_axis: YAxis) -> Result<Self, TargetError> {
        Ok(Self::with_target(RenderTarget::new(width, height)?, y_axis))
    }

    /// Render into caller-supplied buffers.
    pub fn with_target(target: RenderTarget, y_axis: YAxis) -> Self {
        Self {
            projector: Projector::new(target.width(), target.height(), y_axis),
            target,
            rasterizer: ScanlineRasterizer::new(),
            cull_mode: CullMode::default(),
            render_mode: RenderMode::default(),
            background: Color::BLACK,
            draw_axes: false,
        }
    }

    /// Reallocate both buffers at a new size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TargetError> {
        self.target = RenderTarget::new(width, height)?;
        self.projector = Projector::new(width, height, self.projector.y_axis());
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn draws_axes(&self) -> bool {
        self.draw_axes
    }

    pub fn set_draw_axes(&mut self, enabled: bool) {
        self.draw_axes = enabled;
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.target.frame()
    }

    /// Clear the target and draw `meshes` as seen from `view`.
    pub fn render_frame<'a, I>(&mut self, meshes: I, view: &CameraView, light: &PointLight) -> FrameStats
    where
        I: IntoIterator<Item = &'a Mesh>,
    {
        self.target.clear(self.background);

        let mut stats = FrameStats::default();
        for mesh in meshes {
            let before = stats;
            match self.render_mode {
                RenderMode::Points => self.draw_points(mesh, view, &mut stats),
                RenderMode::Wireframe => self.draw_wireframe(mesh, view, &mut stats),
                RenderMode::Shaded => self.draw_shaded(mesh, view, light, &mut stats),
            }
            log::trace!(
                "mesh '{}': {} faces, {} culled, {} pixels",
                mesh.name(),
                stats.faces - before.faces,
                stats.culled - before.culled,
                stats.pixels - before.pixels
            );
        }

        if self.draw_axes {
            self.draw_axes(view);
        }

        log::debug!(
            "frame: {} faces, {} culled, {} drawn, {} pixels",
            stats.faces,
            stats.culled,
            stats.drawn,
            stats.pixels
        );
        stats
    }

    fn project(&self, world: Vec3, view: &CameraView) -> ScreenPoint {
        self.projector.project(world, &view.view_projection, view.eye)
    }

    fn draw_shaded(&mut self, mesh: &Mesh, view: &CameraView, light: &PointLight, stats: &mut FrameStats) {
        let color = mesh.color();
        let texture: Option<&Texture> = mesh.texture();

        for face in mesh.world_faces() {
            stats.faces += 1;
            let Some(lit) = prepare_face(&face, light, view.eye, self.cull_mode) else {
                stats.culled += 1;
                continue;
            };

            let vertices = [0, 1, 2].map(|i| {
                RasterVertex::new(self.project(lit.positions[i], view), lit.lights[i], lit.uvs[i])
            });
            stats.drawn += 1;
            stats.pixels += self
                .rasterizer
                .fill_triangle(vertices, color, texture, &mut self.target);
        }
    }

    fn draw_points(&mut self, mesh: &Mesh, view: &CameraView, stats: &mut FrameStats) {
        let color = mesh.color();
        let (width, height) = (self.width() as f32, self.height() as f32);

        for face in mesh.world_faces() {
            stats.faces += 1;
            stats.drawn += 1;
            for position in face.positions() {
                let p = self.project(position, view);
                if p.x > 0.0 && p.x < width && p.y > 0.0 && p.y < height {
                    self.target.frame_mut().set_pixel(p.x as i32, p.y as i32, color);
                    stats.pixels += 1;
                }
            }
        }
    }

    fn draw_wireframe(&mut self, mesh: &Mesh, view: &CameraView, stats: &mut FrameStats) {
        let color = mesh.color();

        for face in mesh.world_faces() {
            stats.faces += 1;
            stats.drawn += 1;
            let [a, b, c] = face.positions().map(|p| self.project(p, view));
            self.draw_line(a, b, color);
            self.draw_line(b, c, color);
            self.draw_line(c, a, color);
        }
    }

    /// World X, Y and Z unit axes from the origin in red, green and blue.
    fn draw_axes(&mut self, view: &CameraView) {
        let origin = self.project(Vec3::ZERO, view);
        for (axis, color) in [(Vec3::X, Color::RED), (Vec3::Y, Color::GREEN), (Vec3::Z, Color::BLUE)] {
            let tip = self.project(axis, view);
            self.draw_line(origin, tip, color);
        }
    }

    fn draw_line(&mut self, a: ScreenPoint, b: ScreenPoint, color: Color) {
        if !self.line_is_drawable(a) || !self.line_is_drawable(b) {
            return;
        }
        self.target
            .frame_mut()
            .draw_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, color);
    }

    fn line_is_drawable(&self, p: ScreenPoint) -> bool {
        p.is_finite()
            && p.x > -LINE_GUARD
            && p.y > -LINE_GUARD
            && p.x < self.width() as f32 + LINE_GUARD
            && p.y < self.height() as f32 + LINE_GUARD
    }
}

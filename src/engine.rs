//! Core rendering engine.
//!
//! The [`Engine`] struct ties the pieces together: it owns the meshes, the
//! light, the camera and the [`Renderer`], advances mesh animation with
//! [`Engine::update`] and draws a frame with [`Engine::render`].

use crate::camera::{FpsCamera, FpsCameraController};
use crate::colors::Color;
use crate::config::RenderConfig;
use crate::input::InputState;
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::mesh::{LoadError, Mesh};
use crate::projection::Projection;
use crate::render::{CullMode, FrameBuffer, FrameStats, RenderMode, Renderer, TargetError};
use crate::texture::Texture;

pub struct Engine {
    renderer: Renderer,
    meshes: Vec<Mesh>,
    light: PointLight,
    camera: FpsCamera,
    controller: FpsCameraController,
    projection: Projection,
    base_color: Color,
    /// Radians per second added to every mesh's rotation.
    spin: Vec3,
    invert_model_normals: bool,
}

impl Engine {
    /// Engine with default settings and no meshes.
    pub fn new(width: u32, height: u32) -> Result<Self, TargetError> {
        Self::from_config(&RenderConfig {
            width,
            height,
            ..RenderConfig::default()
        })
    }

    pub fn from_config(config: &RenderConfig) -> Result<Self, TargetError> {
        let mut renderer = Renderer::new(config.width, config.height, config.y_axis)?;
        renderer.set_background(config.background_color());
        renderer.set_cull_mode(config.cull_mode);
        renderer.set_render_mode(config.render_mode);
        renderer.set_draw_axes(config.draw_axes);

        let mut light = PointLight::new(config.light_position());
        light.diffuse = config.light_diffuse;
        light.ambient = config.light_ambient;

        Ok(Self {
            renderer,
            meshes: Vec::new(),
            light,
            camera: FpsCamera::new(config.camera_position()),
            controller: FpsCameraController::new(config.move_speed, config.look_sensitivity),
            projection: config.projection(),
            base_color: config.base_color(),
            spin: config.spin(),
            invert_model_normals: config.invert_model_normals,
        })
    }

    /// Add a mesh, giving it the configured base color.
    pub fn add_mesh(&mut self, mut mesh: Mesh) {
        mesh.set_color(self.base_color);
        self.meshes.push(mesh);
    }

    pub fn load_cube_mesh(&mut self) {
        self.add_mesh(Mesh::cube());
    }

    /// Load every object in an OBJ file, optionally textured.
    ///
    /// Returns the number of meshes added.
    pub fn load_obj(&mut self, obj_path: &str, texture_path: Option<&str>) -> Result<usize, LoadError> {
        let texture = texture_path.map(Texture::from_file).transpose()?;
        let meshes = Mesh::load_obj(obj_path)?;
        let count = meshes.len();

        for mut mesh in meshes {
            if self.invert_model_normals {
                mesh.invert_normals();
            }
            if let Some(texture) = &texture {
                mesh.set_texture(texture.clone());
            }
            self.add_mesh(mesh);
        }
        Ok(count)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn camera(&self) -> &FpsCamera {
        &self.camera
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn render_mode(&self) -> RenderMode {
        self.renderer.render_mode()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.renderer.set_render_mode(mode);
    }

    pub fn cull_mode(&self) -> CullMode {
        self.renderer.cull_mode()
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.renderer.set_cull_mode(mode);
    }

    pub fn toggle_axes(&mut self) {
        self.renderer.set_draw_axes(!self.renderer.draws_axes());
    }

    pub fn set_spin(&mut self, spin: Vec3) {
        self.spin = spin;
    }

    /// Move the camera from input and spin every mesh.
    pub fn update(&mut self, input: &InputState, delta_time: f32) {
        self.controller.update(&mut self.camera, input, delta_time);

        let step = self.spin * delta_time;
        for mesh in &mut self.meshes {
            mesh.transform_mut().rotate(step);
        }
    }

    /// Draw one frame into the internal buffers.
    pub fn render(&mut self) -> FrameStats {
        let view = self.camera.view(&self.projection);
        self.renderer.render_frame(&self.meshes, &view, &self.light)
    }

    /// Reallocate the render target and keep the aspect ratio in sync.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TargetError> {
        self.renderer.resize(width, height)?;
        self.projection
            .set_aspect_ratio(width as f32 / height as f32);
        Ok(())
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.renderer.frame()
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_bytes(&self) -> &[u8] {
        self.renderer.frame().as_bytes()
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }
}

//! Fly-through camera driven by keyboard and mouse.
//!
//! The camera sits in a right-handed world (+Y up) and is oriented by two
//! angles. At yaw 0 and pitch 0 it looks down -Z; positive yaw turns right
//! and positive pitch tilts up. Pitch stops just short of straight up or
//! down so the look-at basis never degenerates.

use std::f32::consts::TAU;

use crate::input::InputState;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::projection::Projection;

const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// What the renderer needs from a camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub view_projection: Mat4,
    pub eye: Vec3,
}

#[derive(Debug, Clone)]
pub struct FpsCamera {
    position: Vec3,
    /// Radians, kept in `[0, TAU)`.
    yaw: f32,
    pitch: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0))
    }
}

impl FpsCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self::new(position);
        camera.look_at(target);
        camera
    }

    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(TAU);
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Turn toward `target`. A target straight above or below keeps the
    /// current yaw; a target at the eye changes nothing.
    pub fn look_at(&mut self, target: Vec3) {
        let d = target - self.position;
        let ground = d.x.hypot(d.z);

        if ground > f32::EPSILON {
            self.yaw = d.x.atan2(-d.z).rem_euclid(TAU);
        }
        if d.length() > f32::EPSILON {
            self.pitch = d.y.atan2(ground).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Strafe along the camera's right direction.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Move along world +Y.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Combined view-projection and eye position for one frame.
    pub fn view(&self, projection: &Projection) -> CameraView {
        CameraView {
            view_projection: projection.matrix() * self.view_matrix(),
            eye: self.position,
        }
    }
}

/// Turns held keys and mouse drags into camera motion.
#[derive(Debug, Clone)]
pub struct FpsCameraController {
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Mouse sensitivity in radians per pixel.
    pub look_sensitivity: f32,
}

impl Default for FpsCameraController {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            look_sensitivity: 0.01,
        }
    }
}

impl FpsCameraController {
    pub fn new(move_speed: f32, look_sensitivity: f32) -> Self {
        Self {
            move_speed,
            look_sensitivity,
        }
    }

    /// Opposite keys held together cancel. Mouse deltas only turn the
    /// camera while `input.looking` is set; moving the mouse up looks up.
    pub fn update(&self, camera: &mut FpsCamera, input: &InputState, delta_time: f32) {
        let step = self.move_speed * delta_time;
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => step,
            (false, true) => -step,
            _ => 0.0,
        };

        camera.move_forward(axis(input.forward, input.back));
        camera.move_right(axis(input.right, input.left));
        camera.move_up(axis(input.up, input.down));

        let (dx, dy) = input.mouse_delta;
        if input.looking && (dx != 0 || dy != 0) {
            camera.rotate(
                dx as f32 * self.look_sensitivity,
                -dy as f32 * self.look_sensitivity,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn camera_starts_looking_down_negative_z() {
        let camera = FpsCamera::new(Vec3::ZERO);
        assert_relative_eq!(camera.forward().z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.right().x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.up().y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn yaw_rotates_to_the_right() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.rotate(std::f32::consts::FRAC_PI_2, 0.0);
        assert_relative_eq!(camera.forward().x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.forward().z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.rotate(0.0, std::f32::consts::PI);
        assert!(camera.pitch() < std::f32::consts::FRAC_PI_2);
        assert!(camera.pitch() > 0.0);
    }

    #[test]
    fn looking_at_origin_centres_it() {
        let camera = FpsCamera::looking_at(Vec3::new(3.0, 2.0, 5.0), Vec3::ZERO);
        let p = camera.view_matrix().transform_point(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert!(p.z < 0.0);
    }

    #[test]
    fn look_at_straight_up_keeps_yaw() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.rotate(1.0, 0.0);
        camera.look_at(Vec3::new(0.0, 4.0, 0.0));
        assert_relative_eq!(camera.yaw(), 1.0);
        assert_relative_eq!(camera.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn controller_moves_by_speed_times_time() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        let controller = FpsCameraController::new(2.0, 0.01);
        let input = InputState {
            forward: true,
            right: true,
            ..Default::default()
        };
        controller.update(&mut camera, &input, 0.5);
        assert_relative_eq!(camera.position().z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.position().x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn mouse_only_looks_while_held() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        let controller = FpsCameraController::default();
        let mut input = InputState {
            mouse_delta: (10, 0),
            ..Default::default()
        };
        controller.update(&mut camera, &input, 0.016);
        assert_eq!(camera.yaw(), 0.0);

        input.looking = true;
        controller.update(&mut camera, &input, 0.016);
        assert_relative_eq!(camera.yaw(), 0.1, epsilon = 1e-6);
    }
}

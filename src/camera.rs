//! Free-look camera state.
//!
//! The camera stores its orientation as yaw/pitch angles; the direction
//! vector is recomputed once per frame before the view matrix is built,
//! by rotating +Z by pitch about X, then yaw about Y.

use crate::math::Vec3;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    forward_velocity: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Camera {
    /// A camera at `position` looking along +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            direction: Vec3::FORWARD,
            forward_velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn forward_velocity(&self) -> Vec3 {
        self.forward_velocity
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// Move along the current view direction. Negative distances move
    /// backward.
    pub fn move_forward(&mut self, distance: f32) {
        self.forward_velocity = self.direction * distance;
        self.position = self.position + self.forward_velocity;
    }

    /// Raise or lower the camera along world Y.
    pub fn move_vertical(&mut self, distance: f32) {
        self.position.y += distance;
    }

    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    pub fn rotate_pitch(&mut self, delta: f32) {
        self.pitch += delta;
    }

    /// Recompute the view direction from the current yaw and pitch:
    /// +Z rotated by pitch about X, then by yaw about Y.
    pub fn update_direction(&mut self) {
        self.direction = Vec3::FORWARD.rotate_x(self.pitch).rotate_y(self.yaw);
    }
}

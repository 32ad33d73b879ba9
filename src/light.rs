//! Flat per-face lighting.

use crate::colors;
use crate::math::Vec3;

/// A single directional light illuminating every face from the same
/// direction.
pub struct DirectionalLight {
    /// Unit vector pointing the way the light travels.
    pub direction: Vec3,
}

impl DirectionalLight {
    /// The direction is normalized at construction.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    /// Lambert intensity for a face normal: full when the normal faces
    /// straight into the light, zero when it faces away.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        (-normal.dot(self.direction)).max(0.0)
    }
}

/// Scale a color's R, G, B channels by `intensity`, preserving alpha.
/// Intensity outside [0, 1] is clamped.
pub fn apply_intensity(color: u32, intensity: f32) -> u32 {
    colors::scale_rgb(color, intensity.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{pack_rgba, unpack_rgba};
    use approx::assert_relative_eq;

    #[test]
    fn facing_the_light_gives_full_intensity() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0));
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(light.intensity(normal), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn facing_away_gives_zero() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(light.intensity(normal), 0.0);
    }

    #[test]
    fn grazing_angle_follows_cosine() {
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0));
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert_relative_eq!(light.intensity(normal), 0.707, epsilon = 1e-3);
    }

    #[test]
    fn apply_intensity_clamps_and_keeps_alpha() {
        let color = pack_rgba(100, 200, 50, 0x80);
        assert_eq!(apply_intensity(color, 2.0), color);
        let dark = apply_intensity(color, -1.0);
        assert_eq!(unpack_rgba(dark), (0, 0, 0, 0x80));
        let half = apply_intensity(color, 0.5);
        assert_eq!(unpack_rgba(half), (50, 100, 25, 0x80));
    }
}

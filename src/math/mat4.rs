//! 4x4 transformation matrix.
//!
//! # Convention
//! - Storage is **row-major**: `m[row][col]`
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations are right-handed about each axis

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const fn new(m: [[f32; 4]; 4]) -> Self {
        Mat4 { m }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        let mut m = Mat4::identity();
        m.m[0][0] = sx;
        m.m[1][1] = sy;
        m.m[2][2] = sz;
        m
    }

    /// Translation sits in the last column (column-vector convention).
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        let mut m = Mat4::identity();
        m.m[0][3] = tx;
        m.m[1][3] = ty;
        m.m[2][3] = tz;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        let mut m = Mat4::identity();
        m.m[1][1] = c;
        m.m[1][2] = -s;
        m.m[2][1] = s;
        m.m[2][2] = c;
        m
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        let mut m = Mat4::identity();
        m.m[0][0] = c;
        m.m[0][2] = s;
        m.m[2][0] = -s;
        m.m[2][2] = c;
        m
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        let mut m = Mat4::identity();
        m.m[0][0] = c;
        m.m[0][1] = -s;
        m.m[1][0] = s;
        m.m[1][1] = c;
        m
    }

    /// Perspective projection.
    ///
    /// `aspect` is height over width. After the perspective divide,
    /// points inside the frustum land in x,y ∈ [-1, 1] and z ∈ [0, 1];
    /// the w component receives the view-space depth.
    pub fn perspective(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let inv_tan = 1.0 / (fov_y / 2.0).tan();
        let mut m = Mat4::new([[0.0; 4]; 4]);
        m.m[0][0] = aspect * inv_tan;
        m.m[1][1] = inv_tan;
        m.m[2][2] = z_far / (z_far - z_near);
        m.m[2][3] = -(z_far * z_near) / (z_far - z_near);
        m.m[3][2] = 1.0;
        m
    }

    /// View matrix for a camera at `eye` looking toward `target`.
    ///
    /// Builds an orthonormal basis (right, up, forward) and combines it
    /// with the inverse translation of the eye position.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right);

        Mat4::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [forward.x, forward.y, forward.z, -forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Multiply and perform the perspective divide, keeping the original
    /// w so later stages can undo projective distortion.
    pub fn mul_vec4_project(&self, v: Vec4) -> Vec4 {
        let mut result = *self * v;
        if result.w != 0.0 {
            result.x /= result.w;
            result.y /= result.w;
            result.z /= result.w;
        }
        result
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row][col]
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.m[row][0] * rhs.m[0][col]
                    + self.m[row][1] * rhs.m[1][col]
                    + self.m[row][2] * rhs.m[2][col]
                    + self.m[row][3] * rhs.m[3][col];
            }
        }
        Mat4::new(result)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z + self.m[0][3] * v.w,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z + self.m[1][3] * v.w,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z + self.m[2][3] * v.w,
            self.m[3][0] * v.x + self.m[3][1] * v.y + self.m[3][2] * v.z + self.m[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FOV_Y: f32 = std::f32::consts::FRAC_PI_3; // 60 degrees
    const ASPECT: f32 = 600.0 / 800.0;
    const Z_NEAR: f32 = 0.1;
    const Z_FAR: f32 = 100.0;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn identity_is_multiplicative_neutral() {
        let a = Mat4::translation(1.0, -2.0, 3.0)
            * Mat4::rotation_y(0.7)
            * Mat4::scaling(2.0, 2.0, 2.0);
        assert_mat_eq(a * Mat4::identity(), a);
        assert_mat_eq(Mat4::identity() * a, a);
    }

    #[test]
    fn translation_then_rotation_chains_right_to_left() {
        // A * B * v applies B first
        let m = Mat4::translation(10.0, 0.0, 0.0) * Mat4::rotation_z(std::f32::consts::FRAC_PI_2);
        let v = m * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(v.x, 10.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn projection_maps_frustum_interior_to_ndc() {
        let proj = Mat4::perspective(FOV_Y, ASPECT, Z_NEAR, Z_FAR);

        let inside = [
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(1.0, 1.0, 10.0),
            Vec3::new(-2.0, 0.5, 50.0),
        ];
        for p in inside {
            let ndc = proj.mul_vec4_project(Vec4::from_vec3(p));
            assert!(ndc.x.abs() <= 1.0, "x out of range for {:?}", p);
            assert!(ndc.y.abs() <= 1.0, "y out of range for {:?}", p);
            assert!((0.0..=1.0).contains(&ndc.z), "z out of range for {:?}", p);
        }

        // Points beyond the side planes project outside [-1, 1]
        let outside = proj.mul_vec4_project(Vec4::from_vec3(Vec3::new(10.0, 0.0, 5.0)));
        assert!(outside.x.abs() > 1.0);
    }

    #[test]
    fn projection_z_range_spans_near_to_far() {
        let proj = Mat4::perspective(FOV_Y, ASPECT, Z_NEAR, Z_FAR);
        let near = proj.mul_vec4_project(Vec4::from_vec3(Vec3::new(0.0, 0.0, Z_NEAR)));
        let far = proj.mul_vec4_project(Vec4::from_vec3(Vec3::new(0.0, 0.0, Z_FAR)));
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn project_retains_view_space_depth_in_w() {
        let proj = Mat4::perspective(FOV_Y, ASPECT, Z_NEAR, Z_FAR);
        let v = proj.mul_vec4_project(Vec4::from_vec3(Vec3::new(0.5, -0.25, 7.0)));
        assert_relative_eq!(v.w, 7.0, epsilon = 1e-5);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, -5.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);

        let origin = view * Vec4::from_vec3(Vec3::ZERO);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, 5.0, epsilon = 1e-5);

        let at_eye = view * Vec4::from_vec3(eye);
        assert_relative_eq!(at_eye.z, 0.0, epsilon = 1e-5);
    }
}

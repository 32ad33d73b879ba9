//! View-space frustum clipping.
//!
//! Triangles are clipped against the six frustum planes with the
//! Sutherland-Hodgman algorithm before projection, so no vertex behind
//! the near plane ever reaches the perspective divide. Planes are
//! point + normal pairs with normals pointing into the frustum.

use crate::math::Vec3;
use crate::texture::Tex2;

/// Capacity bound for a clipped polygon. A triangle gains at most one
/// vertex per plane, so six passes keep it comfortably under this.
pub const MAX_POLY_VERTICES: usize = 10;

#[derive(Clone, Copy)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Signed distance of a point from this plane.
    /// Positive means inside (the half-space the normal points into).
    pub fn signed_distance(&self, position: Vec3) -> f32 {
        (position - self.point).dot(self.normal)
    }
}

/// A polygon vertex carrying the attributes that survive clipping.
#[derive(Clone, Copy)]
pub struct PolyVertex {
    pub position: Vec3,
    pub uv: Tex2,
}

impl PolyVertex {
    pub fn new(position: Vec3, uv: Tex2) -> Self {
        Self { position, uv }
    }

    /// Interpolate position and UV toward `other`.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

/// A convex polygon built from one face, clipped in place against each
/// frustum plane and fan-triangulated afterwards.
pub struct ClipPolygon {
    vertices: Vec<PolyVertex>,
}

impl ClipPolygon {
    pub fn from_triangle(v0: PolyVertex, v1: PolyVertex, v2: PolyVertex) -> Self {
        let mut vertices = Vec::with_capacity(MAX_POLY_VERTICES);
        vertices.extend([v0, v1, v2]);
        Self { vertices }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[PolyVertex] {
        &self.vertices
    }

    /// Fewer than three vertices cannot form a triangle; such polygons
    /// are valid and simply triangulate to nothing.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Sutherland-Hodgman against a single plane.
    ///
    /// Walks the closed vertex sequence edge by edge: a strict sign
    /// change in the signed distances emits the interpolated crossing at
    /// t = d_prev / (d_prev - d_cur), and any vertex on the inside
    /// (d >= 0, so points exactly on the plane survive) is kept.
    pub fn clip_against_plane(&mut self, plane: &Plane) {
        let n = self.vertices.len();
        if n == 0 {
            return;
        }

        let mut inside = Vec::with_capacity(MAX_POLY_VERTICES);

        let mut prev = self.vertices[n - 1];
        let mut d_prev = plane.signed_distance(prev.position);

        for i in 0..n {
            let current = self.vertices[i];
            let d_current = plane.signed_distance(current.position);

            if d_prev * d_current < 0.0 {
                let t = d_prev / (d_prev - d_current);
                inside.push(prev.lerp(&current, t));
            }
            if d_current >= 0.0 {
                inside.push(current);
            }

            prev = current;
            d_prev = d_current;
        }

        self.vertices = inside;
    }

    /// Fan triangulation: (v0, v[i+1], v[i+2]) for each i, yielding
    /// n - 2 triangles. Degenerate polygons yield none.
    pub fn triangulate(&self) -> impl Iterator<Item = [PolyVertex; 3]> + '_ {
        (0..self.vertices.len().saturating_sub(2))
            .map(move |i| [self.vertices[0], self.vertices[i + 1], self.vertices[i + 2]])
    }
}

/// The six view-space frustum planes, built once from the fields of
/// view and clip distances.
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Half-angle construction: the side planes pass through the origin
    /// tilted by half the field of view; near and far sit on the Z axis.
    pub fn new(fov_x: f32, fov_y: f32, z_near: f32, z_far: f32) -> Self {
        let half_x = fov_x / 2.0;
        let half_y = fov_y / 2.0;

        Self {
            planes: [
                // left
                Plane::new(Vec3::ZERO, Vec3::new(half_x.cos(), 0.0, half_x.sin())),
                // right
                Plane::new(Vec3::ZERO, Vec3::new(-half_x.cos(), 0.0, half_x.sin())),
                // top
                Plane::new(Vec3::ZERO, Vec3::new(0.0, -half_y.cos(), half_y.sin())),
                // bottom
                Plane::new(Vec3::ZERO, Vec3::new(0.0, half_y.cos(), half_y.sin())),
                // near
                Plane::new(Vec3::new(0.0, 0.0, z_near), Vec3::new(0.0, 0.0, 1.0)),
                // far
                Plane::new(Vec3::new(0.0, 0.0, z_far), Vec3::new(0.0, 0.0, -1.0)),
            ],
        }
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Clip a polygon against all six planes, left/right/top/bottom then
    /// near/far.
    pub fn clip_polygon(&self, polygon: &mut ClipPolygon) {
        for plane in &self.planes {
            if polygon.is_degenerate() {
                break;
            }
            polygon.clip_against_plane(plane);
        }
    }
}

/// Horizontal field of view matching a vertical one at the given
/// display size: fov_x = 2 atan(tan(fov_y / 2) * w / h).
pub fn horizontal_fov(fov_y: f32, width: u32, height: u32) -> f32 {
    2.0 * ((fov_y / 2.0).tan() * width as f32 / height as f32).atan()
}

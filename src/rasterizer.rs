//! Triangle scan conversion.
//!
//! Triangles arrive in screen space: x and y in pixels, z in NDC, and w
//! holding the view-space depth saved before the perspective divide.
//! Fills walk scanlines over a flat-bottom and a flat-top half; each
//! pixel interpolates 1/w barycentrically and stores `1 - 1/w` in the
//! depth buffer, written only when strictly nearer than what is there.

use crate::framebuffer::FrameBuffer;
use crate::math::{Vec2, Vec3, Vec4};
use crate::texture::{Tex2, Texture};

/// A render-ready triangle produced by the pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub points: [Vec4; 3],
    pub texcoords: [Tex2; 3],
    pub color: u32,
}

impl Triangle {
    pub fn new(points: [Vec4; 3], texcoords: [Tex2; 3], color: u32) -> Self {
        Self {
            points,
            texcoords,
            color,
        }
    }
}

/// Barycentric weights of point `p` in triangle (a, b, c), via ratios of
/// signed parallelogram areas. The point is inside iff all three weights
/// are non-negative; for a degenerate triangle the divisor is zero and
/// the weights are not finite.
pub fn barycentric_weights(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Vec3 {
    let area = (c - a).cross(b - a);

    let alpha = (c - p).cross(b - p) / area;
    let beta = (c - a).cross(p - a) / area;
    let gamma = 1.0 - alpha - beta;

    Vec3::new(alpha, beta, gamma)
}

/// Sort three screen-space vertices by ascending y, swapping the UV
/// attributes in lockstep.
fn sort_by_y(points: &mut [Vec4; 3], uvs: &mut [Tex2; 3]) {
    if points[0].y > points[1].y {
        points.swap(0, 1);
        uvs.swap(0, 1);
    }
    if points[1].y > points[2].y {
        points.swap(1, 2);
        uvs.swap(1, 2);
    }
    if points[0].y > points[1].y {
        points.swap(0, 1);
        uvs.swap(0, 1);
    }
}

/// Solid-color pixel emitter: depth-test against interpolated 1/w, then
/// plot.
fn draw_solid_pixel(fb: &mut FrameBuffer, x: i32, y: i32, points: &[Vec4; 3], color: u32) {
    let a = Vec2::new(points[0].x, points[0].y);
    let b = Vec2::new(points[1].x, points[1].y);
    let c = Vec2::new(points[2].x, points[2].y);
    let weights = barycentric_weights(a, b, c, Vec2::new(x as f32, y as f32));

    let reciprocal_w =
        weights.x / points[0].w + weights.y / points[1].w + weights.z / points[2].w;

    // Flip so smaller values are nearer, matching the 1.0 clear value
    let depth = 1.0 - reciprocal_w;

    if depth < fb.depth_at(x, y) {
        fb.plot(x, y, color);
        fb.update_depth(x, y, depth);
    }
}

/// Textured pixel emitter: perspective-correct UV interpolation, then
/// the same depth rule as the solid fill.
fn draw_texel(
    fb: &mut FrameBuffer,
    x: i32,
    y: i32,
    points: &[Vec4; 3],
    uvs: &[Tex2; 3],
    texture: &Texture,
) {
    let a = Vec2::new(points[0].x, points[0].y);
    let b = Vec2::new(points[1].x, points[1].y);
    let c = Vec2::new(points[2].x, points[2].y);
    let weights = barycentric_weights(a, b, c, Vec2::new(x as f32, y as f32));

    // Interpolate u/w, v/w, and 1/w separately; dividing back by the
    // interpolated 1/w undoes the projective distortion.
    let interpolated_u = weights.x * uvs[0].u / points[0].w
        + weights.y * uvs[1].u / points[1].w
        + weights.z * uvs[2].u / points[2].w;
    let interpolated_v = weights.x * uvs[0].v / points[0].w
        + weights.y * uvs[1].v / points[1].w
        + weights.z * uvs[2].v / points[2].w;
    let reciprocal_w =
        weights.x / points[0].w + weights.y / points[1].w + weights.z / points[2].w;

    let u = interpolated_u / reciprocal_w;
    let v = interpolated_v / reciprocal_w;

    let depth = 1.0 - reciprocal_w;

    if depth < fb.depth_at(x, y) {
        fb.plot(x, y, texture.sample(u, v));
        fb.update_depth(x, y, depth);
    }
}

/// Walk both halves of a y-sorted triangle, invoking `emit` for every
/// covered pixel. `points` must already be sorted by ascending y.
fn scan_triangle<F: FnMut(&mut FrameBuffer, i32, i32)>(
    fb: &mut FrameBuffer,
    points: &[Vec4; 3],
    mut emit: F,
) {
    let (x0, y0) = (points[0].x as i32, points[0].y as i32);
    let (x1, y1) = (points[1].x as i32, points[1].y as i32);
    let (x2, y2) = (points[2].x as i32, points[2].y as i32);

    // Upper half: flat-bottom, between y0 and y1
    let mut inv_slope_1 = 0.0;
    let mut inv_slope_2 = 0.0;
    if y1 - y0 != 0 {
        inv_slope_1 = (x1 - x0) as f32 / (y1 - y0).abs() as f32;
    }
    if y2 - y0 != 0 {
        inv_slope_2 = (x2 - x0) as f32 / (y2 - y0).abs() as f32;
    }

    if y1 - y0 != 0 {
        for y in y0..=y1 {
            let mut x_start = (x1 as f32 + (y - y1) as f32 * inv_slope_1) as i32;
            let mut x_end = (x0 as f32 + (y - y0) as f32 * inv_slope_2) as i32;
            if x_end < x_start {
                std::mem::swap(&mut x_start, &mut x_end);
            }
            for x in x_start..=x_end {
                emit(fb, x, y);
            }
        }
    }

    // Lower half: flat-top, between y1 and y2
    let mut inv_slope_1 = 0.0;
    if y2 - y1 != 0 {
        inv_slope_1 = (x2 - x1) as f32 / (y2 - y1).abs() as f32;
    }

    if y2 - y1 != 0 {
        for y in y1..=y2 {
            let mut x_start = (x1 as f32 + (y - y1) as f32 * inv_slope_1) as i32;
            let mut x_end = (x0 as f32 + (y - y0) as f32 * inv_slope_2) as i32;
            if x_end < x_start {
                std::mem::swap(&mut x_start, &mut x_end);
            }
            for x in x_start..=x_end {
                emit(fb, x, y);
            }
        }
    }
}

/// Fill a triangle with a single color, depth-tested per pixel.
pub fn draw_filled_triangle(fb: &mut FrameBuffer, triangle: &Triangle) {
    let mut points = triangle.points;
    let mut uvs = triangle.texcoords;
    sort_by_y(&mut points, &mut uvs);

    let area = (Vec2::new(points[2].x, points[2].y) - Vec2::new(points[0].x, points[0].y))
        .cross(Vec2::new(points[1].x, points[1].y) - Vec2::new(points[0].x, points[0].y));
    if area.abs() < f32::EPSILON {
        return;
    }

    let color = triangle.color;
    scan_triangle(fb, &points, |fb, x, y| {
        draw_solid_pixel(fb, x, y, &points, color)
    });
}

/// Fill a triangle by sampling `texture` with perspective-correct UVs.
///
/// V is flipped once on entry: OBJ texture coordinates have a
/// bottom-left origin while the decoded image is top-left.
pub fn draw_textured_triangle(fb: &mut FrameBuffer, triangle: &Triangle, texture: &Texture) {
    let mut points = triangle.points;
    let mut uvs = triangle.texcoords;
    for uv in &mut uvs {
        uv.v = 1.0 - uv.v;
    }
    sort_by_y(&mut points, &mut uvs);

    let area = (Vec2::new(points[2].x, points[2].y) - Vec2::new(points[0].x, points[0].y))
        .cross(Vec2::new(points[1].x, points[1].y) - Vec2::new(points[0].x, points[0].y));
    if area.abs() < f32::EPSILON {
        return;
    }

    scan_triangle(fb, &points, |fb, x, y| {
        draw_texel(fb, x, y, &points, &uvs, texture)
    });
}

/// Draw the triangle's three edges with the framebuffer's DDA line.
pub fn draw_wireframe_triangle(fb: &mut FrameBuffer, triangle: &Triangle, color: u32) {
    let [p0, p1, p2] = triangle.points;
    fb.draw_line(p0.x as i32, p0.y as i32, p1.x as i32, p1.y as i32, color);
    fb.draw_line(p1.x as i32, p1.y as i32, p2.x as i32, p2.y as i32, color);
    fb.draw_line(p2.x as i32, p2.y as i32, p0.x as i32, p0.y as i32, color);
}

/// Mark each vertex with a small filled rectangle.
pub fn draw_vertex_markers(fb: &mut FrameBuffer, triangle: &Triangle, color: u32) {
    for point in &triangle.points {
        fb.draw_rect(point.x as i32, point.y as i32, 6, 6, color);
    }
}

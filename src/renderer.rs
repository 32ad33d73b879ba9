//! The per-frame rendering pipeline.
//!
//! [`Renderer`] owns everything a frame touches: frame buffer, mesh
//! store, camera, light, frustum, and projection matrix. Each frame,
//! `update` walks every mesh face through the transform / cull / clip /
//! project stages and queues screen-space triangles; `render` scan
//! converts the queue into the frame buffer according to the active
//! render mode.

use std::ops::BitOr;

use crate::camera::Camera;
use crate::clipping::{horizontal_fov, ClipPolygon, Frustum, PolyVertex};
use crate::colors;
use crate::framebuffer::FrameBuffer;
use crate::light::{apply_intensity, DirectionalLight};
use crate::math::{Mat4, Vec3, Vec4};
use crate::mesh::{LoadError, MeshStore};
use crate::rasterizer::{self, Triangle};

/// Hard cap on queued triangles per mesh; excess is silently dropped.
pub const MAX_TRIANGLES_PER_MESH: usize = 10_000;

const CHECKER_TILE_SIZE: i32 = 45;

/// What gets drawn for each triangle, as a bit set. Any disjoint
/// combination of the four flags is legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderMode(u8);

impl RenderMode {
    pub const DOT: Self = Self(0x1);
    pub const WIRE: Self = Self(0x2);
    pub const SOLID: Self = Self(0x4);
    pub const TEXTURE: Self = Self(0x8);

    pub fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 != 0
    }
}

impl BitOr for RenderMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::TEXTURE
    }
}

/// The triangles one mesh contributed this frame, so the textured fill
/// can find the mesh's texture again at draw time.
struct TriangleBatch {
    mesh_index: usize,
    triangles: Vec<Triangle>,
}

pub struct Renderer {
    framebuffer: FrameBuffer,
    meshes: MeshStore,
    camera: Camera,
    light: DirectionalLight,
    frustum: Frustum,
    projection: Mat4,
    render_mode: RenderMode,
    cull_backfaces: bool,
    show_depth: bool,
    checker_background: bool,
    batches: Vec<TriangleBatch>,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let fov_y = 60.0_f32.to_radians();
        let aspect = height as f32 / width as f32;
        let z_near = 0.1;
        let z_far = 100.0;

        let fov_x = horizontal_fov(fov_y, width, height);

        Self {
            framebuffer: FrameBuffer::new(width, height),
            meshes: MeshStore::new(),
            camera: Camera::new(Vec3::ZERO),
            light: DirectionalLight::new(Vec3::FORWARD),
            frustum: Frustum::new(fov_x, fov_y, z_near, z_far),
            projection: Mat4::perspective(fov_y, aspect, z_near, z_far),
            render_mode: RenderMode::default(),
            cull_backfaces: true,
            show_depth: false,
            checker_background: true,
            batches: Vec::new(),
        }
    }

    /// Load a mesh from disk into the scene.
    pub fn load_mesh(
        &mut self,
        obj_path: &str,
        png_path: &str,
        scale: Vec3,
        translation: Vec3,
        rotation: Vec3,
    ) -> Result<(), LoadError> {
        self.meshes
            .load_mesh(obj_path, png_path, scale, translation, rotation)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn meshes(&self) -> &MeshStore {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut MeshStore {
        &mut self.meshes
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn toggle_backface_culling(&mut self) {
        self.cull_backfaces = !self.cull_backfaces;
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.cull_backfaces = enabled;
    }

    pub fn backface_culling(&self) -> bool {
        self.cull_backfaces
    }

    pub fn toggle_depth_visualization(&mut self) {
        self.show_depth = !self.show_depth;
    }

    pub fn depth_visualization(&self) -> bool {
        self.show_depth
    }

    pub fn set_checker_background(&mut self, enabled: bool) {
        self.checker_background = enabled;
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// The color buffer as bytes for the presentation layer.
    pub fn frame_bytes(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    /// Transform, cull, clip, and project every mesh face, rebuilding
    /// the frame's triangle queue.
    pub fn update(&mut self) {
        self.camera.update_direction();
        let target = self.camera.position() + self.camera.direction();
        let view = Mat4::look_at(self.camera.position(), target, Vec3::UP);

        let half_width = self.framebuffer.width() as f32 / 2.0;
        let half_height = self.framebuffer.height() as f32 / 2.0;

        self.batches.clear();

        for (mesh_index, mesh) in self.meshes.meshes().iter().enumerate() {
            let scale = mesh.scale();
            let rotation = mesh.rotation();
            let translation = mesh.translation();

            // Scale first, then Z/Y/X rotation, then translation
            let world = Mat4::translation(translation.x, translation.y, translation.z)
                * Mat4::rotation_x(rotation.x)
                * Mat4::rotation_y(rotation.y)
                * Mat4::rotation_z(rotation.z)
                * Mat4::scaling(scale.x, scale.y, scale.z);

            let mut triangles = Vec::new();

            for face in mesh.faces() {
                let face_vertices = [
                    mesh.vertices()[face.a as usize],
                    mesh.vertices()[face.b as usize],
                    mesh.vertices()[face.c as usize],
                ];

                // Model space -> world space -> view space
                let transformed =
                    face_vertices.map(|v| (view * (world * Vec4::from_vec3(v))).to_vec3());
                let [a, b, c] = transformed;

                // Face normal from the two edges leaving vertex a;
                // clockwise winding faces the camera
                let normal = (b - a).normalize().cross((c - a).normalize());
                let normal_length = normal.magnitude();
                if normal_length == 0.0 || normal_length.is_nan() {
                    continue;
                }
                let normal = normal / normal_length;

                // The camera sits at the view-space origin
                if self.cull_backfaces && normal.dot(-a) < 0.0 {
                    continue;
                }

                let mut polygon = ClipPolygon::from_triangle(
                    PolyVertex::new(a, face.a_uv),
                    PolyVertex::new(b, face.b_uv),
                    PolyVertex::new(c, face.c_uv),
                );
                self.frustum.clip_polygon(&mut polygon);

                let color = apply_intensity(face.color, self.light.intensity(normal));

                for corners in polygon.triangulate() {
                    if triangles.len() >= MAX_TRIANGLES_PER_MESH {
                        break;
                    }

                    let points = corners.map(|corner| {
                        let mut p = self
                            .projection
                            .mul_vec4_project(Vec4::from_vec3(corner.position));
                        // NDC -> viewport: scale to half the screen,
                        // flip y (screen y grows downward), recenter
                        p.x *= half_width;
                        p.y *= -half_height;
                        p.x += half_width;
                        p.y += half_height;
                        p
                    });

                    triangles.push(Triangle::new(
                        points,
                        [corners[0].uv, corners[1].uv, corners[2].uv],
                        color,
                    ));
                }
            }

            self.batches.push(TriangleBatch {
                mesh_index,
                triangles,
            });
        }
    }

    /// Scan convert the queued triangles into the frame buffer.
    pub fn render(&mut self) {
        self.framebuffer.clear_color(colors::BACKGROUND);
        self.framebuffer.clear_depth();

        if self.checker_background {
            self.framebuffer.draw_checker(CHECKER_TILE_SIZE);
        }

        for batch in &self.batches {
            let mesh = self.meshes.get_mesh(batch.mesh_index);

            for triangle in &batch.triangles {
                if self.render_mode.contains(RenderMode::SOLID) {
                    rasterizer::draw_filled_triangle(&mut self.framebuffer, triangle);
                }
                if self.render_mode.contains(RenderMode::TEXTURE) {
                    if let Some(mesh) = mesh {
                        rasterizer::draw_textured_triangle(
                            &mut self.framebuffer,
                            triangle,
                            mesh.texture(),
                        );
                    }
                }
                if self.render_mode.contains(RenderMode::WIRE) {
                    rasterizer::draw_wireframe_triangle(
                        &mut self.framebuffer,
                        triangle,
                        colors::WIREFRAME,
                    );
                }
                if self.render_mode.contains(RenderMode::DOT) {
                    rasterizer::draw_vertex_markers(
                        &mut self.framebuffer,
                        triangle,
                        colors::VERTEX_MARKER,
                    );
                }
            }
        }

        if self.show_depth {
            self.framebuffer.depth_to_visual_image();
        }
    }

    #[cfg(test)]
    pub(crate) fn queued_triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.batches.iter().flat_map(|b| b.triangles.iter())
    }
}

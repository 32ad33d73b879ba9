//! Mesh representation and asset loading.
//!
//! A [`Mesh`] owns its vertices, faces, texture, and transform. Meshes
//! are collected in a fixed-capacity [`MeshStore`] and loaded from an
//! OBJ file (via the `tobj` crate) paired with a texture image (via the
//! `image` crate).

use std::fmt;

use crate::colors;
use crate::math::Vec3;
use crate::texture::{Tex2, Texture};

/// Most meshes the store will hold at once.
pub const MAX_MESHES: usize = 10;

/// A triangle face: three 0-based indices into the owning mesh's vertex
/// array, per-corner texture coordinates, and a base color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub a_uv: Tex2,
    pub b_uv: Tex2,
    pub c_uv: Tex2,
    pub color: u32,
}

#[derive(Debug)]
pub enum LoadError {
    Obj(tobj::LoadError),
    Image(image::ImageError),
    NoModels,
    StoreFull,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed to load OBJ: {}", e),
            LoadError::Image(e) => write!(f, "failed to load texture: {}", e),
            LoadError::NoModels => write!(f, "OBJ file contains no models"),
            LoadError::StoreFull => write!(f, "mesh store is full ({} meshes)", MAX_MESHES),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}

pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    texture: Texture,
    scale: Vec3,
    rotation: Vec3,
    translation: Vec3,
}

impl Mesh {
    pub(crate) fn new(
        vertices: Vec<Vec3>,
        faces: Vec<Face>,
        texture: Texture,
        scale: Vec3,
        rotation: Vec3,
        translation: Vec3,
    ) -> Self {
        Self {
            vertices,
            faces,
            texture,
            scale,
            rotation,
            translation,
        }
    }

    /// Load geometry from an OBJ file and its texture from an image file.
    ///
    /// The OBJ reader accepts all four `f` directive forms (`a b c`,
    /// `a/ta ...`, `a/ta/na ...`, `a//na ...`); faces keep independent
    /// vertex and UV indices, normals are not retained, and faces
    /// without UVs fall back to (0, 0).
    pub fn from_files(obj_path: &str, png_path: &str) -> Result<Self, LoadError> {
        let load_options = tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(obj_path, &load_options)?;
        let model = models.into_iter().next().ok_or(LoadError::NoModels)?;
        let mesh = model.mesh;

        let vertices: Vec<Vec3> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();

        let texcoords: Vec<Tex2> = mesh
            .texcoords
            .chunks_exact(2)
            .map(|t| Tex2::new(t[0], t[1]))
            .collect();

        let uv_at = |face: usize, corner: usize| -> Tex2 {
            mesh.texcoord_indices
                .get(face * 3 + corner)
                .and_then(|&i| texcoords.get(i as usize))
                .copied()
                .unwrap_or(Tex2::ZERO)
        };

        let faces: Vec<Face> = mesh
            .indices
            .chunks_exact(3)
            .enumerate()
            .map(|(i, idx)| Face {
                a: idx[0],
                b: idx[1],
                c: idx[2],
                a_uv: uv_at(i, 0),
                b_uv: uv_at(i, 1),
                c_uv: uv_at(i, 2),
                color: colors::WHITE,
            })
            .collect();

        let texture = Texture::from_file(png_path)?;

        Ok(Self::new(
            vertices,
            faces,
            texture,
            Vec3::ONE,
            Vec3::ZERO,
            Vec3::ZERO,
        ))
    }

    pub(crate) fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub(crate) fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn scale_mut(&mut self) -> &mut Vec3 {
        &mut self.scale
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut Vec3 {
        &mut self.rotation
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn translation_mut(&mut self) -> &mut Vec3 {
        &mut self.translation
    }
}

/// The scene's meshes, at most [`MAX_MESHES`] of them.
#[derive(Default)]
pub struct MeshStore {
    meshes: Vec<Mesh>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self { meshes: Vec::new() }
    }

    /// Load a mesh from disk and append it with the given transform.
    pub fn load_mesh(
        &mut self,
        obj_path: &str,
        png_path: &str,
        scale: Vec3,
        translation: Vec3,
        rotation: Vec3,
    ) -> Result<(), LoadError> {
        if self.meshes.len() >= MAX_MESHES {
            return Err(LoadError::StoreFull);
        }
        let mut mesh = Mesh::from_files(obj_path, png_path)?;
        mesh.scale = scale;
        mesh.translation = translation;
        mesh.rotation = rotation;
        self.meshes.push(mesh);
        Ok(())
    }

    pub(crate) fn push(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn get_mesh(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn get_mesh_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.meshes.get_mut(index)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn write_temp_png(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn loads_obj_with_uv_indices() {
        let obj = write_temp(
            "rastrum_quad.obj",
            "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 1.0 1.0 0.0\nv 0.0 1.0 0.0\n\
             vt 0.0 0.0\nvt 1.0 0.0\nvt 1.0 1.0\nvt 0.0 1.0\n\
             f 1/1 2/2 3/3\nf 1/1 3/3 4/4\n",
        );
        let png = write_temp_png("rastrum_quad.png");

        let mesh = Mesh::from_files(obj.to_str().unwrap(), png.to_str().unwrap()).unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.faces().len(), 2);

        let first = mesh.faces()[0];
        assert_eq!((first.a, first.b, first.c), (0, 1, 2));
        assert_relative_eq!(first.b_uv.u, 1.0);
        assert_relative_eq!(first.b_uv.v, 0.0);
        assert_eq!(first.color, colors::WHITE);
    }

    #[test]
    fn faces_without_uvs_default_to_origin() {
        let obj = write_temp(
            "rastrum_plain.obj",
            "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n",
        );
        let png = write_temp_png("rastrum_plain.png");

        let mesh = Mesh::from_files(obj.to_str().unwrap(), png.to_str().unwrap()).unwrap();
        let face = mesh.faces()[0];
        assert_eq!(face.a_uv, Tex2::ZERO);
        assert_eq!(face.c_uv, Tex2::ZERO);
    }

    #[test]
    fn normal_only_faces_parse() {
        let obj = write_temp(
            "rastrum_normals.obj",
            "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\n\
             vn 0.0 0.0 1.0\nf 1//1 2//1 3//1\n",
        );
        let png = write_temp_png("rastrum_normals.png");

        let mesh = Mesh::from_files(obj.to_str().unwrap(), png.to_str().unwrap()).unwrap();
        assert_eq!(mesh.faces().len(), 1);
        assert_eq!(mesh.faces()[0].a_uv, Tex2::ZERO);
    }

    #[test]
    fn missing_file_reports_error() {
        let png = write_temp_png("rastrum_missing.png");
        let result = Mesh::from_files("/nonexistent/model.obj", png.to_str().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn store_rejects_mesh_beyond_capacity() {
        let obj = write_temp(
            "rastrum_tiny.obj",
            "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n",
        );
        let png = write_temp_png("rastrum_tiny.png");
        let obj_path = obj.to_str().unwrap();
        let png_path = png.to_str().unwrap();

        let mut store = MeshStore::new();
        for _ in 0..MAX_MESHES {
            store
                .load_mesh(obj_path, png_path, Vec3::ONE, Vec3::ZERO, Vec3::ZERO)
                .unwrap();
        }
        assert_eq!(store.num_meshes(), MAX_MESHES);
        assert!(matches!(
            store.load_mesh(obj_path, png_path, Vec3::ONE, Vec3::ZERO, Vec3::ZERO),
            Err(LoadError::StoreFull)
        ));
    }
}

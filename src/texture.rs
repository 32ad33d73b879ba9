//! Texture coordinates and decoded RGBA textures.

use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tex2 {
    pub u: f32,
    pub v: f32,
}

impl Tex2 {
    pub const ZERO: Self = Self { u: 0.0, v: 0.0 };

    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            u: self.u + t * (other.u - self.u),
            v: self.v + t * (other.v - self.v),
        }
    }
}

/// A decoded image: width × height packed-RGBA texels, row-major.
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<u32>,
}

impl Texture {
    /// Decode an image file (PNG or anything else the decoder accepts)
    /// into packed RGBA texels.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let texels: Vec<u32> = img
            .pixels()
            .map(|p| u32::from_le_bytes(p.0))
            .collect();

        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Build a texture from raw packed-RGBA texels (procedural patterns,
    /// tests, benchmarks).
    pub fn from_texels(width: u32, height: u32, texels: Vec<u32>) -> Self {
        debug_assert_eq!(texels.len(), (width * height) as usize);
        Self {
            width,
            height,
            texels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest texel for a UV pair. Coordinates map to texel indices by
    /// truncation with the sign dropped; the flat index wraps modulo the
    /// texel count, so UVs outside [0, 1] repeat instead of overflowing.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let tex_x = ((u * self.width as f32) as i64).abs();
        let tex_y = ((v * self.height as f32) as i64).abs();

        let index = tex_y * self.width as i64 + tex_x;
        self.texels[(index % self.texels.len() as i64) as usize]
    }
}

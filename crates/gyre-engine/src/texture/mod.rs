//! Texture decode + upload.
//!
//! The textured-cube driver feeds a decoded [`BmpImage`] through
//! [`Texture::from_bmp`]; everything else only ever sees the bound handle.

pub mod bmp;

use anyhow::{anyhow, Result};
use glow::HasContext;

pub use bmp::{decode as decode_bmp, BmpError, BmpImage};

/// A GPU texture handle.
pub struct Texture {
    raw: glow::NativeTexture,
}

impl Texture {
    /// Uploads a decoded 24-bpp BMP as an RGB texture.
    ///
    /// Sampling state matches the demos: repeat wrap, linear mag filter,
    /// trilinear min filter with generated mipmaps. The image's BGR byte
    /// order is handled by the upload format, not by swizzling on the CPU.
    pub fn from_bmp(gl: &glow::Context, image: &BmpImage) -> Result<Texture> {
        unsafe {
            let raw = gl.create_texture().map_err(|e| anyhow!("create texture: {e}"))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGB as i32,
                image.width as i32,
                image.height as i32,
                0,
                glow::BGR,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(&image.pixels)),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.generate_mipmap(glow::TEXTURE_2D);

            Ok(Texture { raw })
        }
    }

    /// Binds the texture to the given texture unit.
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.raw));
        }
    }

    /// Deletes the underlying GL object. The value must not be used
    /// afterwards.
    pub fn destroy(self, gl: &glow::Context) {
        unsafe { gl.delete_texture(self.raw) };
    }
}

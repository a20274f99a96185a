//! Texture decoding and GPU upload.
//!
//! Images are decoded once at startup. The channel count of the source
//! image selects the pixel format: 3 channels are RGB, 4 are RGBA,
//! anything else is rejected. RGB data is widened to RGBA at upload since
//! wgpu has no 3-channel sampled format. A failed load is not fatal: the
//! renderer substitutes a 1x1 fallback and keeps drawing.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported channel count: {0}")]
    UnsupportedChannelCount(u8),
    #[error("pixel buffer length does not match dimensions")]
    SizeMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn from_channels(channels: u8) -> Result<Self, TextureError> {
        match channels {
            3 => Ok(PixelFormat::Rgb),
            4 => Ok(PixelFormat::Rgba),
            other => Err(TextureError::UnsupportedChannelCount(other)),
        }
    }

    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Raw pixel data plus the format the channel count selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Decodes an image file and flips it vertically so row zero is the
    /// bottom of the image, matching the scene's texture coordinates.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let img = image::open(path)?;
        let format = PixelFormat::from_channels(img.color().channel_count())?;
        let img = img.flipv();
        let (width, height) = (img.width(), img.height());
        let pixels = match format {
            PixelFormat::Rgb => img.to_rgb8().into_raw(),
            PixelFormat::Rgba => img.to_rgba8().into_raw(),
        };
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Wraps an already-decoded pixel buffer.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, TextureError> {
        let format = PixelFormat::from_channels(channels)?;
        if pixels.len() != width as usize * height as usize * format.channels() {
            return Err(TextureError::SizeMismatch);
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// A 1x1 stand-in used when a texture file is missing or undecodable.
    pub fn solid_color(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            format: PixelFormat::Rgba,
            pixels: rgba.to_vec(),
        }
    }

    /// Consumes the image and yields tightly packed RGBA bytes, widening
    /// RGB pixels with an opaque alpha.
    pub fn into_rgba(self) -> Vec<u8> {
        match self.format {
            PixelFormat::Rgba => self.pixels,
            PixelFormat::Rgb => {
                let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
                for rgb in self.pixels.chunks_exact(3) {
                    out.extend_from_slice(rgb);
                    out.push(u8::MAX);
                }
                out
            }
        }
    }
}

pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    /// Uploads a decoded image as an RGBA8 sRGB texture.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: DecodedImage,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let width = image.width;
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.into_rgba(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: None,
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_channels_select_rgba() {
        let img = DecodedImage::from_raw(2, 1, 4, vec![0; 8]).unwrap();
        assert_eq!(img.format, PixelFormat::Rgba);
    }

    #[test]
    fn three_channels_select_rgb() {
        let img = DecodedImage::from_raw(2, 1, 3, vec![0; 6]).unwrap();
        assert_eq!(img.format, PixelFormat::Rgb);
    }

    #[test]
    fn odd_channel_counts_are_rejected() {
        for channels in [0u8, 1, 2, 5] {
            assert!(matches!(
                PixelFormat::from_channels(channels),
                Err(TextureError::UnsupportedChannelCount(c)) if c == channels
            ));
        }
    }

    #[test]
    fn buffer_length_must_match_dimensions() {
        assert!(matches!(
            DecodedImage::from_raw(2, 2, 4, vec![0; 15]),
            Err(TextureError::SizeMismatch)
        ));
    }

    #[test]
    fn rgb_widens_to_opaque_rgba() {
        let img = DecodedImage::from_raw(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.into_rgba(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn rgba_passes_through_unchanged() {
        let pixels = vec![9, 8, 7, 6];
        let img = DecodedImage::from_raw(1, 1, 4, pixels.clone()).unwrap();
        assert_eq!(img.into_rgba(), pixels);
    }

    #[test]
    fn fallback_is_a_single_rgba_pixel() {
        let img = DecodedImage::solid_color([255, 0, 255, 255]);
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.format, PixelFormat::Rgba);
        assert_eq!(img.pixels.len(), 4);
    }

    #[test]
    fn missing_file_reports_decode_error() {
        let err = DecodedImage::open("no/such/texture.png").unwrap_err();
        assert!(matches!(err, TextureError::Decode(_)));
    }
}

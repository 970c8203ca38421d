//! A single row of pixels sampled by the colour image affector

use cinder_core::{CinderError, Color, Result};
use image::DynamicImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8,
    Bgr8,
    /// Any layout the affector cannot decode, named for error reporting
    Unsupported(String),
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::Bgr8 => 3,
            PixelFormat::Unsupported(_) => 0,
        }
    }
}

/// The first row of an image, in its native channel order
#[derive(Debug, Clone, PartialEq)]
pub struct PixelRow {
    pub format: PixelFormat,
    pub width: usize,
    pub data: Vec<u8>,
}

impl PixelRow {
    pub fn new(format: PixelFormat, width: usize, data: Vec<u8>) -> Self {
        Self {
            format,
            width,
            data,
        }
    }

    /// Take the top row of a decoded image. RGB images are stored BGR so the
    /// affector sees the same byte order as legacy BGR8 textures.
    pub fn from_image(img: &DynamicImage) -> Self {
        let width = img.width() as usize;
        match img {
            DynamicImage::ImageRgba8(buf) => {
                let data = buf.as_raw().iter().take(width * 4).copied().collect();
                Self::new(PixelFormat::Rgba8, width, data)
            }
            DynamicImage::ImageRgb8(buf) => {
                let data = buf
                    .as_raw()
                    .chunks_exact(3)
                    .take(width)
                    .flat_map(|px| [px[2], px[1], px[0]])
                    .collect();
                Self::new(PixelFormat::Bgr8, width, data)
            }
            other => Self::new(
                PixelFormat::Unsupported(format!("{:?}", other.color())),
                width,
                Vec::new(),
            ),
        }
    }

    /// Colour of pixel `x`. Fails on undecodable formats or a short buffer.
    pub fn colour_at(&self, x: usize) -> Result<Color> {
        let stride = self.format.bytes_per_pixel();
        if stride == 0 {
            if let PixelFormat::Unsupported(name) = &self.format {
                return Err(CinderError::UnsupportedFormat(name.clone()));
            }
        }
        let start = x * stride;
        let px = self.data.get(start..start + stride).ok_or_else(|| {
            CinderError::UnsupportedFormat(format!(
                "pixel {x} outside a {} byte row",
                self.data.len()
            ))
        })?;
        let channel = |v: u8| f32::from(v) / 255.0;
        Ok(match self.format {
            PixelFormat::Rgba8 => Color::new(
                channel(px[0]),
                channel(px[1]),
                channel(px[2]),
                channel(px[3]),
            ),
            _ => Color::new(channel(px[2]), channel(px[1]), channel(px[0]), 1.0),
        })
    }
}

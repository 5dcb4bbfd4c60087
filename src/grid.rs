//! Read-only pixel grid and the vertical ink sampler.

use image::DynamicImage;

/// Decoded 8-bit pixels in their native channel layout.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Keep L8/La8/Rgb8/Rgba8 as-is; everything else is narrowed to 8 bits.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (channels, data) = match image {
            DynamicImage::ImageLuma8(buf) => (1, buf.as_raw().clone()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.as_raw().clone()),
            DynamicImage::ImageRgb8(buf) => (3, buf.as_raw().clone()),
            DynamicImage::ImageRgba8(buf) => (4, buf.as_raw().clone()),
            other if other.color().has_alpha() => (4, other.to_rgba8().into_raw()),
            other => (3, other.to_rgb8().into_raw()),
        };
        Self { width, height, channels, data }
    }

    /// Wrap an interleaved buffer of `channels` (1..=4) bytes per pixel.
    pub fn from_raw(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(channels)?;
        if !(1..=4).contains(&channels) || data.len() != expected {
            return None;
        }
        Some(Self { width, height, channels, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Truncated mean of the channel values, `None` outside the grid.
    pub fn grey(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        let sum: u32 = self.data[start..start + self.channels].iter().map(|&v| v as u32).sum();
        Some((sum / self.channels as u32) as u8)
    }
}

/// Sum of `255 - grey` over rows `y - half_window .. y + half_window` at column `x`.
///
/// Rows outside the grid contribute zero.
pub fn sample_inverted_intensity(grid: &PixelGrid, x: u32, y: i64, half_window: u32) -> u64 {
    let half = half_window as i64;
    (-half..half)
        .filter_map(|i| grid.grey(x as i64, y + i))
        .map(|grey| 255 - grey as u64)
        .sum()
}

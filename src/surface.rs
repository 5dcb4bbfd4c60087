//! White canvas the traced curves are stroked onto.

use crate::tracer::Curve;
use crate::Result;
use image::{
    ColorType, DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, ImageFormat, Luma, LumaA,
    Rgb, Rgb32FImage, RgbImage, Rgba, Rgba32FImage, RgbaImage,
};
use imageproc::drawing::draw_cubic_bezier_curve_mut;
use std::io::Cursor;
use tracing::debug;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const WHITE16: u16 = u16::MAX;
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct OutputSurface {
    image: DynamicImage,
}

impl OutputSurface {
    /// A white image with the given size and colour type.
    pub fn blank(width: u32, height: u32, color: ColorType) -> Self {
        debug!(width, height, ?color, "Creating output surface");
        let (w, h) = (width, height);
        let image = match color {
            ColorType::L8 => DynamicImage::ImageLuma8(GrayImage::from_pixel(w, h, Luma([255]))),
            ColorType::La8 => {
                DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(w, h, LumaA([255, 255])))
            }
            ColorType::Rgb8 => DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([255; 3]))),
            ColorType::L16 => {
                DynamicImage::ImageLuma16(ImageBuffer::from_pixel(w, h, Luma([WHITE16])))
            }
            ColorType::La16 => {
                DynamicImage::ImageLumaA16(ImageBuffer::from_pixel(w, h, LumaA([WHITE16; 2])))
            }
            ColorType::Rgb16 => {
                DynamicImage::ImageRgb16(ImageBuffer::from_pixel(w, h, Rgb([WHITE16; 3])))
            }
            ColorType::Rgba16 => {
                DynamicImage::ImageRgba16(ImageBuffer::from_pixel(w, h, Rgba([WHITE16; 4])))
            }
            ColorType::Rgb32F => {
                DynamicImage::ImageRgb32F(Rgb32FImage::from_pixel(w, h, Rgb([1.0; 3])))
            }
            ColorType::Rgba32F => {
                DynamicImage::ImageRgba32F(Rgba32FImage::from_pixel(w, h, Rgba([1.0; 4])))
            }
            // Rgba8 and any colour type added later
            _ => DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, WHITE)),
        };
        Self { image }
    }

    /// Stroke `curve` in black, 1px, clipped to the surface.
    pub fn draw_curve(&mut self, curve: &Curve) {
        let [start, control_a, control_b, end] = curve.points();
        draw_cubic_bezier_curve_mut(&mut self.image, start, end, control_a, control_b, BLACK);
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Encode into `format`. JPEG has no alpha, so it always gets RGB8.
    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(self.image.to_rgb8()).write_to(&mut bytes, format)?,
            _ => self.image.write_to(&mut bytes, format)?,
        }
        Ok(bytes.into_inner())
    }
}

//! Raster image to line-art converter using scanline Bezier curves.

pub mod bands;
pub mod grid;
pub mod settings;
pub mod surface;
pub mod tracer;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use grid::{sample_inverted_intensity, PixelGrid};
pub use settings::Settings;
pub use surface::OutputSurface;
pub use tracer::{BandTrace, BandTracer, ControlPointWindow, Curve};

use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum InkcurveError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid settings: {0}")]
    Settings(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InkcurveError>;

/// Rendered surface plus the traces that produced it.
pub struct Sketch {
    pub surface: OutputSurface,
    pub bands: Vec<BandTrace>,
}

impl Sketch {
    pub fn curve_count(&self) -> usize {
        self.bands.iter().map(|b| b.curves.len()).sum()
    }

    pub fn summary(&self) -> Summary {
        let image = self.surface.image();
        Summary {
            width: image.width(),
            height: image.height(),
            bands: self.bands.len(),
            control_points: self.bands.iter().map(|b| b.control_points.len()).sum(),
            curves: self.curve_count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub width: u32,
    pub height: u32,
    pub bands: usize,
    pub control_points: usize,
    pub curves: usize,
}

/// Main converter
pub struct Converter {
    settings: Settings,
    parallel: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self { settings: Settings::default(), parallel: false }
    }
}

impl Converter {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings, parallel: false })
    }

    pub fn with_offset(mut self, offset: u32) -> Result<Self> {
        self.settings.offset = offset;
        self.settings.validate()?;
        Ok(self)
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.settings.threshold = threshold;
        self
    }

    /// Trace bands on the rayon pool (native targets only).
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn trace(&self, image: &DynamicImage) -> Vec<BandTrace> {
        let grid = PixelGrid::from_image(image);
        bands::trace_bands(&grid, &self.settings, self.parallel)
    }

    /// Trace `image` and stroke every curve onto a fresh white surface.
    pub fn render(&self, image: &DynamicImage) -> Sketch {
        let bands = self.trace(image);
        let mut surface = OutputSurface::blank(image.width(), image.height(), image.color());
        for curve in bands.iter().flat_map(|b| &b.curves) {
            surface.draw_curve(curve);
        }
        Sketch { surface, bands }
    }

    /// Decode `input`, render, and encode as `format`.
    pub fn convert_bytes(&self, input: &[u8], format: ImageFormat) -> Result<(Vec<u8>, Sketch)> {
        let image = image::load_from_memory(input)?;
        let sketch = self.render(&image);
        let bytes = sketch.surface.encode(format)?;
        Ok((bytes, sketch))
    }

    /// Convert `input` to `output`, picking the format from the output
    /// extension and falling back to JPEG.
    ///
    /// Nothing is written unless decoding and encoding both succeed.
    pub fn convert_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Sketch> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let format = output_format(output);
        let (bytes, sketch) = self.convert_bytes(&std::fs::read(input)?, format)?;
        std::fs::write(output, bytes)?;

        let summary = sketch.summary();
        info!(
            input = %input.display(),
            output = %output.display(),
            ?format,
            bands = summary.bands,
            curves = summary.curves,
            "Converted image"
        );
        Ok(sketch)
    }
}

/// Format implied by `path`'s extension, JPEG when unknown.
pub fn output_format(path: &Path) -> ImageFormat {
    ImageFormat::from_path(path).unwrap_or(ImageFormat::Jpeg)
}

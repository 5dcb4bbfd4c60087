//! Band enumeration and driving the tracer over every band.

use crate::grid::PixelGrid;
use crate::settings::Settings;
use crate::tracer::{trace_band, BandTrace};
use tracing::debug;

/// `offset / 2`, then every `3 * offset / 4` rows while inside the image.
pub fn band_rows(height: u32, settings: &Settings) -> impl Iterator<Item = u32> {
    let spacing = settings.band_spacing().max(1);
    (settings.half_window()..height).step_by(spacing as usize)
}

/// Trace all bands in increasing `y`.
///
/// With `parallel`, bands are traced on the rayon pool into separate buffers;
/// the result is identical to the sequential pass.
pub fn trace_bands(grid: &PixelGrid, settings: &Settings, parallel: bool) -> Vec<BandTrace> {
    let rows: Vec<u32> = band_rows(grid.height(), settings).collect();
    debug!(bands = rows.len(), parallel, "Tracing bands");

    if parallel {
        trace_rows_parallel(grid, rows, settings)
    } else {
        rows.into_iter().map(|y| trace_band(grid, y, *settings)).collect()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn trace_rows_parallel(grid: &PixelGrid, rows: Vec<u32>, settings: &Settings) -> Vec<BandTrace> {
    use rayon::prelude::*;
    rows.into_par_iter().map(|y| trace_band(grid, y, *settings)).collect()
}

// No thread pool in the browser.
#[cfg(target_arch = "wasm32")]
fn trace_rows_parallel(grid: &PixelGrid, rows: Vec<u32>, settings: &Settings) -> Vec<BandTrace> {
    rows.into_iter().map(|y| trace_band(grid, y, *settings)).collect()
}

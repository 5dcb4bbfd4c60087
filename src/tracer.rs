//! Per-band curve tracing.
//!
//! A band is scanned left to right. Inverted intensity is accumulated until it
//! exceeds the threshold, at which point the column becomes a control point.
//! Every fourth point closes a cubic curve; the last point seeds the next one.

use crate::grid::{sample_inverted_intensity, PixelGrid};
use crate::settings::Settings;
use serde::Serialize;

const WINDOW: usize = 4;

/// Ring buffer holding at most four control point columns.
#[derive(Debug, Clone)]
pub struct ControlPointWindow {
    slots: [u32; WINDOW],
    head: usize,
    len: usize,
}

impl ControlPointWindow {
    /// A window seeded with the synthetic start point `x = 0`.
    pub fn seeded() -> Self {
        Self { slots: [0; WINDOW], head: 0, len: 1 }
    }

    /// Never below 1: the newest point always stays as the next start.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Append `x`. When the window fills up, return the four points in order
    /// and drop the oldest three, keeping the newest as the next start.
    pub fn push(&mut self, x: u32) -> Option<[u32; WINDOW]> {
        self.slots[(self.head + self.len) % WINDOW] = x;
        self.len += 1;
        if self.len < WINDOW {
            return None;
        }
        let points = std::array::from_fn(|i| self.slots[(self.head + i) % WINDOW]);
        self.head = (self.head + WINDOW - 1) % WINDOW;
        self.len = 1;
        Some(points)
    }
}

/// Cubic Bezier whose interior control points bulge `offset` below and above the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Curve {
    pub x: [u32; 4],
    pub y: u32,
    pub offset: u32,
}

impl Curve {
    /// `(x0, y)`, `(x1, y + offset)`, `(x2, y - offset)`, `(x3, y)`.
    pub fn points(&self) -> [(f32, f32); 4] {
        let y = self.y as f32;
        let bulge = self.offset as f32;
        [
            (self.x[0] as f32, y),
            (self.x[1] as f32, y + bulge),
            (self.x[2] as f32, y - bulge),
            (self.x[3] as f32, y),
        ]
    }

    pub fn start(&self) -> u32 {
        self.x[0]
    }

    pub fn end(&self) -> u32 {
        self.x[3]
    }
}

/// Everything one band produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandTrace {
    pub y: u32,
    /// Registered crossings in scan order; the synthetic seed is not listed.
    pub control_points: Vec<u32>,
    pub curves: Vec<Curve>,
}

/// Column-by-column state machine for a single band.
pub struct BandTracer<'a> {
    grid: &'a PixelGrid,
    settings: Settings,
    y: u32,
    accumulator: u64,
    window: ControlPointWindow,
    trace: BandTrace,
}

impl<'a> BandTracer<'a> {
    pub fn new(grid: &'a PixelGrid, y: u32, settings: Settings) -> Self {
        Self {
            grid,
            settings,
            y,
            accumulator: 0,
            window: ControlPointWindow::seeded(),
            trace: BandTrace { y, control_points: Vec::new(), curves: Vec::new() },
        }
    }

    pub fn accumulator(&self) -> u64 {
        self.accumulator
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Process column `x`, returning the curve it completed, if any.
    pub fn step(&mut self, x: u32) -> Option<Curve> {
        self.accumulator +=
            sample_inverted_intensity(self.grid, x, self.y as i64, self.settings.half_window());
        if self.accumulator <= self.settings.threshold {
            return None;
        }
        self.accumulator = 0;
        self.trace.control_points.push(x);
        let curve = Curve { x: self.window.push(x)?, y: self.y, offset: self.settings.offset };
        self.trace.curves.push(curve);
        Some(curve)
    }

    /// Scan every column. A trailing window with fewer than four points is dropped.
    pub fn run(mut self) -> BandTrace {
        for x in 0..self.grid.width() {
            self.step(x);
        }
        self.trace
    }
}

pub fn trace_band(grid: &PixelGrid, y: u32, settings: Settings) -> BandTrace {
    BandTracer::new(grid, y, settings).run()
}

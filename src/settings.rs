//! Construction-time tuning: band offset and crossing threshold.

use crate::{InkcurveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OFFSET: u32 = 30;
pub const DEFAULT_THRESHOLD: u64 = 8000;
/// Largest offset whose derived spacing and window stay well inside `u32`.
pub const MAX_OFFSET: u32 = u32::MAX / 3;

/// Parameters shared by every band of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Band spacing (`3 * offset / 4`), sampling window height and curve bulge.
    pub offset: u32,
    /// Accumulated inverted intensity that must be exceeded to register a point.
    pub threshold: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self { offset: DEFAULT_OFFSET, threshold: DEFAULT_THRESHOLD }
    }
}

impl Settings {
    pub fn new(offset: u32, threshold: u64) -> Result<Self> {
        let settings = Self { offset, threshold };
        settings.validate()?;
        Ok(settings)
    }

    /// Load a JSON preset. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Offsets below 2 give a band spacing of zero.
    pub fn validate(&self) -> Result<()> {
        if self.band_spacing() == 0 {
            return Err(InkcurveError::Settings(format!(
                "offset must be at least 2, got {}",
                self.offset
            )));
        }
        if self.offset > MAX_OFFSET {
            return Err(InkcurveError::Settings(format!(
                "offset must be at most {}, got {}",
                MAX_OFFSET, self.offset
            )));
        }
        Ok(())
    }

    /// Vertical distance between consecutive bands.
    pub fn band_spacing(&self) -> u32 {
        (3 * self.offset as u64 / 4) as u32
    }

    /// Half height of the vertical sampling window.
    pub fn half_window(&self) -> u32 {
        self.offset / 2
    }
}

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};

/// Rectangular structuring element dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSize {
    pub width: u32,
    pub height: u32,
}

impl KernelSize {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }
}

/// Tunable parameters for the region-detection pipeline.
///
/// Defaults match a dense handwritten exam sheet scanned at roughly 150 dpi;
/// sparser templates usually only need a wider `line_merge_kernel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Intensity delta (0-255) above which a pixel counts as handwriting
    pub diff_threshold: u8,

    /// Gaussian smoothing applied to both images before comparison
    pub blur_sigma: f32,

    /// Structuring element for the noise-removing closing pass
    pub close_kernel: KernelSize,

    /// How often the closing pass is repeated
    pub close_iterations: u32,

    /// Wide, short element that merges words on the same line into one region
    pub line_merge_kernel: KernelSize,

    /// Bounding boxes with area (w*h) at or below this are discarded as noise
    pub min_region_area: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            diff_threshold: 30,
            blur_sigma: 1.1,
            close_kernel: KernelSize::square(7),
            close_iterations: 2,
            line_merge_kernel: KernelSize {
                width: 100,
                height: 5,
            },
            min_region_area: 100,
        }
    }
}

impl DetectionConfig {
    /// Load a configuration from a JSON file and validate it.
    ///
    /// Missing fields fall back to their defaults, so a file may override
    /// only the parameters that differ for a given template.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.diff_threshold == 0 {
            return Err(invalid("diff_threshold", self.diff_threshold));
        }
        if self.blur_sigma <= 0.0 || !self.blur_sigma.is_finite() {
            return Err(invalid("blur_sigma", self.blur_sigma));
        }
        if self.close_kernel.width == 0 || self.close_kernel.height == 0 {
            return Err(invalid(
                "close_kernel",
                format!("{}x{}", self.close_kernel.width, self.close_kernel.height),
            ));
        }
        if self.close_iterations == 0 {
            return Err(invalid("close_iterations", self.close_iterations));
        }
        if self.line_merge_kernel.width == 0 || self.line_merge_kernel.height == 0 {
            return Err(invalid(
                "line_merge_kernel",
                format!(
                    "{}x{}",
                    self.line_merge_kernel.width, self.line_merge_kernel.height
                ),
            ));
        }
        if self.min_region_area == 0 {
            return Err(invalid("min_region_area", self.min_region_area));
        }
        Ok(())
    }
}

fn invalid(parameter: &'static str, value: impl ToString) -> DetectError {
    DetectError::InvalidConfig {
        parameter,
        value: value.to_string(),
    }
}

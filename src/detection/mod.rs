pub mod annotate;
pub mod diff;
pub mod morphology;
pub mod preprocessing;
pub mod regions;

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};
use tracing::debug;

use crate::config::DetectionConfig;
use crate::error::{DetectError, Result};
use crate::models::Region;

/// Regions detected on one candidate sheet, ordered top to bottom, together
/// with the normalized image their coordinates refer to.
#[derive(Debug, Clone)]
pub struct SheetRegions {
    pub normalized: RgbImage,
    pub regions: Vec<Region>,
}

impl SheetRegions {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Compares filled sheets against a blank template and extracts the regions
/// that contain handwriting.
///
/// The reference is normalized once at construction and stays read-only for
/// the detector's lifetime, so a single detector serves a whole batch without
/// re-smoothing the template per candidate.
#[derive(Debug)]
pub struct RegionDetector {
    config: DetectionConfig,
    reference: GrayImage,
}

impl RegionDetector {
    /// Build a detector from an already decoded reference image.
    pub fn new(reference: &DynamicImage, config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        let gray = preprocessing::to_grayscale(reference);
        let reference = preprocessing::smooth(&gray, config.blur_sigma);
        Ok(Self { config, reference })
    }

    /// Build a detector by loading the reference from disk. A load failure
    /// here is fatal for the batch: without a usable template there is
    /// nothing to compare against.
    pub fn from_reference_path(path: &Path, config: DetectionConfig) -> Result<Self> {
        let img = preprocessing::load_image(path).map_err(|source| DetectError::ReferenceLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(&img, config)
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Width and height every candidate is normalized to.
    pub fn reference_dimensions(&self) -> (u32, u32) {
        self.reference.dimensions()
    }

    /// Run the four-stage pipeline on one candidate image.
    ///
    /// Normalize to the reference geometry, take the thresholded absolute
    /// difference, merge it into line-level blobs, and extract ordered
    /// bounding boxes. Deterministic for identical inputs and configuration.
    pub fn detect(&self, candidate: &DynamicImage) -> Result<SheetRegions> {
        let (width, height) = self.reference.dimensions();

        let normalized = preprocessing::normalize_size(candidate, width, height);
        let gray = preprocessing::smooth(
            &image::imageops::grayscale(&normalized),
            self.config.blur_sigma,
        );

        let difference = diff::abs_diff(&self.reference, &gray)?;
        let mask = diff::binarize(&difference, self.config.diff_threshold);

        let closed = morphology::close(&mask, self.config.close_kernel, self.config.close_iterations);
        let merged = morphology::dilate(&closed, self.config.line_merge_kernel);

        let regions = regions::extract_regions(&merged, self.config.min_region_area);
        debug!(regions = regions.len(), "candidate processed");

        Ok(SheetRegions {
            normalized,
            regions,
        })
    }
}

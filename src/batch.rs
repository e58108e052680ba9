use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::detection::{RegionDetector, annotate, preprocessing};
use crate::error::{DetectError, Result};
use crate::export::SheetAnalysis;

/// Outcome of one candidate within a batch run. A pipeline that finds zero
/// regions still counts as processed; only failures are skips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOutcome {
    Processed {
        source: String,
        region_count: usize,
    },
    Skipped {
        source: String,
        reason: String,
    },
}

/// Per-item outcomes of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<SheetOutcome>,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SheetOutcome::Processed { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SheetOutcome::Skipped { .. }))
            .count()
    }

    /// Processed sheets on which no differences were detected.
    pub fn empty(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SheetOutcome::Processed { region_count: 0, .. }))
            .count()
    }
}

/// Runs the detection pipeline over a set of candidate sheets with
/// per-candidate failure isolation: a bad scan is skipped and reported, the
/// rest of the batch carries on.
pub struct BatchRunner {
    detector: RegionDetector,
    out_dir: PathBuf,
    annotate_dir: Option<PathBuf>,
}

impl BatchRunner {
    pub fn new(detector: RegionDetector, out_dir: PathBuf) -> Self {
        Self {
            detector,
            out_dir,
            annotate_dir: None,
        }
    }

    /// Also write an annotated preview per candidate into `dir`.
    pub fn with_annotate_dir(mut self, dir: PathBuf) -> Self {
        self.annotate_dir = Some(dir);
        self
    }

    pub fn detector(&self) -> &RegionDetector {
        &self.detector
    }

    /// Process every candidate in order. Only non-recoverable errors abort
    /// the run; everything else becomes a per-item outcome.
    pub fn run(&self, candidates: &[PathBuf]) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for path in candidates {
            let source = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unnamed")
                .to_string();

            match self.process_one(path, &source) {
                Ok(region_count) => {
                    info!(%source, region_count, "sheet processed");
                    summary.outcomes.push(SheetOutcome::Processed {
                        source,
                        region_count,
                    });
                }
                Err(err) if err.is_recoverable() => {
                    warn!(%source, error = %err, "skipping sheet");
                    summary.outcomes.push(SheetOutcome::Skipped {
                        source,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(summary)
    }

    fn process_one(&self, path: &Path, source: &str) -> Result<usize> {
        let img = preprocessing::load_image(path).map_err(|e| DetectError::CandidateLoad {
            path: path.to_path_buf(),
            source: e,
        })?;

        let sheet = self.detector.detect(&img)?;

        let record = SheetAnalysis::from_sheet(source, &sheet)?;
        record.write_json(&self.out_dir)?;

        if let Some(dir) = &self.annotate_dir {
            fs::create_dir_all(dir)?;
            let preview = annotate::draw_regions(&sheet.normalized, &sheet.regions);
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("sheet");
            preview
                .save(dir.join(format!("{stem}_regions.png")))
                .map_err(DetectError::ImageEncode)?;
        }

        Ok(sheet.regions.len())
    }
}

/// Collect candidate image paths (jpg/jpeg/png) from a directory,
/// lexicographically sorted so runs are reproducible.
pub fn discover_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        if matches!(ext.as_deref(), Some("jpg" | "jpeg" | "png")) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

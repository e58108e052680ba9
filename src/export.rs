use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::detection::SheetRegions;
use crate::error::{DetectError, Result};

/// The record handed to the text-recognition stage: the ordered regions and
/// the image bytes they are expressed in, one coordinate system, no implicit
/// external state. Written once per input and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetAnalysis {
    /// File name of the source scan
    pub source: String,
    /// Dimensions of the normalized candidate image
    pub width: u32,
    pub height: u32,
    /// Detected answer regions as `[x, y, w, h]`, top to bottom
    pub rois: Vec<[u32; 4]>,
    /// Normalized candidate re-encoded as JPEG, base64 (standard alphabet)
    pub image_base64: String,
}

impl SheetAnalysis {
    /// Package a detection result for transport to the recognizer.
    pub fn from_sheet(source: &str, sheet: &SheetRegions) -> Result<Self> {
        let mut jpeg = Vec::new();
        sheet
            .normalized
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .map_err(DetectError::ImageEncode)?;

        Ok(Self {
            source: source.to_string(),
            width: sheet.normalized.width(),
            height: sheet.normalized.height(),
            rois: sheet.regions.iter().map(|r| r.as_tuple()).collect(),
            image_base64: STANDARD.encode(&jpeg),
        })
    }

    /// Write the record as pretty JSON into `out_dir`, named after the source
    /// file's stem.
    pub fn write_json(&self, out_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(out_dir)?;
        let stem = Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sheet");
        let path = out_dir.join(format!("{stem}.json"));
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&path, data)?;
        Ok(path)
    }
}

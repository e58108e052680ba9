pub mod batch;
pub mod config;
pub mod detection;
pub mod error;
pub mod export;
pub mod models;

pub use batch::{BatchRunner, BatchSummary, SheetOutcome, discover_candidates};
pub use config::{DetectionConfig, KernelSize};
pub use detection::{RegionDetector, SheetRegions};
pub use error::{DetectError, Result};
pub use export::SheetAnalysis;
pub use models::Region;

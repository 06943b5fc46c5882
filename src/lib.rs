//! Keyword-filtered instance segmentation overlay.
//!
//! Run a segmentation model over one image, keep the detections whose class
//! label contains a keyword, and alpha-blend a highlight over their contours.

pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod overlay;
pub mod pipeline;

pub use detection::labels::LabelTable;
pub use detection::matcher::{filter_matches, matches, Keyword};
pub use detection::model::{PrecomputedModel, RawInstance, RawPrediction, SegmentationModel};
pub use detection::DetectionAdapter;
pub use error::{HighlightError, Result};
pub use models::{CompositedImage, Detection, DetectionSet, HighlightStyle, MatchSummary};
pub use overlay::{composite, rasterize, FillRegion, Span};
pub use pipeline::HighlightPipeline;

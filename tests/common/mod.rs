mod fixtures;
pub use fixtures::*;

// Re-export commonly used types for tests
pub use segment_highlight::{
    CompositedImage, DetectionAdapter, HighlightError, HighlightPipeline, HighlightStyle, LabelTable,
    RawInstance, RawPrediction, SegmentationModel,
};

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::{HighlightError, Result};

/// Raw output of a single segmentation inference call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// Width and height of the space the polygons are expressed in
    /// (usually the model's input resolution).
    pub source_size: [u32; 2],
    #[serde(default)]
    pub instances: Vec<RawInstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInstance {
    pub class_index: i64,
    #[serde(default)]
    pub confidence: f32,
    pub polygon: Vec<[f32; 2]>,
}

/// External instance segmentation model.
///
/// Implementations only run inference; label lookup, coordinate scaling and
/// validation are done by [`DetectionAdapter`](super::DetectionAdapter).
pub trait SegmentationModel: Send + Sync {
    fn infer(&self, image: &DynamicImage) -> anyhow::Result<RawPrediction>;

    /// Human-readable name for this model (used in logs and errors)
    fn name(&self) -> &str;
}

/// Replays segmentation output exported from an external detector.
#[derive(Debug, Clone)]
pub struct PrecomputedModel {
    name: String,
    prediction: RawPrediction,
}

impl PrecomputedModel {
    pub fn new(name: impl Into<String>, prediction: RawPrediction) -> Self {
        Self {
            name: name.into(),
            prediction,
        }
    }

    pub fn from_json_str(name: impl Into<String>, json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(name, serde_json::from_str(json)?))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let load_err = |reason: String| HighlightError::PredictionFile {
            path: path.to_path_buf(),
            reason,
        };

        let json = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let prediction: RawPrediction =
            serde_json::from_str(&json).map_err(|e| load_err(e.to_string()))?;

        Ok(Self::new(path.display().to_string(), prediction))
    }
}

impl SegmentationModel for PrecomputedModel {
    fn infer(&self, _image: &DynamicImage) -> anyhow::Result<RawPrediction> {
        Ok(self.prediction.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

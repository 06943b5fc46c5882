pub mod labels;
pub mod matcher;
pub mod model;

use image::DynamicImage;
use imageproc::point::Point;
use tracing::{debug, warn};

use crate::error::{HighlightError, Result};
use crate::models::{Detection, DetectionSet};
use labels::LabelTable;
use model::{RawInstance, SegmentationModel};

/// Wraps an external segmentation model and normalizes its output
pub struct DetectionAdapter {
    model: Box<dyn SegmentationModel>,
    labels: LabelTable,
}

impl DetectionAdapter {
    pub fn new(model: Box<dyn SegmentationModel>, labels: LabelTable) -> Self {
        Self { model, labels }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run inference once and return detections in the image's pixel space.
    ///
    /// Malformed instances are dropped with a warning; only a failed or
    /// entirely unusable inference is an error.
    pub fn detect(&self, image: &DynamicImage) -> Result<DetectionSet> {
        let model_name = self.model.name();
        let prediction = self
            .model
            .infer(image)
            .map_err(|e| HighlightError::model_invocation(model_name, format!("{e:#}")))?;

        let [source_w, source_h] = prediction.source_size;
        if source_w == 0 || source_h == 0 {
            return Err(HighlightError::model_invocation(
                model_name,
                format!("invalid source size {source_w}x{source_h}"),
            ));
        }

        let scale_x = image.width() as f32 / source_w as f32;
        let scale_y = image.height() as f32 / source_h as f32;

        let total = prediction.instances.len();
        let mut detections = Vec::with_capacity(total);
        for (idx, instance) in prediction.instances.into_iter().enumerate() {
            match self.normalize(instance, scale_x, scale_y) {
                Ok(detection) => detections.push(detection),
                Err(reason) => warn!(model = model_name, instance = idx, "Dropping detection: {}", reason),
            }
        }

        let dropped = total - detections.len();
        debug!(
            model = model_name,
            kept = detections.len(),
            dropped,
            "Normalized {} raw instances",
            total
        );

        Ok(DetectionSet::new(detections, dropped))
    }

    fn normalize(&self, instance: RawInstance, scale_x: f32, scale_y: f32) -> std::result::Result<Detection, String> {
        let label = self
            .labels
            .get(instance.class_index)
            .ok_or_else(|| format!("class index {} outside label table of {}", instance.class_index, self.labels.len()))?;
        if label.trim().is_empty() {
            return Err(format!("class index {} has an empty label", instance.class_index));
        }

        let contour: Vec<Point<f32>> = instance
            .polygon
            .iter()
            .map(|&[x, y]| Point::new(x * scale_x, y * scale_y))
            .collect();

        // Checked after scaling: a finite model-space value can overflow here
        if contour.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err("contour has non-finite coordinates".to_string());
        }

        let distinct = count_distinct(&contour);
        if distinct < 3 {
            return Err(format!("contour has {distinct} distinct points, need at least 3"));
        }

        Ok(Detection {
            // get() succeeded, so the index is a valid usize
            class_index: instance.class_index as usize,
            class_label: label.to_string(),
            confidence: instance.confidence,
            contour,
        })
    }
}

fn count_distinct(points: &[Point<f32>]) -> usize {
    // + 0.0 folds -0.0 into 0.0 so both compare equal bitwise
    let mut seen: Vec<(u32, u32)> = points
        .iter()
        .map(|p| ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits()))
        .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

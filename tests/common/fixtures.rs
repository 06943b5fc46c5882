use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{DynamicImage, Rgb, RgbImage};
use segment_highlight::{DetectionAdapter, HighlightPipeline, LabelTable, RawInstance, RawPrediction, SegmentationModel};

/// Returns a fixed prediction and counts how often it was asked.
pub struct StubModel {
    prediction: RawPrediction,
    calls: Arc<AtomicUsize>,
}

impl StubModel {
    pub fn new(prediction: RawPrediction) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                prediction,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl SegmentationModel for StubModel {
    fn infer(&self, _image: &DynamicImage) -> anyhow::Result<RawPrediction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.prediction.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Always fails, like a model whose runtime threw.
pub struct FailingModel;

impl SegmentationModel for FailingModel {
    fn infer(&self, _image: &DynamicImage) -> anyhow::Result<RawPrediction> {
        anyhow::bail!("inference backend crashed")
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Label table used by the scenario tests: 0 = dog, 1 = cat, 2 = bird
pub fn test_labels() -> LabelTable {
    LabelTable::from_names(["dog", "cat", "bird"]).expect("non-empty label table")
}

pub fn white_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])))
}

/// Gradient image so identity checks catch swapped or shifted pixels
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
    }))
}

/// Axis-aligned square as a raw polygon
pub fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<[f32; 2]> {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
}

pub fn instance(class_index: i64, polygon: Vec<[f32; 2]>) -> RawInstance {
    RawInstance {
        class_index,
        confidence: 0.9,
        polygon,
    }
}

/// Prediction already expressed in a `width`x`height` image's pixel space
pub fn prediction(width: u32, height: u32, instances: Vec<RawInstance>) -> RawPrediction {
    RawPrediction {
        source_size: [width, height],
        instances,
    }
}

/// Scenario: "dog" square (10,10)-(30,30), "cat" square (20,20)-(40,40) on 100x100
pub fn dog_and_cat() -> RawPrediction {
    prediction(
        100,
        100,
        vec![
            instance(0, square(10.0, 10.0, 30.0, 30.0)),
            instance(1, square(20.0, 20.0, 40.0, 40.0)),
        ],
    )
}

pub fn stub_pipeline(prediction: RawPrediction) -> (HighlightPipeline, Arc<AtomicUsize>) {
    let (model, calls) = StubModel::new(prediction);
    let adapter = DetectionAdapter::new(Box::new(model), test_labels());
    (HighlightPipeline::new(adapter), calls)
}

pub fn call_count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}

use image::DynamicImage;
use tracing::{debug, info};

use crate::detection::matcher::{filter_matches, Keyword};
use crate::detection::DetectionAdapter;
use crate::error::{HighlightError, Result};
use crate::models::{CompositedImage, Detection, HighlightStyle, MatchSummary};
use crate::overlay::{composite, rasterize, FillRegion};

/// Keyword-filtered segmentation overlay.
///
/// Each call to [`process`](Self::process) is independent: one inference, one
/// filter pass, one raster and composite pass. Nothing is kept between calls.
pub struct HighlightPipeline {
    adapter: DetectionAdapter,
    style: HighlightStyle,
}

impl HighlightPipeline {
    pub fn new(adapter: DetectionAdapter) -> Self {
        Self {
            adapter,
            style: HighlightStyle::DEFAULT,
        }
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    pub fn adapter(&self) -> &DetectionAdapter {
        &self.adapter
    }

    /// Highlight every detected region whose class label contains `keyword`.
    ///
    /// An empty keyword returns the input unchanged without running the model.
    pub fn process(&self, image: Option<&DynamicImage>, keyword: &str) -> Result<CompositedImage> {
        let image = image.ok_or(HighlightError::NoImageLoaded)?;
        let keyword = Keyword::new(keyword);

        if keyword.is_empty() {
            debug!("Empty keyword, passing image through");
            return Ok(CompositedImage {
                image: image.to_rgba8(),
                summary: MatchSummary::default(),
            });
        }

        debug!(
            model = self.adapter.model_name(),
            width = image.width(),
            height = image.height(),
            "Running detection"
        );
        let detections = self.adapter.detect(image)?;

        let matched = filter_matches(&detections, &keyword);
        debug!(keyword = keyword.as_str(), "Matched {} of {} detections", matched.len(), detections.len());

        let regions = rasterize_all(&matched, image);
        let output = composite(image, &regions, &self.style);

        let summary = MatchSummary {
            detected: detections.len(),
            matched: matched.len(),
            dropped: detections.dropped,
        };
        info!(
            keyword = keyword.as_str(),
            detected = summary.detected,
            matched = summary.matched,
            dropped = summary.dropped,
            "Highlight complete"
        );

        Ok(CompositedImage { image: output, summary })
    }

    /// Detections that `keyword` selects (for debugging)
    pub fn matched_detections(&self, image: &DynamicImage, keyword: &str) -> Result<Vec<Detection>> {
        let keyword = Keyword::new(keyword);
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        let detections = self.adapter.detect(image)?;
        Ok(filter_matches(&detections, &keyword).into_iter().cloned().collect())
    }

    /// Rasterized regions that `keyword` selects, in drawing order (for debugging)
    pub fn regions(&self, image: &DynamicImage, keyword: &str) -> Result<Vec<FillRegion>> {
        let matched = self.matched_detections(image, keyword)?;
        let refs: Vec<&Detection> = matched.iter().collect();
        Ok(rasterize_all(&refs, image))
    }
}

fn rasterize_all(detections: &[&Detection], image: &DynamicImage) -> Vec<FillRegion> {
    detections
        .iter()
        .map(|d| rasterize(&d.contour, image.width(), image.height()))
        .collect()
}

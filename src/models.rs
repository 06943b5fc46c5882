use image::{Rgb, RgbaImage};
use imageproc::point::Point;
use imageproc::rect::Rect;

/// One instance found by the segmentation model, in the input image's pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class_index: usize,
    pub class_label: String,
    /// Informational only; never used for filtering.
    pub confidence: f32,
    /// Closed polygon, last point implicitly joined to the first.
    pub contour: Vec<Point<f32>>,
}

impl Detection {
    pub fn new(class_index: usize, class_label: impl Into<String>, confidence: f32, contour: Vec<Point<f32>>) -> Self {
        Self {
            class_index,
            class_label: class_label.into(),
            confidence,
            contour,
        }
    }

    /// Smallest integer rectangle covering every contour point
    pub fn bounding_box(&self) -> Option<Rect> {
        let first = self.contour.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.contour[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        // Float to int casts saturate; extents are measured in i64 so a contour
        // spanning the whole i32 range cannot overflow.
        let left = min_x.floor() as i32;
        let top = min_y.floor() as i32;
        let right = max_x.ceil() as i32;
        let bottom = max_y.ceil() as i32;
        let width = (i64::from(right) - i64::from(left)).clamp(1, i64::from(u32::MAX)) as u32;
        let height = (i64::from(bottom) - i64::from(top)).clamp(1, i64::from(u32::MAX)) as u32;
        Some(Rect::at(left, top).of_size(width, height))
    }

    /// Polygon area (shoelace formula, absolute value)
    pub fn area(&self) -> f32 {
        let n = self.contour.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f32 = self
            .contour
            .iter()
            .zip(self.contour.iter().cycle().skip(1))
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        twice.abs() / 2.0
    }
}

/// Detections returned by one inference call, in model order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionSet {
    detections: Vec<Detection>,
    /// Raw instances discarded as malformed
    pub dropped: usize,
}

impl DetectionSet {
    pub fn new(detections: Vec<Detection>, dropped: usize) -> Self {
        Self { detections, dropped }
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }

    pub fn as_slice(&self) -> &[Detection] {
        &self.detections
    }
}

impl IntoIterator for DetectionSet {
    type Item = Detection;
    type IntoIter = std::vec::IntoIter<Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.into_iter()
    }
}

impl<'a> IntoIterator for &'a DetectionSet {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}

/// Fill color and opacity applied to every matched region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
    pub color: Rgb<u8>,
    pub alpha: u8,
}

impl HighlightStyle {
    /// Translucent red
    pub const DEFAULT: HighlightStyle = HighlightStyle {
        color: Rgb([255, 0, 0]),
        alpha: 100,
    };

    pub const fn new(color: Rgb<u8>, alpha: u8) -> Self {
        Self { color, alpha }
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Counts describing how a result was produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub detected: usize,
    pub matched: usize,
    pub dropped: usize,
}

/// Pipeline output handed to the display layer.
#[derive(Debug, Clone)]
pub struct CompositedImage {
    pub image: RgbaImage,
    pub summary: MatchSummary,
}

impl CompositedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

use image::{GrayImage, Luma};
use imageproc::point::Point;
use imageproc::rect::Rect;

/// Run of inside pixels on one row, `x_start..x_end` (end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: u32,
    pub x_start: u32,
    pub x_end: u32,
}

impl Span {
    pub fn len(&self) -> u32 {
        self.x_end.saturating_sub(self.x_start)
    }

    pub fn is_empty(&self) -> bool {
        self.x_end <= self.x_start
    }
}

/// Inside-set of one polygon, clipped to the image it was rasterized for.
///
/// Spans are ordered by row, then by column, and never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRegion {
    width: u32,
    height: u32,
    spans: Vec<Span>,
}

impl FillRegion {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            spans: Vec::new(),
        }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn pixel_count(&self) -> u64 {
        self.spans.iter().map(|s| s.len() as u64).sum()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        let row_start = self.spans.partition_point(|s| s.y < y);
        self.spans[row_start..]
            .iter()
            .take_while(|s| s.y == y)
            .any(|s| x >= s.x_start && x < s.x_end)
    }

    /// Tight bounding rectangle of the inside pixels
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.spans.first()?;
        let last = self.spans.last()?;
        let min_x = self.spans.iter().map(|s| s.x_start).min()?;
        let max_x = self.spans.iter().map(|s| s.x_end).max()?;
        Some(Rect::at(min_x as i32, first.y as i32).of_size(max_x - min_x, last.y - first.y + 1))
    }

    /// Binary mask: 255 inside, 0 outside
    pub fn to_mask(&self) -> GrayImage {
        let mut mask = GrayImage::new(self.width, self.height);
        for span in &self.spans {
            for x in span.x_start..span.x_end {
                mask.put_pixel(x, span.y, Luma([255u8]));
            }
        }
        mask
    }
}

/// Even-odd scanline fill of a closed polygon.
///
/// A pixel is inside when its center lies inside the polygon. Crossings use a
/// half-open test on the edge's y-range, so a vertex shared by two edges is
/// counted once and horizontal edges are skipped. Self-intersecting and
/// zero-area polygons go through the same rule. Non-finite points are ignored.
pub fn rasterize(contour: &[Point<f32>], width: u32, height: u32) -> FillRegion {
    let points: Vec<Point<f32>> = contour
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();

    let mut region = FillRegion::empty(width, height);
    if points.len() < 3 || width == 0 || height == 0 {
        return region;
    }

    let (min_y, max_y) = points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

    // Rows whose center y + 0.5 lies in [min_y, max_y)
    let first_row = (min_y - 0.5).ceil().max(0.0);
    let end_row = (max_y - 0.5).ceil().min(height as f32);
    if first_row >= end_row {
        return region;
    }

    let edges: Vec<(Point<f32>, Point<f32>)> = points
        .iter()
        .copied()
        .zip(points.iter().copied().cycle().skip(1))
        .collect();

    let mut crossings: Vec<f32> = Vec::new();
    for y in first_row as u32..end_row as u32 {
        let yc = y as f32 + 0.5;

        crossings.clear();
        for &(a, b) in &edges {
            if (a.y <= yc) != (b.y <= yc) {
                // Interpolate from the lower endpoint so shared edges agree exactly
                let (lo, hi) = if a.y < b.y { (a, b) } else { (b, a) };
                let t = (yc - lo.y) / (hi.y - lo.y);
                crossings.push(lo.x + t * (hi.x - lo.x));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let start = (pair[0] - 0.5).ceil().max(0.0);
            let end = (pair[1] - 0.5).ceil().min(width as f32);
            if start < end {
                region.spans.push(Span {
                    y,
                    x_start: start as u32,
                    x_end: end as u32,
                });
            }
        }
    }

    region
}

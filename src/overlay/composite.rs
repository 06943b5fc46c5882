use image::{DynamicImage, Rgba, RgbaImage};

use super::raster::FillRegion;
use crate::models::HighlightStyle;

/// Blend `style` into a fresh RGBA copy of `base` at every region, in order.
///
/// Regions are applied one after another, so a pixel covered by two regions
/// is blended twice.
pub fn composite(base: &DynamicImage, regions: &[FillRegion], style: &HighlightStyle) -> RgbaImage {
    let mut output = base.to_rgba8();
    for region in regions {
        blend_region(&mut output, region, style);
    }
    output
}

/// Alpha-over `style` onto the pixels of `region`. The alpha channel is untouched.
pub fn blend_region(image: &mut RgbaImage, region: &FillRegion, style: &HighlightStyle) {
    if style.alpha == 0 {
        return;
    }

    let (width, height) = image.dimensions();
    for span in region.spans() {
        if span.y >= height {
            continue;
        }
        for x in span.x_start..span.x_end.min(width) {
            blend_pixel(image.get_pixel_mut(x, span.y), style);
        }
    }
}

fn blend_pixel(pixel: &mut Rgba<u8>, style: &HighlightStyle) {
    let a = style.alpha as f32 / 255.0;
    for c in 0..3 {
        let blended = style.color[c] as f32 * a + pixel[c] as f32 * (1.0 - a);
        pixel[c] = blended.round() as u8;
    }
}

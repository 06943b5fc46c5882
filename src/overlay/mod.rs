pub mod composite;
pub mod raster;

pub use composite::{blend_region, composite};
pub use raster::{rasterize, FillRegion, Span};

//! Placeholder card rendering
//!
//! Cards are described as a display list of paint commands, rasterized into
//! an RGBA buffer, and encoded as JPEG (batch thumbnails) or PNG (in-page
//! fallbacks served as `data:` URLs).

pub mod card;
pub mod paint;
pub mod raster;

pub use card::{fallback_data_url, generate_project_images, render_card, render_fallback_card, PROJECT_IMAGES};
pub use paint::{Color, DisplayList, PaintCommand};
pub use raster::{encode, rasterize};
pub use image::ImageFormat;

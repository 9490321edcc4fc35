//! Title cards for project thumbnails and in-page image fallbacks.

use crate::rendering::paint::{Color, DisplayList, PaintCommand};
use crate::rendering::raster::{encode, rasterize};
use crate::Result;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

pub const CARD_WIDTH: u32 = 800;
pub const CARD_HEIGHT: u32 = 600;
pub const FALLBACK_WIDTH: u32 = 400;
pub const FALLBACK_HEIGHT: u32 = 300;

/// Second line printed under every project title
pub const SUBTITLE: &str = "Project Screenshot";

/// One thumbnail of the batch job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectImage {
    pub file: &'static str,
    pub title: &'static str,
    pub color: &'static str,
}

pub const PROJECT_IMAGES: [ProjectImage; 6] = [
    ProjectImage { file: "project1.jpg", title: "E-Commerce Website", color: "#ff6b6b" },
    ProjectImage { file: "project2.jpg", title: "Task Management App", color: "#4ecdc4" },
    ProjectImage { file: "project3.jpg", title: "Weather Forecast App", color: "#45b7d1" },
    ProjectImage { file: "project4.jpg", title: "Student Management System", color: "#f9ca24" },
    ProjectImage { file: "project5.jpg", title: "Algorithm Visualizer", color: "#6c5ce7" },
    ProjectImage { file: "project6.jpg", title: "Personal Portfolio", color: "#a29bfe" },
];

/// Gradient title card: base colour fading to 20% darker, two faint circles,
/// title and subtitle in white.
pub fn card_display_list(title: &str, base: Color) -> DisplayList {
    let mut list = DisplayList::new(CARD_WIDTH, CARD_HEIGHT);
    list.push(PaintCommand::LinearGradient {
        from: (0.0, 0.0),
        to: (CARD_WIDTH as f32, CARD_HEIGHT as f32),
        start: base,
        end: base.adjust_brightness(-20.0),
    })
    .push(PaintCommand::Circle {
        cx: 700,
        cy: 100,
        radius: 150,
        color: Color::WHITE,
        opacity: 0.1,
    })
    .push(PaintCommand::Circle {
        cx: 100,
        cy: 500,
        radius: 100,
        color: Color::WHITE,
        opacity: 0.1,
    })
    .push(PaintCommand::Text {
        x: 400,
        y: 300,
        text: title.to_string(),
        size_px: 48,
        bold: true,
        color: Color::WHITE,
    })
    .push(PaintCommand::Text {
        x: 400,
        y: 350,
        text: SUBTITLE.to_string(),
        size_px: 24,
        bold: false,
        color: Color::WHITE,
    });
    list
}

pub fn render_card(title: &str, base_color: &str) -> Result<RgbaImage> {
    let base = Color::from_hex(base_color)?;
    rasterize(&card_display_list(title, base))
}

/// Solid card with a centred label
pub fn fallback_display_list(label: &str, color: Color) -> DisplayList {
    let mut list = DisplayList::new(FALLBACK_WIDTH, FALLBACK_HEIGHT);
    list.push(PaintCommand::Fill { color }).push(PaintCommand::Text {
        x: 200,
        y: 150,
        text: label.to_string(),
        size_px: 20,
        bold: false,
        color: Color::WHITE,
    });
    list
}

pub fn render_fallback_card(label: &str, color: &str) -> Result<RgbaImage> {
    let color = Color::from_hex(color)?;
    rasterize(&fallback_display_list(label, color))
}

/// PNG fallback card as a `data:` URL, ready for an image `src`
pub fn fallback_data_url(label: &str, color: &str) -> Result<String> {
    let png = encode(&render_fallback_card(label, color)?, ImageFormat::Png)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    ))
}

/// Render every entry of [`PROJECT_IMAGES`] as JPEG into `dir`.
///
/// Returns the written paths in table order.
pub fn generate_project_images(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = Vec::with_capacity(PROJECT_IMAGES.len());
    for entry in PROJECT_IMAGES {
        log::info!("Creating {}...", entry.file);
        let card = render_card(entry.title, entry.color)?;
        let jpeg = encode(&card, ImageFormat::Jpeg)?;
        let path = dir.join(entry.file);
        std::fs::write(&path, jpeg)?;
        written.push(path);
    }
    Ok(written)
}

/// Rasterizer for display lists

use crate::rendering::paint::{Color, DisplayList, PaintCommand};
use crate::{Error, Result};
use embedded_graphics::mono_font::ascii::{FONT_6X12, FONT_6X13_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::convert::Infallible;
use std::io::Cursor;

/// Draw target over an RGBA buffer.
///
/// Each target pixel covers a `scale`×`scale` block of the image and is
/// blended at `opacity`, which is how bitmap glyphs are enlarged and how
/// translucent shapes are composited.
struct Canvas<'a> {
    image: &'a mut RgbaImage,
    scale: u32,
    opacity: f32,
}

impl<'a> Canvas<'a> {
    fn new(image: &'a mut RgbaImage) -> Self {
        Self {
            image,
            scale: 1,
            opacity: 1.0,
        }
    }

    fn blend(&mut self, x: u32, y: u32, c: Rgb888) {
        let a = self.opacity;
        let dst = self.image.get_pixel_mut(x, y);
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        *dst = Rgba([mix(c.r(), dst[0]), mix(c.g(), dst[1]), mix(c.b(), dst[2]), 255]);
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.image.width() / self.scale, self.image.height() / self.scale)
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h, s) = (self.image.width(), self.image.height(), self.scale);
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 {
                continue;
            }
            let (x0, y0) = (coord.x as u32 * s, coord.y as u32 * s);
            for y in y0..(y0 + s).min(h) {
                for x in x0..(x0 + s).min(w) {
                    self.blend(x, y, color);
                }
            }
        }
        Ok(())
    }
}

fn rgb888(c: Color) -> Rgb888 {
    Rgb888::new(c.r, c.g, c.b)
}

fn fill(image: &mut RgbaImage, color: Color) {
    for px in image.pixels_mut() {
        *px = Rgba([color.r, color.g, color.b, 255]);
    }
}

fn linear_gradient(image: &mut RgbaImage, from: (f32, f32), to: (f32, f32), start: Color, end: Color) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len2 = dx * dx + dy * dy;
    for (x, y, px) in image.enumerate_pixels_mut() {
        // sample at pixel centres
        let t = if len2 > 0.0 {
            ((x as f32 + 0.5 - from.0) * dx + (y as f32 + 0.5 - from.1) * dy) / len2
        } else {
            0.0
        };
        let c = start.lerp(end, t);
        *px = Rgba([c.r, c.g, c.b, 255]);
    }
}

fn font_for(size_px: u32, bold: bool) -> (&'static MonoFont<'static>, u32) {
    let font: &'static MonoFont<'static> = if bold { &FONT_6X13_BOLD } else { &FONT_6X12 };
    let glyph_h = font.character_size.height;
    let scale = ((size_px as f32 / glyph_h as f32).round() as u32).max(1);
    (font, scale)
}

/// Paint `list` into a fresh RGBA buffer (transparent black to start).
pub fn rasterize(list: &DisplayList) -> Result<RgbaImage> {
    if list.width == 0 || list.height == 0 {
        return Err(Error::RenderError(format!(
            "cannot rasterize a {}x{} canvas",
            list.width, list.height
        )));
    }
    let mut image = RgbaImage::new(list.width, list.height);
    for cmd in &list.commands {
        match cmd {
            PaintCommand::Fill { color } => fill(&mut image, *color),
            PaintCommand::LinearGradient { from, to, start, end } => {
                linear_gradient(&mut image, *from, *to, *start, *end)
            }
            PaintCommand::Circle {
                cx,
                cy,
                radius,
                color,
                opacity,
            } => {
                let mut canvas = Canvas::new(&mut image);
                canvas.opacity = opacity.clamp(0.0, 1.0);
                let _ = Circle::with_center(Point::new(*cx, *cy), radius * 2)
                    .into_styled(PrimitiveStyle::with_fill(rgb888(*color)))
                    .draw(&mut canvas);
            }
            PaintCommand::Text {
                x,
                y,
                text,
                size_px,
                bold,
                color,
            } => {
                let (font, scale) = font_for(*size_px, *bold);
                let mut canvas = Canvas::new(&mut image);
                canvas.scale = scale;
                let style = MonoTextStyle::new(font, rgb888(*color));
                let layout = TextStyleBuilder::new()
                    .alignment(Alignment::Center)
                    .baseline(Baseline::Alphabetic)
                    .build();
                let origin = Point::new(
                    (*x as f32 / scale as f32).round() as i32,
                    (*y as f32 / scale as f32).round() as i32,
                );
                let _ = Text::with_text_style(text, origin, style, layout).draw(&mut canvas);
            }
        }
    }
    Ok(image)
}

/// Encode a rasterized card. JPEG drops the alpha channel.
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.write_to(&mut buf, ImageFormat::Jpeg)?;
        }
        ImageFormat::Png => image.write_to(&mut buf, ImageFormat::Png)?,
        other => {
            return Err(Error::RenderError(format!("unsupported output format {:?}", other)));
        }
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_rejects_empty_canvas() {
        assert!(rasterize(&DisplayList::new(0, 10)).is_err());
    }

    #[test]
    fn fill_then_translucent_circle() {
        let mut list = DisplayList::new(100, 100);
        list.push(PaintCommand::Fill { color: Color::rgb(0, 0, 0) })
            .push(PaintCommand::Circle {
                cx: 50,
                cy: 50,
                radius: 20,
                color: Color::WHITE,
                opacity: 0.5,
            });
        let img = rasterize(&list).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(50, 50).0, [128, 128, 128, 255]);
        assert_eq!(img.get_pixel(50, 75).0, [0, 0, 0, 255]);
    }

    #[test]
    fn text_is_drawn_near_its_anchor() {
        let mut list = DisplayList::new(200, 100);
        list.push(PaintCommand::Fill { color: Color::rgb(0, 0, 0) })
            .push(PaintCommand::Text {
                x: 100,
                y: 60,
                text: "HI".into(),
                size_px: 24,
                bold: false,
                color: Color::WHITE,
            });
        let img = rasterize(&list).unwrap();
        let lit: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] > 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| (80..120).contains(&x) && (30..70).contains(&y)));
        // centred: ink spans both sides of the anchor
        assert!(lit.iter().any(|&(x, _)| x < 100) && lit.iter().any(|&(x, _)| x >= 100));
    }

    #[test]
    fn encodes_png_and_jpeg() {
        let mut list = DisplayList::new(16, 16);
        list.push(PaintCommand::Fill { color: Color::rgb(10, 20, 30) });
        let img = rasterize(&list).unwrap();
        let png = encode(&img, ImageFormat::Png).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let jpg = encode(&img, ImageFormat::Jpeg).unwrap();
        assert_eq!(&jpg[..2], &[0xFF, 0xD8]);
        assert!(encode(&img, ImageFormat::Gif).is_err());
    }
}

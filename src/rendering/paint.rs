/// Paint commands for placeholder cards
use crate::{Error, Result};

/// An opaque sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let v = u32::from_str_radix(hex, 16).map_err(|_| Error::InvalidColor(s.to_string()))?;
        Ok(Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shift every channel by `percent` of 255, clamped. Negative darkens.
    pub fn adjust_brightness(self, percent: f64) -> Self {
        // half-up rounding, as canvas colour helpers do
        let amt = (2.55 * percent + 0.5).floor() as i32;
        let ch = |c: u8| (c as i32 + amt).clamp(0, 255) as u8;
        Self::rgb(ch(self.r), ch(self.g), ch(self.b))
    }

    /// Linear interpolation towards `other`; `t` in 0..=1
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill the whole canvas
    Fill { color: Color },
    /// Fill the whole canvas with a two-stop gradient along `from` -> `to`
    LinearGradient {
        from: (f32, f32),
        to: (f32, f32),
        start: Color,
        end: Color,
    },
    /// Filled circle blended at `opacity`
    Circle {
        cx: i32,
        cy: i32,
        radius: u32,
        color: Color,
        opacity: f32,
    },
    /// Text centred on `x`, alphabetic baseline at `y`
    Text {
        x: i32,
        y: i32,
        text: String,
        size_px: u32,
        bold: bool,
        color: Color,
    },
}

/// A canvas size plus the commands painted onto it, in order
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: PaintCommand) -> &mut Self {
        self.commands.push(cmd);
        self
    }
}

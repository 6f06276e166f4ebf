//! Fixed, fully opaque colours for the export-safe projection.
//!
//! Translucent theme colours are pre-composited onto the white page, so the
//! rasteriser never has to blend.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels in `0.0..=1.0`.
    pub fn fractions(&self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

pub const PAGE: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const FOREGROUND: Rgb = Rgb::new(0x25, 0x25, 0x25);
pub const HEADING: Rgb = Rgb::new(0x03, 0x02, 0x13);
pub const MUTED: Rgb = Rgb::new(0x71, 0x71, 0x82);
pub const BADGE: Rgb = Rgb::new(0xf1, 0xf2, 0xf4);
pub const PILL: Rgb = Rgb::new(0xec, 0xec, 0xf0);
/// 10% black over white.
pub const BORDER: Rgb = Rgb::new(0xe6, 0xe6, 0xe6);

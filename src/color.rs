//! # Color Codec
//!
//! Converts pixels to the canonical color notation used by spreadsheet fills.
//!
//! ## Format
//!
//! A color key is six uppercase hex digits, red then green then blue, each
//! channel zero-padded to two digits:
//!
//! ```text
//! (255, 0, 0)    → "FF0000"
//! (0, 128, 10)   → "00800A"
//! (18, 52, 86)   → "123456"
//! ```
//!
//! The mapping is bijective over 24-bit RGB, so keys double as
//! deduplication keys for fill styles.
//!
//! ## Example
//!
//! ```
//! use pixelsheet::color::{self, Pixel};
//!
//! let key = color::encode(Pixel::new(255, 128, 0));
//! assert_eq!(key.as_str(), "FF8000");
//! assert_eq!(color::decode(key.as_str()), Some(Pixel::new(255, 128, 0)));
//! ```

use std::fmt;

/// One RGB pixel, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared euclidean distance in RGB space.
    #[inline]
    pub fn distance_sq(&self, other: &Pixel) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<image::Rgb<u8>> for Pixel {
    fn from(rgb: image::Rgb<u8>) -> Self {
        let [r, g, b] = rgb.0;
        Self { r, g, b }
    }
}

impl From<Pixel> for image::Rgb<u8> {
    fn from(p: Pixel) -> Self {
        image::Rgb([p.r, p.g, p.b])
    }
}

/// Canonical `RRGGBB` key for a color.
///
/// Only [`encode`] constructs keys, so every key is well formed and its
/// packed value always agrees with its hex text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey {
    hex: String,
    rgb: u32,
}

impl ColorKey {
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Packed `0xRRGGBB` value.
    pub fn rgb(&self) -> u32 {
        self.rgb
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Encode a pixel as its color key.
#[inline]
pub fn encode(pixel: Pixel) -> ColorKey {
    ColorKey {
        hex: format!("{:02X}{:02X}{:02X}", pixel.r, pixel.g, pixel.b),
        rgb: ((pixel.r as u32) << 16) | ((pixel.g as u32) << 8) | pixel.b as u32,
    }
}

/// Parse a six-digit hex color back into a pixel.
///
/// Accepts either case. Returns `None` for anything that is not exactly six
/// hex digits.
pub fn decode(hex: &str) -> Option<Pixel> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Pixel::new(channel(0)?, channel(2)?, channel(4)?))
}

// ============================================================================
// TESTS
// ============================================================================

//! # Pixel Grid Extraction
//!
//! Reads a decoded image into a row-major [`ColorGrid`].
//!
//! ## Traversal
//!
//! ```text
//! for y in 0..height        (rows, outer)
//!     for x in 0..width     (columns, inner)
//!         grid[y][x] = source.pixel(x, y)
//! ```
//!
//! Each coordinate is read exactly once. The source must already be
//! 3-channel RGB; alpha and palette images are flattened when decoding.

use crate::color::Pixel;
use crate::progress::{Observer, Progress};

/// Anything that exposes dimensions and per-coordinate RGB access.
pub trait PixelSource {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Pixel at column `x`, row `y` (0-based). Callers stay in bounds.
    fn pixel(&self, x: u32, y: u32) -> Pixel;
}

impl PixelSource for image::RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        Pixel::from(*self.get_pixel(x, y))
    }
}

/// Row-major grid of pixels with the source image's dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl ColorGrid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn len(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // chunks_exact panics on zero, and a zero-width grid has no pixels anyway
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }
}

/// Extract every pixel of `source` into a [`ColorGrid`].
///
/// Emits [`Progress::Extracting`] once and [`Progress::RowExtracted`] after
/// each row.
pub fn extract<S, O>(source: &S, observer: &mut O) -> ColorGrid
where
    S: PixelSource + ?Sized,
    O: Observer + ?Sized,
{
    let (width, height) = source.dimensions();
    observer.observe(&Progress::Extracting { width, height });

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push(source.pixel(x, y));
        }
        observer.observe(&Progress::RowExtracted { row: y + 1, height });
    }

    tracing::debug!(width, height, pixels = pixels.len(), "Extracted color grid");

    ColorGrid {
        width,
        height,
        pixels,
    }
}

// ============================================================================
// TESTS
// ============================================================================

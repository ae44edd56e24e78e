//! # Color Reduction
//!
//! Median-cut quantization used when the size guard asks to reduce colors.
//! Fewer distinct colors means fewer fill styles in the workbook.
//!
//! ## Algorithm
//!
//! 1. Build a histogram of distinct colors and their pixel counts.
//! 2. Start with one box holding every color. Repeatedly take the box with
//!    the most pixels and split it along its widest channel at the
//!    pixel-weighted median, until there are `max_colors` boxes or no box
//!    can be split.
//! 3. Each box contributes its pixel-weighted average color to the palette.
//! 4. Every pixel is replaced by its nearest palette color.
//!
//! ```text
//!   ┌───────────────┐          ┌───────┬───────┐         ┌───────┬───┬───┐
//!   │ . .  .   . .  │  split   │ . .  .│   . . │  split  │ . .  .│ . │ . │
//!   │  .  .  .   .  │  ─────►  │  .  . │ .   . │  ─────► │  .  . │.  │ . │
//!   └───────────────┘   (R)    └───────┴───────┘   (G)   └───────┴───┴───┘
//! ```

use std::collections::HashMap;

use image::RgbImage;

use crate::color::Pixel;

#[derive(Debug, Clone, Copy)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    #[inline]
    fn of(self, p: &Pixel) -> u8 {
        match self {
            Channel::Red => p.r,
            Channel::Green => p.g,
            Channel::Blue => p.b,
        }
    }
}

/// A box of histogram entries.
#[derive(Debug, Clone)]
struct ColorBox {
    colors: Vec<(Pixel, u64)>,
}

impl ColorBox {
    fn pixel_count(&self) -> u64 {
        self.colors.iter().map(|(_, n)| n).sum()
    }

    fn widest_channel(&self) -> Channel {
        let range = |channel: Channel| {
            let (lo, hi) = self
                .colors
                .iter()
                .map(|(p, _)| channel.of(p))
                .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
            hi.saturating_sub(lo)
        };

        let (r, g, b) = (
            range(Channel::Red),
            range(Channel::Green),
            range(Channel::Blue),
        );
        if r >= g && r >= b {
            Channel::Red
        } else if g >= b {
            Channel::Green
        } else {
            Channel::Blue
        }
    }

    /// Split at the pixel-weighted median of the widest channel.
    ///
    /// Both halves are non-empty; callers only split boxes with two or more
    /// colors.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();
        self.colors.sort_by_key(|(p, _)| channel.of(p));

        let half = self.pixel_count() / 2;
        let mut running = 0u64;
        let mut at = self.colors.len() / 2;
        for (i, (_, n)) in self.colors.iter().enumerate() {
            running += *n;
            if running >= half {
                at = i + 1;
                break;
            }
        }
        let at = at.clamp(1, self.colors.len() - 1);

        let right = self.colors.split_off(at);
        (self, ColorBox { colors: right })
    }

    fn average(&self) -> Pixel {
        let total = self.pixel_count().max(1);
        let sum = |channel: Channel| {
            self.colors
                .iter()
                .map(|(p, n)| channel.of(p) as u64 * n)
                .sum::<u64>()
        };
        Pixel::new(
            (sum(Channel::Red) / total) as u8,
            (sum(Channel::Green) / total) as u8,
            (sum(Channel::Blue) / total) as u8,
        )
    }
}

/// Distinct colors of `image` with their pixel counts.
pub fn histogram(image: &RgbImage) -> HashMap<Pixel, u64> {
    let mut counts = HashMap::new();
    for rgb in image.pixels() {
        *counts.entry(Pixel::from(*rgb)).or_insert(0) += 1;
    }
    counts
}

/// Median-cut palette of at most `max_colors` entries.
///
/// Returns the distinct colors unchanged when there are already few enough.
pub fn median_cut(histogram: &HashMap<Pixel, u64>, max_colors: usize) -> Vec<Pixel> {
    let max_colors = max_colors.max(1);

    let mut colors: Vec<(Pixel, u64)> = histogram.iter().map(|(&p, &n)| (p, n)).collect();
    // HashMap order is random; sort so palettes are reproducible.
    colors.sort_by_key(|(p, _)| (p.r, p.g, p.b));

    if colors.len() <= max_colors {
        return colors.into_iter().map(|(p, _)| p).collect();
    }

    let mut boxes = vec![ColorBox { colors }];
    while boxes.len() < max_colors {
        let Some(idx) = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by_key(|(_, b)| b.pixel_count())
            .map(|(i, _)| i)
        else {
            break;
        };

        let (left, right) = boxes.swap_remove(idx).split();
        boxes.push(left);
        boxes.push(right);
    }

    boxes.iter().map(ColorBox::average).collect()
}

/// Nearest palette entry by squared RGB distance.
fn nearest(color: Pixel, palette: &[Pixel]) -> Pixel {
    palette
        .iter()
        .copied()
        .min_by_key(|p| p.distance_sq(&color))
        .unwrap_or(color)
}

/// Reduce `image` in place to at most `max_colors` distinct colors.
///
/// Returns the number of distinct colors afterwards. Images that already
/// fit are left untouched. A `max_colors` of 0 is treated as 1.
pub fn reduce_colors(image: &mut RgbImage, max_colors: usize) -> usize {
    let counts = histogram(image);
    let max_colors = max_colors.max(1);
    if counts.len() <= max_colors {
        tracing::debug!(colors = counts.len(), max_colors, "No reduction needed");
        return counts.len();
    }

    let palette = median_cut(&counts, max_colors);
    let mapping: HashMap<Pixel, Pixel> = counts
        .keys()
        .map(|&c| (c, nearest(c, &palette)))
        .collect();

    for rgb in image.pixels_mut() {
        let from = Pixel::from(*rgb);
        if let Some(&to) = mapping.get(&from) {
            *rgb = to.into();
        }
    }

    let after = histogram(image).len();
    tracing::info!(before = counts.len(), after, max_colors, "Reduced colors");
    after
}

// ============================================================================
// TESTS
// ============================================================================

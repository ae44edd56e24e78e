//! # Sheet Configuration
//!
//! Cosmetic and policy settings for a conversion.
//!
//! ## Defaults
//!
//! | Setting | Value | Meaning |
//! |---------|-------|---------|
//! | `sheet_name` | `Pixels` | Worksheet title |
//! | `column_width` | 1.5 | Column width in character units |
//! | `row_height` | 12.0 | Row height in points |
//! | `size_guard_threshold` | 10 000 | Pixel count above which the size guard asks |
//! | `max_colors` | 256 | Palette size when reducing colors |
//! | `progress_every_rows` | 10 | Mapper progress interval (0 = off) |
//!
//! A width of 1.5 characters and a height of 12 points render as roughly
//! square cells in common spreadsheet applications.
//!
//! ## Usage
//!
//! ```
//! use pixelsheet::config::SheetConfig;
//!
//! let config = SheetConfig::default();
//! assert_eq!(config.size_guard_threshold, 10_000);
//! assert!(!config.exceeds_guard(100 * 100));
//! assert!(config.exceeds_guard(100 * 100 + 1));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PixelsheetError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Worksheet title
    pub sheet_name: String,

    /// Width applied to every used column
    pub column_width: f64,

    /// Height applied to every used row
    pub row_height: f64,

    /// Images with more pixels than this consult the size guard
    pub size_guard_threshold: u64,

    /// Upper bound on distinct colors after reduction
    pub max_colors: usize,

    /// Report mapping progress every this many rows
    pub progress_every_rows: u32,
}

impl SheetConfig {
    pub const DEFAULT_SHEET_NAME: &'static str = "Pixels";
    pub const DEFAULT_COLUMN_WIDTH: f64 = 1.5;
    pub const DEFAULT_ROW_HEIGHT: f64 = 12.0;
    pub const DEFAULT_SIZE_GUARD_THRESHOLD: u64 = 10_000;
    pub const DEFAULT_MAX_COLORS: usize = 256;
    pub const DEFAULT_PROGRESS_EVERY_ROWS: u32 = 10;

    /// Load overrides from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, PixelsheetError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PixelsheetError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            PixelsheetError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), ?config, "Loaded sheet config");
        Ok(config)
    }

    /// Whether an image of `pixels` pixels must go through the size guard.
    #[inline]
    pub fn exceeds_guard(&self, pixels: u64) -> bool {
        pixels > self.size_guard_threshold
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sheet_name: Self::DEFAULT_SHEET_NAME.to_string(),
            column_width: Self::DEFAULT_COLUMN_WIDTH,
            row_height: Self::DEFAULT_ROW_HEIGHT,
            size_guard_threshold: Self::DEFAULT_SIZE_GUARD_THRESHOLD,
            max_colors: Self::DEFAULT_MAX_COLORS,
            progress_every_rows: Self::DEFAULT_PROGRESS_EVERY_ROWS,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

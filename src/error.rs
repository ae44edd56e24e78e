//! # Error Types
//!
//! This module defines error types used throughout the pixelsheet library.
//!
//! A user declining the size guard is not an error: it is reported through
//! [`crate::convert::Outcome::Cancelled`].

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for pixelsheet operations
#[derive(Debug, Error)]
pub enum PixelsheetError {
    /// The input path does not exist
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input extension is not one of png, jpg, jpeg
    #[error("Unsupported format '{extension}' for {}: expected PNG or JPG/JPEG", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The image decoder could not parse the file
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The spreadsheet could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// A style was bound to a cell outside the sheet
    #[error("Cell ({row}, {column}) is outside the sheet")]
    CellOutOfBounds { row: u32, column: u32 },

    /// A cell refers to a style missing from the style table
    #[error("Cell ({row}, {column}) refers to style #{style} which is not in the style table")]
    UnknownStyle { row: u32, column: u32, style: usize },

    /// The image does not fit in one worksheet
    #[error(
        "A {columns}x{rows} image does not fit in a worksheet (at most {max_columns} columns and {max_rows} rows)"
    )]
    SheetTooLarge {
        rows: u32,
        columns: u32,
        max_rows: u32,
        max_columns: u32,
    },

    /// The configured sheet name is not a valid worksheet name
    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: &'static str },

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

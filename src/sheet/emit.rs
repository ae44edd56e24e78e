//! # Sheet Emission
//!
//! Writes a [`Sheet`] to disk. [`XlsxEmitter`] produces an Office Open XML
//! workbook through `rust_xlsxwriter`, creating one `Format` per fill style
//! (not per cell) and writing each bound cell as a formatted blank.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, XlsxError};

use super::Sheet;
use crate::error::PixelsheetError;
use crate::style::StyleTable;

/// Serializes a populated sheet to `path`.
pub trait SheetEmitter {
    fn emit(&self, sheet: &Sheet, styles: &StyleTable, path: &Path) -> Result<(), PixelsheetError>;
}

/// Writes `.xlsx` workbooks with a single worksheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxEmitter;

impl XlsxEmitter {
    fn build(sheet: &Sheet, styles: &StyleTable, path: &Path) -> Result<Workbook, PixelsheetError> {
        let serialization = |source: XlsxError| PixelsheetError::Serialization {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name()).map_err(serialization)?;

        let formats: Vec<Format> = styles
            .iter()
            .map(|(_, style)| {
                Format::new()
                    .set_background_color(Color::RGB(style.key().rgb()))
                    .set_pattern(FormatPattern::Solid)
            })
            .collect();

        for column in 1..=sheet.columns() {
            if let Some(width) = sheet.column_width(column) {
                let col = to_col(column).map_err(serialization)?;
                worksheet.set_column_width(col, width).map_err(serialization)?;
            }
        }
        for row in 1..=sheet.rows() {
            if let Some(height) = sheet.row_height(row) {
                worksheet.set_row_height(row - 1, height).map_err(serialization)?;
            }
        }

        for (row, column, style) in sheet.bound_cells() {
            let format = formats
                .get(style.index())
                .ok_or(PixelsheetError::UnknownStyle {
                    row,
                    column,
                    style: style.index(),
                })?;
            let col = to_col(column).map_err(serialization)?;
            worksheet.write_blank(row - 1, col, format).map_err(serialization)?;
        }

        tracing::debug!(
            formats = formats.len(),
            rows = sheet.rows(),
            columns = sheet.columns(),
            "Built workbook"
        );

        Ok(workbook)
    }
}

/// 1-based sheet column to 0-based xlsx column.
fn to_col(column: u32) -> Result<u16, XlsxError> {
    column
        .checked_sub(1)
        .and_then(|c| u16::try_from(c).ok())
        .ok_or(XlsxError::RowColumnLimitError)
}

impl SheetEmitter for XlsxEmitter {
    fn emit(&self, sheet: &Sheet, styles: &StyleTable, path: &Path) -> Result<(), PixelsheetError> {
        let mut workbook = Self::build(sheet, styles, path)?;
        workbook
            .save(path)
            .map_err(|source| PixelsheetError::Serialization {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %path.display(), "Wrote workbook");
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

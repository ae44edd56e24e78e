//! # Sheet Document Model
//!
//! The in-memory spreadsheet built from a color grid, before it is written
//! out. It sits between the pixel grid and the `.xlsx` container:
//!
//! ```text
//! ┌───────────┐     ┌────────┐     ┌─────────────┐     ┌─────────┐
//! │ ColorGrid │ ──► │ Mapper │ ──► │    Sheet    │ ──► │ Emitter │ ──► .xlsx
//! │ (pixels)  │     │        │     │ (StyleIds)  │     │         │
//! └───────────┘     └────────┘     └─────────────┘     └─────────┘
//!                        ▲                                   ▲
//!                        └────────── StyleTable ─────────────┘
//! ```
//!
//! Cells are addressed 1-based, `(row, column)`, as spreadsheet users see
//! them. Each cell holds at most one [`StyleId`].
//!
//! ## Example
//!
//! ```
//! use pixelsheet::color::{encode, Pixel};
//! use pixelsheet::sheet::Sheet;
//! use pixelsheet::style::StyleTable;
//!
//! let mut styles = StyleTable::new();
//! let mut sheet = Sheet::new("Pixels", 2, 2);
//!
//! let red = styles.resolve(&encode(Pixel::new(255, 0, 0)));
//! sheet.bind(1, 1, red)?;
//! sheet.bind(2, 2, red)?;
//!
//! assert_eq!(sheet.cell(1, 1), Some(red));
//! assert_eq!(sheet.populated_cells(), 2);
//! # Ok::<(), pixelsheet::PixelsheetError>(())
//! ```

mod emit;
mod mapper;

pub use emit::{SheetEmitter, XlsxEmitter};
pub use mapper::populate;

use crate::error::PixelsheetError;
use crate::style::StyleId;

/// Most rows an `.xlsx` worksheet can hold.
pub const MAX_ROWS: u32 = 1_048_576;

/// Most columns an `.xlsx` worksheet can hold.
pub const MAX_COLUMNS: u32 = 16_384;

/// Longest allowed worksheet name, in characters.
pub const MAX_NAME_LEN: usize = 31;

const FORBIDDEN_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Check that a `rows × columns` sheet fits in one worksheet.
pub fn check_dimensions(rows: u32, columns: u32) -> Result<(), PixelsheetError> {
    if rows > MAX_ROWS || columns > MAX_COLUMNS {
        return Err(PixelsheetError::SheetTooLarge {
            rows,
            columns,
            max_rows: MAX_ROWS,
            max_columns: MAX_COLUMNS,
        });
    }
    Ok(())
}

/// Check `name` against the worksheet naming rules.
pub fn validate_name(name: &str) -> Result<(), PixelsheetError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.chars().count() > MAX_NAME_LEN {
        Some("longer than 31 characters")
    } else if name.contains(FORBIDDEN_NAME_CHARS) {
        Some("contains one of [ ] : * ? / \\")
    } else if name.starts_with('\'') || name.ends_with('\'') {
        Some("starts or ends with an apostrophe")
    } else if name.eq_ignore_ascii_case("history") {
        Some("'History' is reserved")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PixelsheetError::InvalidSheetName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// A single worksheet of styled cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: u32,
    columns: u32,
    cells: Vec<Option<StyleId>>,
    column_widths: Vec<Option<f64>>,
    row_heights: Vec<Option<f64>>,
}

impl Sheet {
    /// Create an empty sheet of `rows × columns` cells.
    pub fn new(name: impl Into<String>, rows: u32, columns: u32) -> Self {
        let cell_count = rows as usize * columns as usize;
        Self {
            name: name.into(),
            rows,
            columns,
            cells: vec![None; cell_count],
            column_widths: vec![None; columns as usize],
            row_heights: vec![None; rows as usize],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    fn offset(&self, row: u32, column: u32) -> Option<usize> {
        if row == 0 || column == 0 || row > self.rows || column > self.columns {
            return None;
        }
        Some((row - 1) as usize * self.columns as usize + (column - 1) as usize)
    }

    /// Bind `style` to the cell at 1-based `(row, column)`.
    pub fn bind(&mut self, row: u32, column: u32, style: StyleId) -> Result<(), PixelsheetError> {
        let offset = self
            .offset(row, column)
            .ok_or(PixelsheetError::CellOutOfBounds { row, column })?;
        self.cells[offset] = Some(style);
        Ok(())
    }

    /// Style bound at 1-based `(row, column)`, if any.
    pub fn cell(&self, row: u32, column: u32) -> Option<StyleId> {
        self.offset(row, column).and_then(|i| self.cells[i])
    }

    /// Number of cells with a style bound.
    pub fn populated_cells(&self) -> u64 {
        self.cells.iter().filter(|c| c.is_some()).count() as u64
    }

    /// Bound cells in row-major order as `(row, column, style)`, 1-based.
    pub fn bound_cells(&self) -> impl Iterator<Item = (u32, u32, StyleId)> + '_ {
        let columns = self.columns.max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|style| ((i / columns) as u32 + 1, (i % columns) as u32 + 1, style))
        })
    }

    /// Set the width of every column in `1..=columns`.
    pub fn set_column_widths(&mut self, width: f64) {
        self.column_widths.fill(Some(width));
    }

    /// Set the height of every row in `1..=rows`.
    pub fn set_row_heights(&mut self, height: f64) {
        self.row_heights.fill(Some(height));
    }

    pub fn column_width(&self, column: u32) -> Option<f64> {
        let i = column.checked_sub(1)? as usize;
        self.column_widths.get(i).copied().flatten()
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        let i = row.checked_sub(1)? as usize;
        self.row_heights.get(i).copied().flatten()
    }
}

// ============================================================================
// TESTS
// ============================================================================

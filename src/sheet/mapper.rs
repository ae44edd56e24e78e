//! Grid-to-sheet mapping.
//!
//! Walks the grid in extraction order and binds each pixel's style to the
//! matching cell. Grid coordinates are 0-based, sheet cells 1-based:
//! pixel `(x, y)` lands in cell `(row = y + 1, column = x + 1)`.

use super::Sheet;
use crate::color;
use crate::config::SheetConfig;
use crate::error::PixelsheetError;
use crate::grid::ColorGrid;
use crate::progress::{Observer, Progress};
use crate::style::StyleTable;

/// Fill `sheet` from `grid`, resolving styles through `styles`.
///
/// Column widths and row heights are applied once, uniformly, from
/// `config`. Progress is reported every `config.progress_every_rows` rows.
pub fn populate<O: Observer + ?Sized>(
    sheet: &mut Sheet,
    grid: &ColorGrid,
    styles: &mut StyleTable,
    config: &SheetConfig,
    observer: &mut O,
) -> Result<(), PixelsheetError> {
    let height = grid.height();
    let total = grid.len();

    sheet.set_column_widths(config.column_width);
    sheet.set_row_heights(config.row_height);

    let mut processed: u64 = 0;
    for (y, row) in (0u32..).zip(grid.rows()) {
        for (x, &pixel) in (0u32..).zip(row) {
            let style = styles.resolve(&color::encode(pixel));
            sheet.bind(y + 1, x + 1, style)?;
            processed += 1;
        }

        let rows_done = y + 1;
        if config.progress_every_rows > 0 && rows_done % config.progress_every_rows == 0 {
            observer.observe(&Progress::RowsMapped {
                row: rows_done,
                height,
                percent: processed as f32 / total as f32 * 100.0,
                distinct_colors: styles.len(),
            });
        }
    }

    observer.observe(&Progress::Mapped {
        cells: processed,
        distinct_colors: styles.len(),
    });

    Ok(())
}

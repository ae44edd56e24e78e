//! Progress observations emitted while a conversion runs.
//!
//! Observers only watch; nothing they do feeds back into the result.

/// A single progress event.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Pixel extraction is starting.
    Extracting { width: u32, height: u32 },
    /// Row `row` (1-based) of `height` has been extracted.
    RowExtracted { row: u32, height: u32 },
    /// Colors are being reduced before extraction.
    Reducing { max_colors: usize },
    /// `row` rows of `height` have been written to the sheet.
    RowsMapped {
        row: u32,
        height: u32,
        percent: f32,
        distinct_colors: usize,
    },
    /// Every cell has been bound to a style.
    Mapped { cells: u64, distinct_colors: usize },
}

/// Receives progress events.
pub trait Observer {
    fn observe(&mut self, event: &Progress);
}

impl<F: FnMut(&Progress)> Observer for F {
    fn observe(&mut self, event: &Progress) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Observer for Silent {
    fn observe(&mut self, _event: &Progress) {}
}

/// Forwards events to `tracing`.
///
/// Per-row extraction events go to `debug`, everything else to `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&mut self, event: &Progress) {
        match *event {
            Progress::Extracting { width, height } => {
                tracing::info!(width, height, "Extracting pixels");
            }
            Progress::RowExtracted { row, height } => {
                tracing::debug!(row, height, "Row extracted");
            }
            Progress::Reducing { max_colors } => {
                tracing::info!(max_colors, "Reducing colors");
            }
            Progress::RowsMapped {
                row,
                height,
                percent,
                distinct_colors,
            } => {
                tracing::info!(
                    "Processed {row}/{height} rows ({percent:.1}% - {distinct_colors} unique colors)"
                );
            }
            Progress::Mapped {
                cells,
                distinct_colors,
            } => {
                tracing::info!(cells, distinct_colors, "Sheet populated");
            }
        }
    }
}

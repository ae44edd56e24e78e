//! # Pixelsheet - Images as Spreadsheets
//!
//! Pixelsheet turns a PNG or JPEG image into an `.xlsx` workbook in which
//! every cell is filled with the color of one pixel. It provides:
//!
//! - **Color codec**: pixels to `RRGGBB` fill colors
//! - **Grid extraction**: row-major pixel grids from decoded images
//! - **Style deduplication**: one fill style per distinct color, not per cell
//! - **Sheet model and emitter**: 1-based cell mapping and `.xlsx` output
//! - **Size guard**: caller decision for large images, with median-cut color
//!   reduction
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use pixelsheet::{
//!     config::SheetConfig,
//!     convert::{Converter, Outcome},
//!     guard::{Decision, FixedGuard},
//!     progress::TracingObserver,
//! };
//!
//! let converter = Converter::new(SheetConfig::default());
//! match converter.convert(
//!     Path::new("sprite.png"),
//!     &mut FixedGuard(Decision::Proceed),
//!     &mut TracingObserver,
//! )? {
//!     Outcome::Completed(report) => println!("Wrote {}", report.output.display()),
//!     Outcome::Cancelled => println!("Cancelled"),
//! }
//!
//! # Ok::<(), pixelsheet::PixelsheetError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`color`] | Pixel and color key codec |
//! | [`grid`] | Pixel grid extraction |
//! | [`style`] | Fill style deduplication |
//! | [`sheet`] | Sheet model, grid mapping, `.xlsx` emission |
//! | [`quantize`] | Median-cut color reduction |
//! | [`guard`] | Size guard decisions |
//! | [`prompt`] | Interactive prompts |
//! | [`convert`] | End-to-end conversion pipeline |
//! | [`progress`] | Progress events and observers |
//! | [`config`] | Sheet configuration |
//! | [`error`] | Error types |

pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod grid;
pub mod guard;
pub mod progress;
pub mod prompt;
pub mod quantize;
pub mod sheet;
pub mod style;

// Re-exports for convenience
pub use config::SheetConfig;
pub use convert::{ConversionReport, Converter, Outcome};
pub use error::PixelsheetError;

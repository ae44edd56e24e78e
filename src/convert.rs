//! # Conversion Pipeline
//!
//! Ties the pieces together for one image:
//!
//! ```text
//! path ─► validate ─► decode (RGB8) ─► fits? ─► size guard ─┬─► extract ─► populate ─► emit ─► .xlsx
//!                                                           ├─► reduce colors ─┘
//!                                                           └─► cancelled (no file)
//! ```
//!
//! The sheet name and the worksheet limits are checked before any pixel is
//! extracted, so an image that cannot be written fails without prompting.
//!
//! Every call owns its grid, style table and sheet. Nothing is shared
//! between conversions, so one [`Converter`] can be reused for many images.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use pixelsheet::config::SheetConfig;
//! use pixelsheet::convert::{Converter, Outcome};
//! use pixelsheet::guard::{Decision, FixedGuard};
//! use pixelsheet::progress::TracingObserver;
//!
//! let converter = Converter::new(SheetConfig::default());
//! let outcome = converter.convert(
//!     Path::new("sprite.png"),
//!     &mut FixedGuard(Decision::Reduce),
//!     &mut TracingObserver,
//! )?;
//!
//! if let Outcome::Completed(report) = outcome {
//!     println!("{} cells, {} colors", report.cells, report.distinct_colors);
//! }
//! # Ok::<(), pixelsheet::PixelsheetError>(())
//! ```

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::config::SheetConfig;
use crate::error::PixelsheetError;
use crate::grid;
use crate::guard::{Decision, SizeGuard};
use crate::progress::{Observer, Progress};
use crate::quantize;
use crate::sheet::{self, Sheet, SheetEmitter, XlsxEmitter};
use crate::style::StyleTable;

/// Accepted input extensions, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Extension of the written workbook.
pub const OUTPUT_EXTENSION: &str = "xlsx";

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Cells with a fill bound.
    pub cells: u64,
    /// Fill styles created, one per distinct color.
    pub distinct_colors: usize,
    /// Whether colors were reduced before extraction.
    pub reduced: bool,
}

/// Result of a conversion that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed(ConversionReport),
    /// The size guard declined; nothing was written.
    Cancelled,
}

/// Output path for `input`: same location, `.xlsx` extension.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Check the extension, then that the file exists.
///
/// The extension is checked first so unsupported files are rejected without
/// touching the filesystem.
pub fn validate_input(path: &Path) -> Result<(), PixelsheetError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(PixelsheetError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    if !path.exists() {
        return Err(PixelsheetError::InputNotFound(path.to_path_buf()));
    }

    Ok(())
}

/// Decode `path` and flatten it to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<RgbImage, PixelsheetError> {
    let image = image::open(path).map_err(|source| PixelsheetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        color = ?image.color(),
        width = image.width(),
        height = image.height(),
        "Decoded image"
    );
    Ok(image.to_rgb8())
}

/// Converts images to spreadsheets.
#[derive(Debug, Clone)]
pub struct Converter<E = XlsxEmitter> {
    config: SheetConfig,
    emitter: E,
}

impl Converter<XlsxEmitter> {
    pub fn new(config: SheetConfig) -> Self {
        Self::with_emitter(config, XlsxEmitter)
    }
}

impl<E: SheetEmitter> Converter<E> {
    pub fn with_emitter(config: SheetConfig, emitter: E) -> Self {
        Self { config, emitter }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Convert the image at `input` into a workbook next to it.
    pub fn convert<G, O>(
        &self,
        input: &Path,
        guard: &mut G,
        observer: &mut O,
    ) -> Result<Outcome, PixelsheetError>
    where
        G: SizeGuard + ?Sized,
        O: Observer + ?Sized,
    {
        sheet::validate_name(&self.config.sheet_name)?;
        validate_input(input)?;
        tracing::info!(path = %input.display(), "Loading image");
        let mut image = load_image(input)?;
        sheet::check_dimensions(image.height(), image.width())?;

        let reduced = match self.check_size(&image, guard) {
            Decision::Cancel => {
                tracing::info!("Conversion cancelled");
                return Ok(Outcome::Cancelled);
            }
            Decision::Reduce => {
                observer.observe(&Progress::Reducing {
                    max_colors: self.config.max_colors,
                });
                quantize::reduce_colors(&mut image, self.config.max_colors);
                true
            }
            Decision::Proceed => false,
        };

        let (sheet, styles) = self.build_sheet(&image, observer)?;

        let output = output_path(input);
        self.write(&sheet, &styles, &output)?;

        Ok(Outcome::Completed(ConversionReport {
            output,
            width: image.width(),
            height: image.height(),
            cells: sheet.populated_cells(),
            distinct_colors: styles.len(),
            reduced,
        }))
    }

    /// Ask `guard` only when the image exceeds the threshold.
    fn check_size<G: SizeGuard + ?Sized>(&self, image: &RgbImage, guard: &mut G) -> Decision {
        let pixels = image.width() as u64 * image.height() as u64;
        if !self.config.exceeds_guard(pixels) {
            return Decision::Proceed;
        }
        tracing::info!(
            pixels,
            threshold = self.config.size_guard_threshold,
            "Image exceeds size guard"
        );
        guard.decide(pixels)
    }

    /// Extract `image` and build its sheet with a fresh style table.
    pub fn build_sheet<O: Observer + ?Sized>(
        &self,
        image: &RgbImage,
        observer: &mut O,
    ) -> Result<(Sheet, StyleTable), PixelsheetError> {
        let grid = grid::extract(image, observer);

        let mut styles = StyleTable::new();
        let mut sheet = Sheet::new(&self.config.sheet_name, grid.height(), grid.width());
        sheet::populate(&mut sheet, &grid, &mut styles, &self.config, observer)?;

        Ok((sheet, styles))
    }

    /// Emit, removing the partial file on failure if this run created it.
    fn write(&self, sheet: &Sheet, styles: &StyleTable, output: &Path) -> Result<(), PixelsheetError> {
        let existed = output.exists();
        let result = self.emitter.emit(sheet, styles, output);

        if result.is_err() && !existed && output.exists() {
            match std::fs::remove_file(output) {
                Ok(()) => tracing::debug!(path = %output.display(), "Removed partial output"),
                Err(e) => {
                    tracing::warn!(%e, path = %output.display(), "Failed to remove partial output")
                }
            }
        }
        result
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::FixedGuard;
    use crate::progress::Silent;
    use std::io::Write;

    /// Emitter that writes some bytes and then fails, like a full disk.
    struct FailingEmitter;

    impl SheetEmitter for FailingEmitter {
        fn emit(&self, _: &Sheet, _: &StyleTable, path: &Path) -> Result<(), PixelsheetError> {
            let mut file = std::fs::File::create(path)?;
            file.write_all(b"PK partial")?;
            Err(PixelsheetError::Serialization {
                path: path.to_path_buf(),
                source: rust_xlsxwriter::XlsxError::RowColumnLimitError,
            })
        }
    }

    fn save_png(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
        let path = dir.join(name);
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/tmp/cat.PNG")),
            PathBuf::from("/tmp/cat.xlsx")
        );
        assert_eq!(
            output_path(Path::new("photo.jpeg")),
            PathBuf::from("photo.xlsx")
        );
    }

    #[test]
    fn test_unsupported_extension_checked_first() {
        let err = validate_input(Path::new("does/not/exist/photo.gif")).unwrap_err();
        assert!(matches!(
            err,
            PixelsheetError::UnsupportedFormat { ref extension, .. } if extension == "gif"
        ));

        let err = validate_input(Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, PixelsheetError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_png(dir.path(), "UPPER.PNG", &RgbImage::new(1, 1));
        assert!(validate_input(&path).is_ok());
    }

    #[test]
    fn test_missing_input() {
        let err = validate_input(Path::new("/nonexistent/missing.png")).unwrap_err();
        assert!(matches!(err, PixelsheetError::InputNotFound(_)));
    }

    #[test]
    fn test_guard_not_consulted_at_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_png(dir.path(), "edge.png", &RgbImage::new(100, 100));

        let mut asked = false;
        let mut guard = |_: u64| {
            asked = true;
            Decision::Cancel
        };
        let outcome = Converter::new(SheetConfig::default())
            .convert(&path, &mut guard, &mut Silent)
            .unwrap();

        assert!(!asked);
        assert!(matches!(outcome, Outcome::Completed(_)));
    }

    #[test]
    fn test_guard_consulted_above_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_png(dir.path(), "edge.png", &RgbImage::new(10_001, 1));

        let mut asked = None;
        let mut guard = |n: u64| {
            asked = Some(n);
            Decision::Cancel
        };
        let outcome = Converter::new(SheetConfig::default())
            .convert(&path, &mut guard, &mut Silent)
            .unwrap();

        assert_eq!(asked, Some(10_001));
        assert_eq!(outcome, Outcome::Cancelled);
        assert!(!output_path(&path).exists());
    }

    #[test]
    fn test_failed_emit_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_png(dir.path(), "tiny.png", &RgbImage::new(2, 2));

        let converter = Converter::with_emitter(SheetConfig::default(), FailingEmitter);
        let err = converter
            .convert(&path, &mut FixedGuard(Decision::Proceed), &mut Silent)
            .unwrap_err();

        assert!(matches!(err, PixelsheetError::Serialization { .. }));
        assert!(!output_path(&path).exists());
    }

    #[test]
    fn test_failed_emit_keeps_preexisting_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_png(dir.path(), "tiny.png", &RgbImage::new(2, 2));
        std::fs::write(output_path(&path), b"old").unwrap();

        let converter = Converter::with_emitter(SheetConfig::default(), FailingEmitter);
        assert!(
            converter
                .convert(&path, &mut FixedGuard(Decision::Proceed), &mut Silent)
                .is_err()
        );
        assert!(output_path(&path).exists());
    }

    #[test]
    fn test_too_wide_fails_before_guard() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_png(dir.path(), "wide.png", &RgbImage::new(16_385, 1));

        let mut asked = false;
        let mut guard = |_: u64| {
            asked = true;
            Decision::Proceed
        };
        let mut events = 0;
        let mut observer = |_: &Progress| events += 1;
        let err = Converter::new(SheetConfig::default())
            .convert(&path, &mut guard, &mut observer)
            .unwrap_err();

        assert!(matches!(
            err,
            PixelsheetError::SheetTooLarge { columns: 16_385, rows: 1, .. }
        ));
        assert!(!asked);
        assert_eq!(events, 0);
        assert!(!output_path(&path).exists());
    }

    #[test]
    fn test_invalid_sheet_name_fails_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        // Undecodable, so reaching the decoder would give a different error.
        let path = dir.path().join("junk.png");
        std::fs::write(&path, b"junk").unwrap();

        let config = SheetConfig {
            sheet_name: "bad/name".to_string(),
            ..SheetConfig::default()
        };
        let err = Converter::new(config)
            .convert(&path, &mut FixedGuard(Decision::Proceed), &mut Silent)
            .unwrap_err();

        assert!(matches!(err, PixelsheetError::InvalidSheetName { .. }));
        assert!(!output_path(&path).exists());
    }

    #[test]
    fn test_build_sheet_single_pixel() {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgb([7, 8, 9]));

        let (sheet, styles) = Converter::new(SheetConfig::default())
            .build_sheet(&img, &mut Silent)
            .unwrap();

        assert_eq!(sheet.populated_cells(), 1);
        assert_eq!(styles.len(), 1);
        assert_eq!(sheet.name(), "Pixels");
    }
}

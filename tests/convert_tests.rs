//! # End-to-End Conversion Tests
//!
//! These tests write real PNG/JPEG fixtures to a temporary directory and run
//! them through the full pipeline, including `.xlsx` emission.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, RgbaImage};
use pixelsheet::color::{Pixel, encode};
use pixelsheet::convert::{self, ConversionReport, Converter, Outcome};
use pixelsheet::guard::{Decision, FixedGuard};
use pixelsheet::progress::{Progress, Silent};
use pixelsheet::{PixelsheetError, SheetConfig};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn save(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

fn completed(outcome: Outcome) -> ConversionReport {
    match outcome {
        Outcome::Completed(report) => report,
        Outcome::Cancelled => panic!("conversion was cancelled"),
    }
}

fn convert_with(path: &Path, decision: Decision) -> Result<Outcome, PixelsheetError> {
    Converter::new(SheetConfig::default()).convert(path, &mut FixedGuard(decision), &mut Silent)
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn two_by_two_image_shares_red_style() {
    let dir = tempfile::tempdir().unwrap();
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 255, 0]));
    img.put_pixel(0, 1, Rgb([0, 0, 255]));
    img.put_pixel(1, 1, Rgb([255, 0, 0]));
    let path = save(dir.path(), "quad.png", &img);

    let report = completed(convert_with(&path, Decision::Cancel).unwrap());
    assert_eq!(report.cells, 4);
    assert_eq!(report.distinct_colors, 3);
    assert_eq!(report.output, dir.path().join("quad.xlsx"));
    assert!(report.output.exists());

    let decoded = convert::load_image(&path).unwrap();
    let (sheet, styles) = Converter::new(SheetConfig::default())
        .build_sheet(&decoded, &mut Silent)
        .unwrap();
    let keys: Vec<String> = sheet
        .bound_cells()
        .map(|(_, _, id)| styles.get(id).unwrap().key().to_string())
        .collect();
    assert_eq!(keys, vec!["FF0000", "00FF00", "0000FF", "FF0000"]);
    assert_eq!(sheet.cell(1, 1), sheet.cell(2, 2));
    assert_eq!(
        sheet.cell(1, 1),
        styles.lookup(&encode(Pixel::new(255, 0, 0)))
    );
}

#[test]
fn single_pixel_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = save(dir.path(), "dot.png", &solid(1, 1, [12, 34, 56]));

    let report = completed(convert_with(&path, Decision::Proceed).unwrap());
    assert_eq!((report.width, report.height), (1, 1));
    assert_eq!(report.cells, 1);
    assert_eq!(report.distinct_colors, 1);
}

#[test]
fn large_solid_image_has_one_style() {
    let dir = tempfile::tempdir().unwrap();
    let path = save(dir.path(), "wall.png", &solid(200, 200, [40, 80, 120]));

    let report = completed(convert_with(&path, Decision::Proceed).unwrap());
    assert_eq!(report.cells, 40_000);
    assert_eq!(report.distinct_colors, 1);
    assert!(!report.reduced);

    let bytes = std::fs::read(&report.output).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn missing_input_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");

    let err = convert_with(&path, Decision::Proceed).unwrap_err();
    assert!(matches!(err, PixelsheetError::InputNotFound(ref p) if p == &path));
    assert!(!dir.path().join("missing.xlsx").exists());
}

#[test]
fn gif_is_rejected_before_decoding() {
    let dir = tempfile::tempdir().unwrap();
    // Not a GIF at all: decoding would fail if it were attempted.
    let path = dir.path().join("photo.gif");
    std::fs::write(&path, b"garbage").unwrap();

    let err = convert_with(&path, Decision::Proceed).unwrap_err();
    assert!(matches!(err, PixelsheetError::UnsupportedFormat { .. }));
    assert!(!dir.path().join("photo.xlsx").exists());
}

#[test]
fn corrupt_png_reports_decode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really").unwrap();

    let err = convert_with(&path, Decision::Proceed).unwrap_err();
    assert!(matches!(err, PixelsheetError::Decode { .. }));
    assert!(err.to_string().contains("broken.png"));
    assert!(!dir.path().join("broken.xlsx").exists());
}

#[test]
fn cancel_above_threshold_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = save(dir.path(), "big.png", &solid(101, 100, [0, 0, 0]));

    let outcome = convert_with(&path, Decision::Cancel).unwrap();
    assert_eq!(outcome, Outcome::Cancelled);
    assert!(!dir.path().join("big.xlsx").exists());
}

#[test]
fn reduce_bounds_distinct_colors() {
    let dir = tempfile::tempdir().unwrap();
    let img = RgbImage::from_fn(120, 100, |x, y| Rgb([(x * 2) as u8, (y * 2) as u8, 90]));
    let path = save(dir.path(), "gradient.png", &img);

    let config = SheetConfig {
        max_colors: 32,
        ..SheetConfig::default()
    };
    let report = completed(
        Converter::new(config)
            .convert(&path, &mut FixedGuard(Decision::Reduce), &mut Silent)
            .unwrap(),
    );

    assert!(report.reduced);
    assert!(report.distinct_colors <= 32);
    assert_eq!(report.cells, 12_000);
}

#[test]
fn alpha_is_flattened_to_rgb() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alpha.png");
    RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 128]))
        .save(&path)
        .unwrap();

    let report = completed(convert_with(&path, Decision::Proceed).unwrap());
    assert_eq!(report.cells, 6);
    assert_eq!(report.distinct_colors, 1);
}

#[test]
fn jpeg_input_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = save(dir.path(), "photo.JPG", &solid(8, 8, [200, 200, 200]));

    let report = completed(convert_with(&path, Decision::Proceed).unwrap());
    assert_eq!(report.output, dir.path().join("photo.xlsx"));
    assert_eq!(report.cells, 64);
}

#[test]
fn progress_is_reported_for_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = save(dir.path(), "rows.png", &solid(5, 20, [1, 1, 1]));

    let mut extracted = 0;
    let mut mapped = Vec::new();
    let mut observer = |e: &Progress| match e {
        Progress::RowExtracted { .. } => extracted += 1,
        Progress::RowsMapped { row, .. } => mapped.push(*row),
        _ => {}
    };
    Converter::new(SheetConfig::default())
        .convert(&path, &mut FixedGuard(Decision::Proceed), &mut observer)
        .unwrap();

    assert_eq!(extracted, 20);
    assert_eq!(mapped, vec![10, 20]);
}

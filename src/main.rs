//! # Pixelsheet CLI
//!
//! Command-line interface for converting images to spreadsheets.
//!
//! ## Usage
//!
//! ```bash
//! # Convert an image (asks before converting large images)
//! pixelsheet sprite.png
//!
//! # Prompt for the path
//! pixelsheet
//!
//! # Reduce colors of large images without asking
//! pixelsheet --on-large reduce photo.jpg
//!
//! # Custom cell sizes
//! pixelsheet --config sheet.json sprite.png
//! ```
//!
//! Set `RUST_LOG=pixelsheet=debug` for per-row detail.

use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;

use pixelsheet::{
    Outcome, PixelsheetError, SheetConfig,
    convert::Converter,
    guard::{Decision, FixedGuard, SizeGuard},
    progress::TracingObserver,
    prompt::{self, PromptGuard},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pixelsheet - turn an image into a spreadsheet, one colored cell per pixel
#[derive(Parser, Debug)]
#[command(name = "pixelsheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PNG or JPG/JPEG image to convert (asked for when omitted)
    image: Option<PathBuf>,

    /// JSON file overriding sheet settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// What to do when the image exceeds the size guard threshold
    #[arg(long, value_enum, default_value_t = OnLarge::Ask)]
    on_large: OnLarge,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OnLarge {
    /// Ask interactively
    Ask,
    /// Reduce colors first
    Reduce,
    /// Convert unchanged
    Proceed,
    /// Do not convert
    Cancel,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelsheet=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PixelsheetError> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SheetConfig::load(path)?,
        None => SheetConfig::default(),
    };

    let image = match cli.image {
        Some(path) => path,
        None => match prompt::read_image_path(&mut io::stdin().lock(), &mut io::stdout())? {
            Some(path) => path,
            None => {
                println!("No path provided.");
                return Ok(());
            }
        },
    };

    let mut guard: Box<dyn SizeGuard> = match cli.on_large {
        OnLarge::Ask => Box::new(PromptGuard::new(io::stdin().lock(), io::stdout())),
        OnLarge::Reduce => Box::new(FixedGuard(Decision::Reduce)),
        OnLarge::Proceed => Box::new(FixedGuard(Decision::Proceed)),
        OnLarge::Cancel => Box::new(FixedGuard(Decision::Cancel)),
    };

    let converter = Converter::new(config);
    match converter.convert(&image, guard.as_mut(), &mut TracingObserver)? {
        Outcome::Completed(report) => {
            println!("\nConversion complete!");
            println!("Image processed: {}x{} pixels", report.width, report.height);
            if report.reduced {
                println!("Colors reduced to at most {}", converter.config().max_colors);
            }
            println!("Unique colors: {}", report.distinct_colors);
            println!("Spreadsheet created: {}", report.output.display());
            println!(
                "Note: the file has {} colored cells and may take a while to open",
                report.cells
            );
        }
        Outcome::Cancelled => {
            println!("Operation cancelled.");
        }
    }

    Ok(())
}

//! Interactive prompts for the command-line front end.
//!
//! Both prompts are generic over reader and writer so they can be driven
//! from tests with in-memory buffers.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::guard::{Decision, SizeGuard};

/// How many unrecognized answers are tolerated before cancelling.
const MAX_ATTEMPTS: usize = 3;

/// Ask for an image path.
///
/// Returns `None` when the answer is empty or input is closed.
pub fn read_image_path<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> io::Result<Option<PathBuf>> {
    writeln!(writer, "=== Image to Spreadsheet Converter ===")?;
    writeln!(
        writer,
        "Converts a PNG/JPG image into an .xlsx file where every cell is one pixel.\n"
    )?;
    write!(writer, "Image path: ")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let path = line.trim();
    Ok((!path.is_empty()).then(|| PathBuf::from(path)))
}

/// Map one answer line to a decision.
///
/// `1`/`2`/`3` pick reduce/continue/cancel; yes/no answers (including `s`
/// and `si`) confirm or cancel. An empty answer takes the default, continue.
pub fn parse_decision(answer: &str) -> Option<Decision> {
    match answer.trim().to_lowercase().as_str() {
        "1" => Some(Decision::Reduce),
        "" | "2" | "y" | "yes" | "s" | "si" => Some(Decision::Proceed),
        "3" | "n" | "no" => Some(Decision::Cancel),
        _ => None,
    }
}

/// Size guard that asks on a terminal (or any reader/writer pair).
pub struct PromptGuard<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptGuard<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, pixel_count: u64) -> io::Result<Decision> {
        writeln!(self.writer, "The image has {pixel_count} pixels.")?;
        writeln!(self.writer, "Large sheets are slow to write and open. Options:")?;
        writeln!(self.writer, "1. Reduce colors (faster)")?;
        writeln!(self.writer, "2. Continue unchanged (slower)")?;
        writeln!(self.writer, "3. Cancel")?;

        for _ in 0..MAX_ATTEMPTS {
            write!(self.writer, "Choose an option (1/2/3) [2]: ")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(Decision::Cancel);
            }
            if let Some(decision) = parse_decision(&line) {
                return Ok(decision);
            }
            writeln!(self.writer, "Unrecognized option '{}'.", line.trim())?;
        }
        Ok(Decision::Cancel)
    }
}

impl<R: BufRead, W: Write> SizeGuard for PromptGuard<R, W> {
    fn decide(&mut self, pixel_count: u64) -> Decision {
        match self.ask(pixel_count) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(%e, "Prompt failed, cancelling");
                Decision::Cancel
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

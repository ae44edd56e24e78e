//! # Size Guard
//!
//! Large images produce large, slow workbooks. Before extraction the pipeline
//! asks a [`SizeGuard`] what to do with any image whose pixel count exceeds
//! [`SheetConfig::size_guard_threshold`](crate::config::SheetConfig):
//!
//! | Decision | Effect |
//! |----------|--------|
//! | [`Decision::Reduce`] | Quantize to `max_colors`, then convert |
//! | [`Decision::Proceed`] | Convert unchanged |
//! | [`Decision::Cancel`] | Stop, write nothing |
//!
//! Closures work as guards, which keeps the pipeline testable without a
//! terminal:
//!
//! ```
//! use pixelsheet::guard::{Decision, SizeGuard};
//!
//! let mut guard = |pixels: u64| {
//!     if pixels > 1_000_000 { Decision::Cancel } else { Decision::Proceed }
//! };
//! assert_eq!(guard.decide(40_000), Decision::Proceed);
//! ```

/// Caller's answer for an oversized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Reduce the color count first.
    Reduce,
    /// Convert as is.
    Proceed,
    /// Abort the conversion.
    Cancel,
}

/// Decides how to handle an image above the size threshold.
pub trait SizeGuard {
    fn decide(&mut self, pixel_count: u64) -> Decision;
}

impl<F: FnMut(u64) -> Decision> SizeGuard for F {
    fn decide(&mut self, pixel_count: u64) -> Decision {
        self(pixel_count)
    }
}

/// Always returns the same decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedGuard(pub Decision);

impl SizeGuard for FixedGuard {
    fn decide(&mut self, pixel_count: u64) -> Decision {
        tracing::debug!(pixel_count, decision = ?self.0, "Size guard decided");
        self.0
    }
}

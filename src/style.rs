//! # Fill Style Deduplication
//!
//! A spreadsheet with one fill style per cell grows with the pixel count. The
//! [`StyleTable`] instead keeps exactly one [`FillStyle`] per distinct
//! [`ColorKey`] and hands out copyable [`StyleId`] handles:
//!
//! ```text
//! pixels:  FF0000 00FF00 FF0000 FF0000 0000FF
//! handles:   #0     #1     #0     #0     #2      (3 styles, 5 cells)
//! ```
//!
//! A table lives for one conversion and is passed by reference to the
//! mapper; there is no shared cache between conversions.

use std::collections::HashMap;

use crate::color::ColorKey;

/// Handle to a style owned by a [`StyleTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u32);

impl StyleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A solid cell fill in one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillStyle {
    key: ColorKey,
}

impl FillStyle {
    fn solid(key: ColorKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &ColorKey {
        &self.key
    }
}

/// Color key to style mapping, populated on demand.
#[derive(Debug, Default)]
pub struct StyleTable {
    index: HashMap<ColorKey, StyleId>,
    styles: Vec<FillStyle>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `key`, constructing its style on first sight.
    pub fn resolve(&mut self, key: &ColorKey) -> StyleId {
        if let Some(&id) = self.index.get(key) {
            return id;
        }

        let id = StyleId(self.styles.len() as u32);
        self.styles.push(FillStyle::solid(key.clone()));
        self.index.insert(key.clone(), id);
        id
    }

    /// Existing handle for `key`, without constructing anything.
    pub fn lookup(&self, key: &ColorKey) -> Option<StyleId> {
        self.index.get(key).copied()
    }

    pub fn get(&self, id: StyleId) -> Option<&FillStyle> {
        self.styles.get(id.index())
    }

    /// Number of styles constructed so far, one per distinct color.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Styles in construction order, with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &FillStyle)> {
        self.styles
            .iter()
            .enumerate()
            .map(|(i, style)| (StyleId(i as u32), style))
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! In-process highlight-range store
//!
//! The markup model owns the lifecycle of every highlight range registered
//! by a pass: storage, bulk clear, and per-offset attribute resolution.

use crate::attrs::TextAttributes;

/// Priority layer for a highlight range. Higher layers win when ranges
/// overlap at the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HighlightLayer {
    /// Token-level syntax highlighting
    Syntax,
    /// Grammar-aware highlighting painted over the syntax layer
    AdditionalSyntax,
}

impl HighlightLayer {
    /// Numeric priority used when resolving overlapping ranges
    pub fn priority(self) -> u32 {
        match self {
            HighlightLayer::Syntax => 2000,
            HighlightLayer::AdditionalSyntax => 3000,
        }
    }
}

/// A span of text plus resolved visual attributes, in absolute document
/// offsets (end is exclusive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
    pub layer: HighlightLayer,
    pub attrs: TextAttributes,
}

/// Range-highlight sink for one editor surface.
///
/// Callers must serialize passes per model; the clear-then-repopulate
/// contract assumes no concurrent pass targets the same surface.
#[derive(Debug, Default)]
pub struct MarkupModel {
    ranges: Vec<HighlightRange>,
}

impl MarkupModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a highlight range
    pub fn add_range(
        &mut self,
        start: usize,
        end: usize,
        layer: HighlightLayer,
        attrs: TextAttributes,
    ) {
        self.ranges.push(HighlightRange {
            start,
            end,
            layer,
            attrs,
        });
    }

    /// Remove every registered range
    pub fn clear_all(&mut self) {
        self.ranges.clear();
    }

    /// All registered ranges in insertion order
    pub fn ranges(&self) -> &[HighlightRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Resolve the attributes visible at an offset.
    ///
    /// Higher layers win; within a layer the latest-added range wins.
    pub fn attributes_at(&self, offset: usize) -> Option<&TextAttributes> {
        let mut best: Option<&HighlightRange> = None;
        for range in &self.ranges {
            if offset < range.start || offset >= range.end {
                continue;
            }
            match best {
                Some(b) if b.layer.priority() > range.layer.priority() => {}
                _ => best = Some(range),
            }
        }
        best.map(|r| &r.attrs)
    }
}

//! Per-run memoization of grammar scans over one statement text.

use std::collections::HashMap;

use vypiska_core::{LayoutKind, Result};

use crate::grammar::{LayoutGrammar, RecordSpan, grammar_for};

/// Segmentation and period-total results for one statement, per layout.
///
/// The cache borrows the text it was created for, so it can only ever answer
/// for that exact text; drop it when the conversion ends.
#[derive(Debug)]
pub struct ExtractionCache<'a> {
    text: &'a str,
    segments: HashMap<LayoutKind, Result<Vec<RecordSpan<'a>>>>,
    totals: HashMap<LayoutKind, Result<f64>>,
}

impl<'a> ExtractionCache<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            segments: HashMap::new(),
            totals: HashMap::new(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn segments(&mut self, kind: LayoutKind) -> Result<&[RecordSpan<'a>]> {
        let text = self.text;
        match self
            .segments
            .entry(kind)
            .or_insert_with(|| grammar_for(kind).segment(text))
        {
            Ok(spans) => Ok(spans.as_slice()),
            Err(e) => Err(e.clone()),
        }
    }

    pub fn period_total(&mut self, kind: LayoutKind) -> Result<f64> {
        let text = self.text;
        self.totals
            .entry(kind)
            .or_insert_with(|| grammar_for(kind).extract_period_total(text))
            .clone()
    }

    /// Number of (layout, operation) results held.
    pub fn len(&self) -> usize {
        self.segments.len() + self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

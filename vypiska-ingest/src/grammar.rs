//! Capability interface shared by every layout grammar.

use vypiska_core::{LayoutKind, RecordFields, Result};

use crate::parsers::{moscow_2005::Moscow2005, stavropol_2107::Stavropol2107};

/// A slice of the statement text holding exactly one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSpan<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the statement.
    pub offset: usize,
}

impl<'a> RecordSpan<'a> {
    pub fn new(source: &'a str, start: usize, end: usize) -> Self {
        Self {
            text: &source[start..end],
            offset: start,
        }
    }

    /// 1-based line number of the span's first line in `source`.
    pub fn line_number(&self, source: &str) -> usize {
        source[..self.offset].matches('\n').count() + 1
    }
}

/// Structural grammar of one statement layout.
///
/// Implementations never share code across layouts: each one encodes the
/// delimiter count, line count and trailing-currency syntax of its own layout.
pub trait LayoutGrammar: Sync {
    fn kind(&self) -> LayoutKind;

    /// Cut the statement into record spans, in order of appearance.
    ///
    /// Returns `NoTransactionsFound` when nothing in the text looks like a
    /// record of this layout.
    fn segment<'a>(&self, text: &'a str) -> Result<Vec<RecordSpan<'a>>>;

    /// Decompose one span into named fields.
    fn decompose(&self, span: &str) -> Result<RecordFields>;

    /// Credits minus debits, as reported by the bank in the statement summary.
    fn extract_period_total(&self, text: &str) -> Result<f64>;
}

static MOSCOW_2005: Moscow2005 = Moscow2005;
static STAVROPOL_2107: Stavropol2107 = Stavropol2107;

pub fn grammar_for(kind: LayoutKind) -> &'static dyn LayoutGrammar {
    match kind {
        LayoutKind::Moscow2005 => &MOSCOW_2005,
        LayoutKind::Stavropol2107 => &STAVROPOL_2107,
    }
}

/// Split a statement line into its TAB-delimited parts, trimmed, dropping empty ones.
pub fn split_line(line: &str) -> Vec<&str> {
    line.split('\t')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Physical lines of a span, without `\r` and without blank lines.
pub fn record_lines(span: &str) -> Vec<&str> {
    span.lines().filter(|l| !l.trim().is_empty()).collect()
}

//! Pipeline orchestration: layout selection, assembly and reconciliation for
//! one statement text.

use vypiska_core::{FormatSelector, LayoutKind, Result, TransactionTable};

use crate::assemble::assemble;
use crate::cache::ExtractionCache;
use crate::detect::detect;
use crate::grammar::grammar_for;
use crate::reconcile::reconcile;

/// How a successful conversion was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub layout: LayoutKind,
    /// `true` when the layout came from detection rather than the caller.
    pub detected: bool,
    pub records: usize,
    /// Credits minus debits as printed by the bank.
    pub period_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub table: TransactionTable,
    pub report: ConversionReport,
}

/// Convert one statement text into a reconciled transaction table.
///
/// Errors from any stage are returned unchanged.
pub fn convert(text: &str, selector: FormatSelector) -> Result<Conversion> {
    let mut cache = ExtractionCache::new(text);

    let (layout, detected) = match selector {
        FormatSelector::Auto => {
            let layout = detect(&mut cache)?;
            log::info!("statement format detected as {layout}");
            (layout, true)
        }
        FormatSelector::Layout(layout) => {
            log::info!("converting statement as {layout}");
            (layout, false)
        }
    };

    let table = {
        let spans = cache.segments(layout)?;
        assemble(grammar_for(layout), spans)?
    };
    let period_total = cache.period_total(layout)?;
    reconcile(&table, period_total)?;

    log::info!(
        "extracted {} transactions, period total {:.2}",
        table.len(),
        period_total
    );

    Ok(Conversion {
        report: ConversionReport {
            layout,
            detected,
            records: table.len(),
            period_total,
        },
        table,
    })
}

/// Like [`convert`], keeping only the table.
pub fn convert_table(text: &str, selector: FormatSelector) -> Result<TransactionTable> {
    convert(text, selector).map(|c| c.table)
}

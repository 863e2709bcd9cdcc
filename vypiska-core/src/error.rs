//! Error taxonomy for one statement conversion.
//!
//! Every variant is fatal to the conversion it was raised in. Grammars raise
//! `NoTransactionsFound` / `TotalsNotFound` as rejection signals during format
//! detection; the remaining variants reach the caller unchanged.

use thiserror::Error;

use crate::layout::LayoutKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("no transactions found: text does not match the {layout} record structure")]
    NoTransactionsFound { layout: LayoutKind },

    #[error("period totals not found for {layout}: missing {what}")]
    TotalsNotFound {
        layout: LayoutKind,
        what: &'static str,
    },

    #[error("statement format could not be determined: no known layout matched")]
    UnknownFormat,

    #[error("statement format could not be determined: several layouts matched ({})", join_layouts(.0))]
    AmbiguousFormat(Vec<LayoutKind>),

    #[error("record structure error: {reason}{}", record_suffix(.record))]
    RecordStructure {
        reason: String,
        record: Option<String>,
    },

    #[error("malformed amount {value:?}{}", record_suffix(.record))]
    MalformedAmount {
        value: String,
        record: Option<String>,
    },

    #[error("malformed date {value:?} (expected {expected}){}", record_suffix(.record))]
    MalformedDate {
        value: String,
        expected: &'static str,
        record: Option<String>,
    },

    #[error(
        "balance verification failed: credits - debits reported by the bank = {reported:.2}, \
         sum over extracted transactions = {calculated:.2}"
    )]
    BalanceVerification { reported: f64, calculated: f64 },
}

pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    pub fn record_structure(reason: impl Into<String>) -> Self {
        ExtractError::RecordStructure {
            reason: reason.into(),
            record: None,
        }
    }

    pub fn malformed_amount(value: impl Into<String>) -> Self {
        ExtractError::MalformedAmount {
            value: value.into(),
            record: None,
        }
    }

    pub fn malformed_date(value: impl Into<String>, expected: &'static str) -> Self {
        ExtractError::MalformedDate {
            value: value.into(),
            expected,
            record: None,
        }
    }

    /// Attach the text of the record being processed, keeping the variant.
    ///
    /// Variants that are not tied to a single record are returned as-is, and
    /// an already attached record is never overwritten.
    pub fn with_record(self, text: &str) -> Self {
        match self {
            ExtractError::RecordStructure {
                reason,
                record: None,
            } => ExtractError::RecordStructure {
                reason,
                record: Some(text.to_string()),
            },
            ExtractError::MalformedAmount {
                value,
                record: None,
            } => ExtractError::MalformedAmount {
                value,
                record: Some(text.to_string()),
            },
            ExtractError::MalformedDate {
                value,
                expected,
                record: None,
            } => ExtractError::MalformedDate {
                value,
                expected,
                record: Some(text.to_string()),
            },
            other => other,
        }
    }

    /// Text of the offending record, when one was attached.
    pub fn record(&self) -> Option<&str> {
        match self {
            ExtractError::RecordStructure { record, .. }
            | ExtractError::MalformedAmount { record, .. }
            | ExtractError::MalformedDate { record, .. } => record.as_deref(),
            _ => None,
        }
    }

    /// `UnknownFormat` and `AmbiguousFormat` are reported the same way.
    pub fn is_format_undetermined(&self) -> bool {
        matches!(
            self,
            ExtractError::UnknownFormat | ExtractError::AmbiguousFormat(_)
        )
    }
}

fn join_layouts(layouts: &[LayoutKind]) -> String {
    layouts
        .iter()
        .map(|l| l.id())
        .collect::<Vec<_>>()
        .join(", ")
}

fn record_suffix(record: &Option<String>) -> String {
    match record {
        Some(r) => format!("\n--- record ---\n{}", r.trim_end()),
        None => String::new(),
    }
}

//! vypiska-ingest: statement layout grammars, format detection, table assembly and reconciliation.

pub mod assemble;
pub mod cache;
pub mod detect;
pub mod grammar;
pub mod parsers;
pub mod pipeline;
pub mod reconcile;

pub use assemble::assemble;
pub use cache::ExtractionCache;
pub use detect::{detect, detect_layout};
pub use grammar::{LayoutGrammar, RecordSpan, grammar_for};
pub use pipeline::{Conversion, ConversionReport, convert, convert_table};
pub use reconcile::{BALANCE_TOLERANCE, reconcile, verify_balance};

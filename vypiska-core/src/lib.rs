//! vypiska-core: data model, error taxonomy and leaf parsers for bank statement extraction

pub mod error;
pub mod layout;
pub mod money;
pub mod time;
pub mod transaction;

pub use error::{ExtractError, Result};
pub use layout::{FormatSelector, LayoutKind, UnknownSelector};
pub use money::{format_money, parse_money};
pub use transaction::{ForeignAmount, RecordFields, Transaction, TransactionTable};

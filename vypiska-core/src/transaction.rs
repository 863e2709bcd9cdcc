//! Decomposed records and the transaction table handed to serialization.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::{parse_operation_datetime, parse_processing_date};

/// Amount in the currency the operation was made in, when it differs from
/// the account currency. Present only as a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignAmount {
    pub value: f64,
    /// ISO code (`EUR`) or symbol (`€`), as printed.
    pub currency: String,
}

/// Fields of one record as cut out of the text, dates still unparsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordFields {
    /// "DD.MM.YYYY HH:MM"
    pub operation_date: String,
    /// "DD.MM.YYYY"
    pub processing_date: String,
    /// Authorisation code, or "-" when the bank printed none.
    pub authorisation_code: String,
    pub description: String,
    pub category: String,
    /// Negative = debit.
    pub value_account_currency: f64,
    pub remainder_account_currency: f64,
    pub operational: Option<ForeignAmount>,
}

impl RecordFields {
    /// Append a continuation line to the description.
    pub fn push_description(&mut self, continuation: &str) {
        self.description.push(' ');
        self.description.push_str(continuation);
    }
}

/// One financial operation with structured dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub operation_datetime: NaiveDateTime,
    pub processing_date: NaiveDate,
    pub authorisation_code: String,
    pub description: String,
    pub category: String,
    pub value_account_currency: f64,
    pub remainder_account_currency: f64,
    pub operational: Option<ForeignAmount>,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.value_account_currency < 0.0
    }

    pub fn value_operational_currency(&self) -> Option<f64> {
        self.operational.as_ref().map(|o| o.value)
    }

    pub fn operational_currency(&self) -> Option<&str> {
        self.operational.as_ref().map(|o| o.currency.as_str())
    }
}

impl TryFrom<RecordFields> for Transaction {
    type Error = crate::error::ExtractError;

    fn try_from(fields: RecordFields) -> Result<Self> {
        Ok(Transaction {
            operation_datetime: parse_operation_datetime(&fields.operation_date)?,
            processing_date: parse_processing_date(&fields.processing_date)?,
            authorisation_code: fields.authorisation_code,
            description: fields.description,
            category: fields.category,
            value_account_currency: fields.value_account_currency,
            remainder_account_currency: fields.remainder_account_currency,
            operational: fields.operational,
        })
    }
}

/// Transactions in order of appearance in the statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    /// Output column order.
    pub const COLUMNS: [&'static str; 9] = [
        "operation_date",
        "processing_date",
        "authorisation_code",
        "description",
        "category",
        "value_account_currency",
        "value_operational_currency",
        "operational_currency",
        "remainder_account_currency",
    ];

    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of `value_account_currency` over all rows.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|t| t.value_account_currency).sum()
    }

    pub fn into_rows(self) -> Vec<Transaction> {
        self.rows
    }
}

impl IntoIterator for TransactionTable {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    fn fields() -> RecordFields {
        RecordFields {
            operation_date: "08.07.2021 18:27".to_string(),
            processing_date: "09.07.2021".to_string(),
            authorisation_code: "254718".to_string(),
            description: "XXXXX XXXXX".to_string(),
            category: "Все для дома".to_string(),
            value_account_currency: -193.91,
            remainder_account_currency: 14593.30,
            operational: Some(ForeignAmount {
                value: -2.09,
                currency: "€".to_string(),
            }),
        }
    }

    #[test]
    fn test_try_from_parses_dates() {
        let txn = Transaction::try_from(fields()).unwrap();
        assert_eq!(
            txn.operation_datetime,
            NaiveDate::from_ymd_opt(2021, 7, 8)
                .unwrap()
                .and_hms_opt(18, 27, 0)
                .unwrap()
        );
        assert_eq!(txn.processing_date, NaiveDate::from_ymd_opt(2021, 7, 9).unwrap());
        assert_eq!(txn.operational_currency(), Some("€"));
        assert_eq!(txn.value_operational_currency(), Some(-2.09));
        assert!(txn.is_debit());
    }

    #[test]
    fn test_try_from_rejects_bad_date() {
        let mut f = fields();
        f.operation_date = "08.07.2021".to_string();
        let err = Transaction::try_from(f).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedDate { ref value, .. } if value == "08.07.2021"));
    }

    #[test]
    fn test_push_description() {
        let mut f = fields();
        f.description = "SBOL перевод 1234****5678 А. ВАЛЕРИЯ".to_string();
        f.push_description("ИГОРЕВНА");
        assert_eq!(f.description, "SBOL перевод 1234****5678 А. ВАЛЕРИЯ ИГОРЕВНА");
    }

    #[test]
    fn test_table_total_and_order() {
        let a = Transaction::try_from(fields()).unwrap();
        let mut b = a.clone();
        b.value_account_currency = 500.0;
        let table = TransactionTable::new(vec![a, b]);
        assert_eq!(table.len(), 2);
        assert!((table.total() - 306.09).abs() < 1e-9);
        assert_eq!(table.rows()[1].value_account_currency, 500.0);
    }

    #[test]
    fn test_transaction_serializes_to_json() {
        let txn = Transaction::try_from(fields()).unwrap();
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["authorisation_code"], "254718");
        assert_eq!(json["operational"]["currency"], "€");
    }
}

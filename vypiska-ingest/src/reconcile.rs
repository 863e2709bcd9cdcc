//! Cross-check of the assembled table against the bank's own period total.

use vypiska_core::{ExtractError, Result, TransactionTable};

/// Largest accepted absolute difference, exclusive.
pub const BALANCE_TOLERANCE: f64 = 0.01;

pub fn verify_balance(calculated: f64, reported: f64) -> Result<()> {
    if (calculated - reported).abs() < BALANCE_TOLERANCE {
        return Ok(());
    }
    Err(ExtractError::BalanceVerification {
        reported,
        calculated,
    })
}

/// Accept `table` only if its values sum to `period_total`.
pub fn reconcile(table: &TransactionTable, period_total: f64) -> Result<()> {
    let calculated = table.total();
    log::debug!("reconciling: calculated {calculated:.2}, reported {period_total:.2}");
    verify_balance(calculated, period_total)
}

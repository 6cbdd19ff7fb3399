//! Inclusion rule shared by the budget views
//!
//! The weekly budget tracker and the classification rollup count the same
//! transactions: expenses incurred in the month that are already paid or
//! billed, excluding card bill payments.

use crate::models::{DateBasis, ReportPeriod, Transaction, TransactionKind};

/// Does this transaction count as real spending for the month's budget?
///
/// Matching of kind and status is exact (`"Despesa"`, `"Pago"`, `"Faturado"`).
/// The category still has to be found among the limits by the caller.
pub fn counts_toward_budget(txn: &Transaction, period: ReportPeriod) -> bool {
    period.contains(txn.date_for(DateBasis::Movement))
        && txn.kind_exact() == Some(TransactionKind::Expense)
        && txn.status_exact().map(|s| s.is_settled()).unwrap_or(false)
        && !txn.is_card_bill_payment()
}

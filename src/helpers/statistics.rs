//! Summary figures over a transaction set. None of these assume the input is
//! sorted. Amounts are millisatoshi.

use std::cmp::Reverse;

use crate::model::Transaction;

pub fn total_count(transactions: &[Transaction]) -> usize {
    transactions.len()
}

/// Includes unclassified transactions. Saturates at `u64::MAX`.
pub fn total_volume(transactions: &[Transaction]) -> u64 {
    transactions
        .iter()
        .fold(0, |total: u64, transaction| total.saturating_add(transaction.amount))
}

pub fn max_volume(transactions: &[Transaction]) -> u64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount)
        .max()
        .unwrap_or(0)
}

/// Percentage (0-100) of transactions whose type mentions `error`.
pub fn error_rate(transactions: &[Transaction]) -> f64 {
    if transactions.is_empty() {
        return 0.0;
    }

    let errors = transactions
        .iter()
        .filter(|transaction| transaction.is_error())
        .count();

    errors as f64 / transactions.len() as f64 * 100.0
}

/// The `n` largest transactions not matching `exclude`, largest first.
/// Equal amounts keep their input order.
pub fn top_n<F>(transactions: &[Transaction], n: usize, exclude: F) -> Vec<Transaction>
where
    F: Fn(&Transaction) -> bool,
{
    let mut kept: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| !exclude(transaction))
        .cloned()
        .collect();
    kept.sort_by_key(|transaction| Reverse(transaction.amount));
    kept.truncate(n);

    kept
}

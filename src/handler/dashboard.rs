use chrono::{DateTime, Utc};

use super::transactions::normalize;
use crate::{
    helpers::{
        aggregate_daily,
        formatting::{format_number, msat_to_sat, time_ago},
        statistics::{top_n, total_count, total_volume},
        Strategy, TimeRange, TypeFilter,
    },
    model::{Dashboard, Transaction, TopTransaction},
    types::RawEvent,
};

pub const TOP_TRANSACTIONS: usize = 5;

/// Dashboard over `events` in their given order. The type filter applies to
/// every figure; the time range only to the daily series.
pub fn build(
    events: &[RawEvent],
    type_filter: TypeFilter,
    range: TimeRange,
    now: DateTime<Utc>,
) -> Dashboard {
    let fetched = normalize(events);
    let transactions = type_filter.apply(&fetched.transactions);

    let count = total_count(&transactions);
    let volume_sat = msat_to_sat(total_volume(&transactions));

    let transactions_by_day =
        range.apply(aggregate_daily(&transactions, Strategy::Count), now);
    let volume_msat_by_day =
        range.apply(aggregate_daily(&transactions, Strategy::Volume), now);

    let top_transactions = top_n(&transactions, TOP_TRANSACTIONS, Transaction::is_internal)
        .iter()
        .map(|transaction| top_transaction(transaction, &now))
        .collect();

    Dashboard {
        type_filter: type_filter.to_string(),
        range: range.to_string(),
        total_transactions: count,
        total_transactions_display: format_number(display_value(count as u64)),
        total_volume_sat: volume_sat,
        total_volume_display: format_number(display_value(volume_sat)),
        transactions_by_day,
        volume_msat_by_day,
        top_transactions,
        skipped: fetched.skipped,
    }
}

fn top_transaction(transaction: &Transaction, now: &DateTime<Utc>) -> TopTransaction {
    let amount_sat = msat_to_sat(transaction.amount);

    TopTransaction {
        id: transaction.id.to_owned(),
        fine_type: transaction.fine_type.to_owned(),
        amount_sat,
        amount_display: format!("{} SAT", format_number(display_value(amount_sat))),
        created_at: transaction.created_at,
        time_ago: time_ago(transaction.created_at, now),
    }
}

fn display_value(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

use chrono::{DateTime, TimeZone};

use super::live_poller::LiveData;
use crate::{
    helpers::{
        aggregate_hourly,
        formatting::{format_percentage, msat_to_sat, msat_to_sat_precise, time_ago},
        statistics::{error_rate, max_volume, total_count},
        Strategy, TypeFilter,
    },
    model::{HourlyPoint, LatestTransaction, LiveSnapshot, Transaction},
};

const SHORT_ID_LEN: usize = 8;

/// Live view over the poller's latest data. Figures and the hourly chart
/// cover every fetched transaction; only the list honours `type_filter`.
/// Hours are taken in the time zone of `now`.
pub fn snapshot<Tz: TimeZone>(
    data: &LiveData,
    type_filter: TypeFilter,
    now: &DateTime<Tz>,
) -> LiveSnapshot {
    let transactions = &data.transactions;
    let rate = error_rate(transactions);

    LiveSnapshot {
        type_filter: type_filter.to_string(),
        updated_at: data.updated_at,
        total_transactions: total_count(transactions),
        largest_transaction_sat: msat_to_sat(max_volume(transactions)),
        error_rate: rate,
        error_rate_display: format_percentage(rate),
        hourly: hourly_points(transactions, &now.timezone()),
        transactions: transactions
            .iter()
            .filter(|transaction| type_filter.matches(transaction))
            .map(|transaction| latest_transaction(transaction, now))
            .collect(),
        skipped: data.skipped,
        last_error: data.last_error.to_owned(),
    }
}

pub fn hourly_points<Tz: TimeZone>(transactions: &[Transaction], tz: &Tz) -> Vec<HourlyPoint> {
    let counts = aggregate_hourly(transactions, Strategy::Count, tz);
    let volumes = aggregate_hourly(transactions, Strategy::Volume, tz);

    counts
        .iter()
        .zip(volumes.iter())
        .map(|(count, volume)| HourlyPoint {
            hour: format!("{:02}:00", count.hour),
            count: count.totals.total(),
            total_value: msat_to_sat_precise(volume.totals.total()),
        })
        .collect()
}

fn latest_transaction<Tz: TimeZone>(
    transaction: &Transaction,
    now: &DateTime<Tz>,
) -> LatestTransaction {
    LatestTransaction {
        id: transaction.id.to_owned(),
        short_id: short_id(&transaction.id),
        fine_type: transaction.fine_type.to_owned(),
        amount_sat: msat_to_sat(transaction.amount),
        created_at: transaction.created_at,
        time_ago: time_ago(transaction.created_at, now),
    }
}

fn short_id(id: &str) -> String {
    let prefix: String = id.chars().take(SHORT_ID_LEN).collect();
    format!("{}...", prefix)
}

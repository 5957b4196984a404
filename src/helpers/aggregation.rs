//! Time bucketing of transactions into chart series.
//!
//! Accumulators hold raw units (a count or millisatoshi); conversion to
//! SAT/BTC happens only when a view is rendered.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use tracing::warn;

use crate::model::{DailyBucket, HourlyBucket, Transaction, TypeTotals};

pub const HOURS_PER_DAY: u32 = 24;

/// How a transaction is folded into its bucket accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Count,
    Volume,
}

impl Strategy {
    pub fn apply(&self, accumulator: u64, transaction: &Transaction) -> u64 {
        match self {
            Strategy::Count => accumulator.saturating_add(1),
            Strategy::Volume => accumulator.saturating_add(transaction.amount),
        }
    }
}

pub fn utc_date(created_at: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(created_at, 0).map(|dt| dt.date_naive())
}

pub fn hour_of_day<Tz: TimeZone>(created_at: i64, tz: &Tz) -> Option<u32> {
    DateTime::<Utc>::from_timestamp(created_at, 0)
        .map(|dt| dt.with_timezone(tz).hour())
}

fn accumulate(totals: &mut TypeTotals, transaction: &Transaction, strategy: Strategy) {
    if let Some(coarse) = transaction.coarse_type() {
        let accumulator = totals.get_mut(coarse);
        *accumulator = strategy.apply(*accumulator, transaction);
    }
}

/// Buckets by UTC calendar day. Buckets appear in encounter order while
/// building, so the result is sorted by date before it is returned.
/// Unclassified transactions open their day's bucket without adding to it.
pub fn aggregate_daily(transactions: &[Transaction], strategy: Strategy) -> Vec<DailyBucket> {
    let mut by_date: HashMap<NaiveDate, TypeTotals> = HashMap::new();

    for transaction in transactions {
        let Some(date) = utc_date(transaction.created_at) else {
            warn!(
                "Transaction {} has an out of range timestamp {}, not bucketed",
                transaction.id, transaction.created_at
            );
            continue;
        };
        let totals = by_date.entry(date).or_default();
        accumulate(totals, transaction, strategy);
    }

    let mut buckets: Vec<DailyBucket> = by_date
        .into_iter()
        .map(|(date, totals)| DailyBucket { date, totals })
        .collect();
    buckets.sort_by_key(|bucket| bucket.date);

    buckets
}

/// Buckets by hour of day in `tz`; all 24 hours are always present.
pub fn aggregate_hourly<Tz: TimeZone>(
    transactions: &[Transaction],
    strategy: Strategy,
    tz: &Tz,
) -> Vec<HourlyBucket> {
    let mut buckets: Vec<HourlyBucket> = (0..HOURS_PER_DAY)
        .map(|hour| HourlyBucket {
            hour,
            totals: TypeTotals::default(),
        })
        .collect();

    for transaction in transactions {
        let Some(hour) = hour_of_day(transaction.created_at, tz) else {
            warn!(
                "Transaction {} has an out of range timestamp {}, not bucketed",
                transaction.id, transaction.created_at
            );
            continue;
        };
        if let Some(bucket) = buckets.get_mut(hour as usize) {
            accumulate(&mut bucket.totals, transaction, strategy);
        }
    }

    buckets
}

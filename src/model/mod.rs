//! Normalized transactions and the series and views derived from them.

mod bucket;
mod transaction;
mod views;

pub use bucket::{DailyBucket, HourlyBucket, TypeTotals};
pub use transaction::{normalize_events, sort_newest_first, Normalized, Transaction};
pub use views::{Dashboard, HourlyPoint, LatestTransaction, LiveSnapshot, TopTransaction};

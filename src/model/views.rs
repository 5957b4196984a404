use chrono::{DateTime, Utc};
use serde::Serialize;

use super::DailyBucket;

/// Server-side rendition of the dashboard page.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    #[serde(rename = "type")]
    pub type_filter: String,
    pub range: String,
    pub total_transactions: usize,
    pub total_transactions_display: String,
    pub total_volume_sat: u64,
    pub total_volume_display: String,
    /// Transactions per day and type.
    pub transactions_by_day: Vec<DailyBucket>,
    /// Millisatoshi per day and type.
    pub volume_msat_by_day: Vec<DailyBucket>,
    pub top_transactions: Vec<TopTransaction>,
    /// Fixture records dropped because their payload did not parse.
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub fine_type: Option<String>,
    pub amount_sat: u64,
    pub amount_display: String,
    pub created_at: i64,
    pub time_ago: String,
}

/// Latest state of the live view, rendered per request from the poller's
/// last successful fetch.
#[derive(Debug, Clone, Serialize)]
pub struct LiveSnapshot {
    #[serde(rename = "type")]
    pub type_filter: String,
    pub updated_at: DateTime<Utc>,
    pub total_transactions: usize,
    pub largest_transaction_sat: u64,
    pub error_rate: f64,
    pub error_rate_display: String,
    pub hourly: Vec<HourlyPoint>,
    pub transactions: Vec<LatestTransaction>,
    pub skipped: usize,
    /// Set when the most recent poll failed and older data is being served.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyPoint {
    /// `HH:00`
    pub hour: String,
    pub count: u64,
    /// Satoshi, eight decimals.
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestTransaction {
    pub id: String,
    pub short_id: String,
    #[serde(rename = "type")]
    pub fine_type: Option<String>,
    pub amount_sat: u64,
    pub created_at: i64,
    pub time_ago: String,
}

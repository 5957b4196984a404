use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::{
    error::Error,
    model::{DailyBucket, Transaction},
};

/// `?type=` selector of the dashboard and live views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Inbound,
    Outbound,
    Internal,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Inbound => "inbound",
            TypeFilter::Outbound => "outbound",
            TypeFilter::Internal => "internal",
        }
    }

    /// Prefix match on the fine type. Untyped transactions only pass `All`.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            prefix => transaction
                .fine_type
                .as_deref()
                .is_some_and(|fine_type| fine_type.starts_with(prefix.as_str())),
        }
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|transaction| self.matches(transaction))
            .cloned()
            .collect()
    }

    pub fn parse_option(value: &Option<String>) -> Result<Self, Error> {
        value.as_deref().map_or(Ok(TypeFilter::All), str::parse)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<TypeFilter, Self::Err> {
        match value {
            "all" => Ok(TypeFilter::All),
            "inbound" => Ok(TypeFilter::Inbound),
            "outbound" => Ok(TypeFilter::Outbound),
            "internal" => Ok(TypeFilter::Internal),
            other => Err(Error::InvalidOption {
                option: format!(
                    "type '{}'. Valid options: all, inbound, outbound, internal",
                    other
                ),
            }),
        }
    }
}

/// `?range=` window applied to daily chart series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    Last7Days,
    Last30Days,
    Last90Days,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Last7Days => "7d",
            TimeRange::Last30Days => "30d",
            TimeRange::Last90Days => "90d",
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            TimeRange::Last7Days => 7,
            TimeRange::Last30Days => 30,
            TimeRange::Last90Days => 90,
        }
    }

    /// A day is in range when its UTC midnight is not older than
    /// `now - days`.
    pub fn includes(&self, bucket: &DailyBucket, now: DateTime<Utc>) -> bool {
        let cutoff = now - TimeDelta::days(self.days());
        bucket.date.and_time(NaiveTime::MIN).and_utc() >= cutoff
    }

    pub fn apply(&self, buckets: Vec<DailyBucket>, now: DateTime<Utc>) -> Vec<DailyBucket> {
        buckets
            .into_iter()
            .filter(|bucket| self.includes(bucket, now))
            .collect()
    }

    pub fn parse_option(value: &Option<String>) -> Result<Self, Error> {
        value.as_deref().map_or(Ok(TimeRange::default()), str::parse)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = Error;

    fn from_str(value: &str) -> Result<TimeRange, Self::Err> {
        match value {
            "7d" => Ok(TimeRange::Last7Days),
            "30d" => Ok(TimeRange::Last30Days),
            "90d" => Ok(TimeRange::Last90Days),
            other => Err(Error::InvalidOption {
                option: format!("range '{}'. Valid options: 7d, 30d, 90d", other),
            }),
        }
    }
}

use serde::Serialize;
use tracing::warn;

use crate::{
    error::Error,
    model::{normalize_events, sort_newest_first, Normalized, Transaction},
    provider::EventSource,
    types::{Filter, RawEvent},
};

/// One fetch of ledger transactions, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct Fetched {
    pub transactions: Vec<Transaction>,
    pub skipped: usize,
}

pub async fn fetch(source: &dyn EventSource, filter: &Filter) -> Result<Fetched, Error> {
    let events = source.fetch_events(filter).await?;
    let mut fetched = normalize(&events);
    sort_newest_first(&mut fetched.transactions);

    Ok(fetched)
}

/// Normalize keeping input order; every dropped record is logged.
pub fn normalize(events: &[RawEvent]) -> Fetched {
    let Normalized {
        transactions,
        failures,
    } = normalize_events(events);

    for failure in &failures {
        warn!("Skipping transaction: {}", failure);
    }

    Fetched {
        transactions,
        skipped: failures.len(),
    }
}

use std::cmp::Reverse;

use serde::Serialize;
use serde_json::Value;

use crate::{
    error::Error,
    helpers::{classify, is_error, is_internal, CoarseType},
    types::RawEvent,
};

/// 21 million BTC in millisatoshi. Larger amounts cannot be real.
pub const MAX_AMOUNT_MSAT: u64 = 2_100_000_000_000_000_000;

/// Ledger transaction normalized from a [`RawEvent`].
///
/// Serializes as `{id, type, pubkey, content, created_at, tags}`; `type` is
/// left out when the event carries no `t` tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub fine_type: Option<String>,
    pub pubkey: String,
    pub content: Value,
    pub created_at: i64,
    pub tags: Vec<Vec<String>>,
    /// `content.tokens.BTC`, millisatoshi.
    #[serde(skip)]
    pub amount: u64,
}

impl Transaction {
    pub fn coarse_type(&self) -> Option<CoarseType> {
        classify(self.fine_type.as_deref())
    }

    pub fn is_error(&self) -> bool {
        is_error(self.fine_type.as_deref())
    }

    pub fn is_internal(&self) -> bool {
        is_internal(self.fine_type.as_deref())
    }
}

impl TryFrom<&RawEvent> for Transaction {
    type Error = Error;

    fn try_from(event: &RawEvent) -> Result<Self, Self::Error> {
        let content = serde_json::from_str::<Value>(&event.content).map_err(
            |e| Error::PayloadParse {
                id: event.id.to_owned(),
                reason: e.to_string(),
            },
        )?;
        let amount = parse_amount(&content).ok_or_else(|| Error::PayloadParse {
            id: event.id.to_owned(),
            reason: String::from("missing integer tokens.BTC"),
        })?;
        if amount > MAX_AMOUNT_MSAT {
            return Err(Error::PayloadParse {
                id: event.id.to_owned(),
                reason: format!("tokens.BTC {} exceeds the bitcoin supply", amount),
            });
        }

        Ok(Transaction {
            id: event.id.to_owned(),
            fine_type: event.tag_value("t").map(str::to_owned),
            pubkey: event.pubkey.to_owned(),
            content,
            created_at: event.created_at,
            tags: event.tags.clone(),
            amount,
        })
    }
}

fn parse_amount(content: &Value) -> Option<u64> {
    let value = content.get("tokens")?.get("BTC")?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|amount| *amount >= 0.0 && amount.fract() == 0.0)
            .map(|amount| amount as u64)
    })
}

/// Successes and per-record failures of one normalization pass.
#[derive(Debug, Default)]
pub struct Normalized {
    pub transactions: Vec<Transaction>,
    pub failures: Vec<Error>,
}

/// Normalize every event, keeping input order. A malformed payload only
/// drops its own record.
pub fn normalize_events(events: &[RawEvent]) -> Normalized {
    let mut normalized = Normalized::default();

    for event in events {
        match Transaction::try_from(event) {
            Ok(transaction) => normalized.transactions.push(transaction),
            Err(e) => normalized.failures.push(e),
        }
    }

    normalized
}

/// Newest first; equal timestamps keep their relative order.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|transaction| Reverse(transaction.created_at));
}

use serde::{Deserialize, Serialize};

use crate::{configuration::Config, helpers::FineType};

/// NIP-01 subscription filter sent with a `REQ` frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kinds: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(rename = "#t", default, skip_serializing_if = "Vec::is_empty")]
    pub t: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Filter {
    /// Ledger transaction events with a final (`-ok` / `-error`) outcome.
    pub fn transactions(config: &Config) -> Self {
        Self {
            kinds: vec![config.transaction_kind],
            authors: vec![config.ledger_pubkey.to_owned()],
            t: FineType::QUERIED
                .iter()
                .map(|item| item.as_str().to_owned())
                .collect(),
            limit: Some(config.query_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_tag_filter_with_hash_prefix() {
        let filter = Filter {
            kinds: vec![1112],
            authors: vec![String::from("ledger")],
            t: vec![String::from("inbound-transaction-ok")],
            limit: Some(100),
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "kinds": [1112],
                "authors": ["ledger"],
                "#t": ["inbound-transaction-ok"],
                "limit": 100
            })
        );
    }

    #[test]
    fn omits_empty_fields() {
        let filter = Filter::default();
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({}));
    }

    #[test]
    fn transactions_filter_queries_final_outcomes() {
        let config = Config::from_lookup(|key| match key {
            "LEDGER_PUBKEY" => Some(String::from("ledger")),
            "RELAYS" => Some(String::from("ws://127.0.0.1:1")),
            _ => None,
        })
        .unwrap();
        let filter = Filter::transactions(&config);

        assert_eq!(filter.kinds, vec![1112]);
        assert_eq!(filter.authors, vec![String::from("ledger")]);
        assert_eq!(filter.limit, Some(100));
        assert_eq!(filter.t.len(), 6);
        assert!(filter.t.iter().all(|t| !t.ends_with("-start")));
    }
}

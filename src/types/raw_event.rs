use serde::{Deserialize, Serialize};

/// Nostr event as delivered by a relay or stored in the bundled fixture.
///
/// ```json
/// {
///   "id": "5b0c…",
///   "pubkey": "7f2a…",
///   "kind": 1112,
///   "created_at": 1709251200,
///   "tags": [["t", "inbound-transaction-ok"], ["p", "…"]],
///   "content": "{\"tokens\":{\"BTC\":100000}}",
///   "sig": "…"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEvent {
    pub id: String,
    pub pubkey: String,
    #[serde(default)]
    pub kind: u32,
    pub created_at: i64,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    pub content: String,
    #[serde(default)]
    pub sig: String,
}

impl RawEvent {
    /// Second element of the first tag named `name`.
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.first().map(String::as_str) == Some(name))
            .and_then(|tag| tag.get(1))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(tags: Vec<Vec<&str>>) -> RawEvent {
        RawEvent {
            id: String::from("aa11"),
            pubkey: String::from("ledger"),
            kind: 1112,
            created_at: 1_709_251_200,
            tags: tags
                .into_iter()
                .map(|tag| tag.into_iter().map(String::from).collect())
                .collect(),
            content: String::from("{}"),
            sig: String::new(),
        }
    }

    #[test]
    fn tag_value_returns_first_match() {
        let ev = event(vec![
            vec!["p", "someone"],
            vec!["t", "inbound-transaction-ok"],
            vec!["t", "outbound-transaction-ok"],
        ]);
        assert_eq!(ev.tag_value("t"), Some("inbound-transaction-ok"));
        assert_eq!(ev.tag_value("p"), Some("someone"));
    }

    #[test]
    fn tag_value_ignores_malformed_tags() {
        let ev = event(vec![vec![], vec!["t"]]);
        assert_eq!(ev.tag_value("t"), None);
        assert_eq!(ev.tag_value("e"), None);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let ev: RawEvent = serde_json::from_str(
            r#"{"id":"x","pubkey":"p","created_at":1,"content":"{}"}"#,
        )
        .unwrap();
        assert_eq!(ev.kind, 0);
        assert!(ev.tags.is_empty());
        assert!(ev.sig.is_empty());
    }
}

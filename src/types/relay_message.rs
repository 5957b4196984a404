use serde_json::{json, Value};

use super::{Filter, RawEvent};

/// Relay to client frames handled by the event source.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayMessage {
    Event { subscription: String, event: RawEvent },
    EndOfStoredEvents { subscription: String },
    Notice { message: String },
    Closed { subscription: String, message: String },
    Unknown,
}

impl RelayMessage {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value = serde_json::from_str::<Value>(text)?;
        let Some(items) = value.as_array() else {
            return Ok(RelayMessage::Unknown);
        };

        let string_at =
            |index: usize| items.get(index).and_then(Value::as_str).map(str::to_owned);

        let message = match items.first().and_then(Value::as_str) {
            Some("EVENT") if items.len() >= 3 => match string_at(1) {
                Some(subscription) => {
                    let event = serde_json::from_value::<RawEvent>(items[2].clone())?;
                    RelayMessage::Event {
                        subscription,
                        event,
                    }
                },
                None => RelayMessage::Unknown,
            },
            Some("EOSE") => match string_at(1) {
                Some(subscription) => {
                    RelayMessage::EndOfStoredEvents { subscription }
                },
                None => RelayMessage::Unknown,
            },
            Some("NOTICE") => RelayMessage::Notice {
                message: string_at(1).unwrap_or_default(),
            },
            Some("CLOSED") => match string_at(1) {
                Some(subscription) => RelayMessage::Closed {
                    subscription,
                    message: string_at(2).unwrap_or_default(),
                },
                None => RelayMessage::Unknown,
            },
            _ => RelayMessage::Unknown,
        };

        Ok(message)
    }
}

pub fn request_frame(subscription: &str, filter: &Filter) -> String {
    json!(["REQ", subscription, filter]).to_string()
}

pub fn close_frame(subscription: &str) -> String {
    json!(["CLOSE", subscription]).to_string()
}

use std::{fs, path::Path, sync::Arc};

use serde_json::Value;
use tracing::{info, warn};

use crate::{error::Error, types::RawEvent};

/// Bundled transaction events, read once at startup.
///
/// `records` is the file's array as written, `events` the subset that
/// parses as [`RawEvent`].
#[derive(Debug, Clone)]
pub struct Fixture {
    records: Arc<Vec<Value>>,
    events: Arc<Vec<RawEvent>>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Fixture, Error> {
        let data = fs::read_to_string(path)?;
        let fixture = Self::from_json(&data)?;
        info!(
            "Fixture loaded from {}: {} records",
            path.display(),
            fixture.records.len()
        );
        Ok(fixture)
    }

    pub fn from_json(data: &str) -> Result<Fixture, Error> {
        let records: Vec<Value> = serde_json::from_str(data)?;
        let mut events = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            match serde_json::from_value::<RawEvent>(record.clone()) {
                Ok(event) => events.push(event),
                Err(e) => warn!("Fixture record {} is not an event: {}", index, e),
            }
        }

        Ok(Fixture {
            records: Arc::new(records),
            events: Arc::new(events),
        })
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn keeps_records_and_skips_non_events() {
        let fixture = Fixture::from_json(
            r#"[
                {"id":"a","pubkey":"p","kind":1112,"created_at":1,"tags":[],"content":"{}","sig":""},
                {"id":"b"},
                42
            ]"#,
        )
        .unwrap();

        assert_eq!(fixture.records().len(), 3);
        assert_eq!(fixture.events().len(), 1);
        assert_eq!(fixture.events()[0].id, "a");
    }

    #[test]
    fn rejects_non_array_documents() {
        assert!(matches!(
            Fixture::from_json(r#"{"id":"a"}"#),
            Err(Error::JsonError(_))
        ));
    }

    #[test]
    fn loads_bundled_fixture() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("mock/transactions.json");
        let fixture = Fixture::load(&path).unwrap();

        assert!(!fixture.events().is_empty());
        assert_eq!(fixture.records().len(), fixture.events().len());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Fixture::load(Path::new("/nonexistent/transactions.json")),
            Err(Error::Io(_))
        ));
    }
}

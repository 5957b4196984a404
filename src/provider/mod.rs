use std::fmt;

use async_trait::async_trait;

use crate::{
    error::Error,
    types::{Filter, RawEvent},
};

pub use self::{fixture::Fixture, relay::RelayPool};

mod fixture;
mod relay;

/// Anything that can answer a relay filter with raw events. The production
/// source is [`RelayPool`].
#[async_trait]
pub trait EventSource: Send + Sync + fmt::Debug {
    async fn fetch_events(&self, filter: &Filter) -> Result<Vec<RawEvent>, Error>;
}

use chrono::NaiveDate;
use serde::Serialize;

use crate::helpers::CoarseType;

/// One accumulator per coarse type. Counts or millisatoshi depending on the
/// aggregation strategy.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TypeTotals {
    pub internal: u64,
    pub inbound: u64,
    pub outbound: u64,
}

impl TypeTotals {
    pub fn get(&self, coarse: CoarseType) -> u64 {
        match coarse {
            CoarseType::Internal => self.internal,
            CoarseType::Inbound => self.inbound,
            CoarseType::Outbound => self.outbound,
        }
    }

    pub fn get_mut(&mut self, coarse: CoarseType) -> &mut u64 {
        match coarse {
            CoarseType::Internal => &mut self.internal,
            CoarseType::Inbound => &mut self.inbound,
            CoarseType::Outbound => &mut self.outbound,
        }
    }

    pub fn total(&self) -> u64 {
        self.internal
            .saturating_add(self.inbound)
            .saturating_add(self.outbound)
    }
}

/// Serializes as `{"date": "YYYY-MM-DD", "internal": .., "inbound": .., "outbound": ..}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub totals: TypeTotals,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HourlyBucket {
    pub hour: u32,
    #[serde(flatten)]
    pub totals: TypeTotals,
}

pub use self::{
    aggregation::{aggregate_daily, aggregate_hourly, Strategy},
    classification::{classify, is_error, is_internal, CoarseType, FineType},
    filters::{TimeRange, TypeFilter},
};

pub mod aggregation;
pub mod classification;
pub mod filters;
pub mod formatting;
pub mod statistics;

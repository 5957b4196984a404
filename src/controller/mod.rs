//! HTTP endpoints under `/api`.

pub mod dashboard;
pub mod error;
pub mod fixture;
pub mod live;
pub mod transactions;

pub use self::error::ApiError;

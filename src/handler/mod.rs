pub mod dashboard;
pub mod live;
pub mod live_poller;
pub mod transactions;

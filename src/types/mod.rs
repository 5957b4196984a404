pub use self::{
    filter::Filter,
    raw_event::RawEvent,
    relay_message::{close_frame, request_frame, RelayMessage},
};

mod filter;
mod raw_event;
mod relay_message;

//! Record gateway: the write boundary of the news store.
//!
//! # Responsibility
//! - Expose `register_agency` and `record_news_item`.
//! - Convert every expected failure into a `GatewayOutcome`.

mod outcome;
mod record_gateway;

pub use outcome::{GatewayOutcome, Operation};
pub use record_gateway::RecordGateway;

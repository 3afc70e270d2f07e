//! Counter storage for rate limiting

pub mod rate_limit_store;


pub use rate_limit_store::InMemoryRateLimitStore;

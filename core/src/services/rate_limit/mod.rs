//! Fixed-window rate limiting over a pluggable counter store

mod service;


pub use service::{RateLimitDecision, RateLimiter};

//! Persistence implementations
//!
//! The stores keep data in process memory behind `tokio` locks. They enforce
//! the stored model the way a document database would and report violations
//! as `StorageError` kinds.

pub mod memory;

#[cfg(test)]
mod tests;

pub use memory::{InMemoryProductRepository, InMemoryUserRepository};

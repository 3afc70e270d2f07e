//! Type definitions module with domain-specific sub-modules
//!
//! This module organizes types into logical categories:
//! - `pagination` - Pagination for list endpoints
//! - `response` - Success and error envelopes written on the wire

pub mod pagination;
pub mod response;

// Re-export commonly used types at module level
pub use pagination::{Pagination, PaginationMeta};
pub use response::{ErrorEnvelope, ResponseStatus, SuccessEnvelope, ValidationIssue};

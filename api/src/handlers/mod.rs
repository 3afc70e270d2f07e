pub mod error;
pub mod response;

pub use error::{normalize, ApiError, Normalized};
pub use response::Emit;

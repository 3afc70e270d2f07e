//! Domain entities representing core business objects.

pub mod product;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use product::{NewProduct, Product, ProductChanges};
pub use token::Claims;
pub use user::{Role, User};

mod product_repository;
mod user_repository;

pub use product_repository::InMemoryProductRepository;
pub use user_repository::InMemoryUserRepository;

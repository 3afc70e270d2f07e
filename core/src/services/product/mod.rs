//! Product catalog operations

mod service;

#[cfg(test)]
mod tests;

pub use service::ProductService;

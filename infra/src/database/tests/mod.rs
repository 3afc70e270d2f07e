#[cfg(test)]
mod product_repository_tests;

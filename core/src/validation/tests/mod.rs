//! Tests for the schema validator

#[cfg(test)]
mod schema_tests;

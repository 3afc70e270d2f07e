//! Tests for the failure taxonomy

#[cfg(test)]
mod domain_error_tests;
#[cfg(test)]
mod failure_tests;

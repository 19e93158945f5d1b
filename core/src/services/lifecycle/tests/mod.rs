//! Tests for the credential lifecycle manager

#[cfg(test)]
mod manager_tests;

//! Property-based tests

mod composition;

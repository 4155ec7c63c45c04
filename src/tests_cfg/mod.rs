//! Shared fixtures for unit and integration tests. Compiled for tests and
//! with the `testing` feature.

pub mod fixtures;

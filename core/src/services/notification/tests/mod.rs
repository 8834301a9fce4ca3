//! Tests for guardian notification dispatch

pub(crate) mod mocks;

//! Tests for guardian token services

mod issuer_tests;
mod registry_tests;

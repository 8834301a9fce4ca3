//! Unit tests for the database module

mod mysql_repository_tests;

//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures never touch the database. They provide default values
//! for factories and raw data for serialization tests.

pub mod payload;

//! HTTP request handlers for the dashboard API.
//!
//! Handlers authenticate through the session, call a service and convert the result
//! to a DTO.

pub mod auth;
pub mod backup;

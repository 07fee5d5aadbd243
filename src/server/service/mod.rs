//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) and bot command layers and the data (repository) layer. Services are
//! responsible for:
//!
//! - **Business Logic**: Snapshot capture, restore planning and execution
//! - **Orchestration**: Coordinating repository calls with Discord through a `GuildGateway`
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod auth;
pub mod backup;
pub mod schedule;

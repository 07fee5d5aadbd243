//! Domain models and operation parameter types.
//!
//! Models here are what the service layer works with. Entity models from the
//! `entity` crate are converted at the data layer boundary and never leak past it.

pub mod guild;
pub mod restore;
pub mod schedule;
pub mod snapshot;
pub mod user;

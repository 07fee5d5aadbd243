//! Database repository layer.
//!
//! Repositories wrap SeaORM queries for each persisted concern and convert entity
//! models into domain models at this boundary, so nothing above the data layer sees
//! an `entity::*::Model`.

pub mod schedule;
pub mod snapshot;

#[cfg(test)]
mod test;

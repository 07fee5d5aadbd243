//! Session wrappers and the authentication guard used by API handlers.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;

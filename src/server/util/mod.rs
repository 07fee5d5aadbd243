//! Small shared helpers.

pub mod parse;

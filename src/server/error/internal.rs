use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Results a in 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored enum column holds a value this build doesn't know about
    ///
    /// Happens when a snapshot kind or schedule frequency column was written by a
    /// different version of the application.
    #[error("Unknown {column} value '{value}' in database")]
    UnknownColumnValue {
        /// Name of the column holding the value
        column: &'static str,
        /// The unrecognised value
        value: String,
    },
}

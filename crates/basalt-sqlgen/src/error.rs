//! Error types for statement synthesis.

/// Errors that can occur while synthesizing statement text.
///
/// Everything here is local and recoverable: a failure is reported back to
/// the host keyed to the offending field, never propagated as a fatal
/// error. Unparsable type strings are deliberately not an error at all;
/// they pass through synthesis verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlGenError {
    /// A length entry was empty, non-numeric, or smaller than one.
    #[error("invalid length '{value}' for column '{column}': expected a positive integer")]
    InvalidLength {
        /// Column the length belongs to.
        column: String,
        /// The raw text that failed validation.
        value: String,
    },

    /// CRUD synthesis needs at least one result row to work from.
    #[error("cannot derive a statement from an empty result set")]
    EmptyResultSet,
}

/// Result type for synthesis operations.
pub type Result<T> = std::result::Result<T, SqlGenError>;

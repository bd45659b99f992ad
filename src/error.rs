// Error taxonomy for scan operations.
//
// Flat set of failure kinds; no recovery is attempted internally. Every
// enforcement failure leaves the caller's output buffer untouched and the
// stream positioned wherever reading stopped.

use thiserror::Error;

/// Errors produced by [`FieldScanner::scan`](crate::FieldScanner::scan) and
/// [`RowScanner::scan`](crate::RowScanner::scan), and by configuration
/// setters that validate their input.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A bad value was passed to a scan call or a configuration setter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A zero-length field was finalized. Raised between two consecutive
    /// delimiters, after a leading delimiter, or when a delimiter is
    /// immediately followed by a terminator or end of stream.
    #[error("empty field at column {column}")]
    EmptyField { column: usize },

    /// Fewer fields than required were present before a terminator or end
    /// of stream, under an enforcing policy.
    #[error("missing field(s): read {found} of {expected} expected fields")]
    MissingFields { found: usize, expected: usize },

    /// More fields than allowed were present, under an enforcing policy.
    #[error("too many fields: expected no more than {max}")]
    UnexpectedFields { max: usize },

    /// A transform lookup was requested for a column with no registered
    /// transform.
    #[error("no transform registered for column {0}")]
    NotFound(usize),

    /// A registered field transform failed. The underlying error is passed
    /// through uninterpreted.
    #[error(transparent)]
    Transform(Box<dyn std::error::Error + Send + Sync>),

    /// The underlying stream failed to produce a byte.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

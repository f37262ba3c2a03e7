//! Error types for loading emitter definitions.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while reading emitter definitions.
///
/// Line numbers are 1-based. The search itself never fails: it only ever sees
/// well-formed emitters.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line does not look like `pos=<X,Y,Z>, r=R`.
    #[error("line {line}: expected `pos=<X,Y,Z>, r=R`, got {content:?}")]
    Malformed { line: usize, content: String },

    /// A numeric field matched the pattern but does not fit in an `i64`.
    #[error("line {line}: invalid number")]
    InvalidNumber {
        line: usize,
        #[source]
        source: ParseIntError,
    },

    /// A coordinate or radius is too large to search safely.
    #[error("line {line}: value {value} exceeds the supported magnitude of {limit}")]
    OutOfRange { line: usize, value: i64, limit: i64 },

    #[error("failed to read emitters: {0}")]
    Io(#[from] std::io::Error),
}

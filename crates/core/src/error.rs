//! Library-level error type for fallible operations outside the diagnostic
//! model (§10.2).

use thiserror::Error;

/// A failure from an operation that sits above the diagnostic model: these
/// occur before there's a coherent source buffer to attach a [`Diagnostic`]
/// to, so they're reported as an ordinary `Result::Err` instead.
///
/// [`Diagnostic`]: talus_diagnostics::Diagnostic
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The supplied bytes are not valid UTF-8.
    #[error("source is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

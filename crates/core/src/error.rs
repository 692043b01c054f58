//! Error types for color parsing.

use thiserror::Error;

/// Errors produced while parsing a recognized color descriptor.
///
/// Unrecognized descriptors are not errors: the dispatcher reports them as
/// `Ok(None)`. A `ParseError` means the input looked like a known format
/// (a `#` prefix, an `rgb(` function, ...) but could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A fixed-arity capture pattern did not match the input.
    #[error("input '{input}' does not match pattern {pattern}")]
    NoMatch { pattern: String, input: String },

    /// A hex group contained non-hex characters or had the wrong width.
    #[error("invalid hex digits: '{0}'")]
    InvalidHex(String),

    /// A functional notation used a different function name than expected.
    #[error("expected {expected}() function, got '{input}'")]
    UnknownFunction { expected: String, input: String },

    /// Wrong number of components in a functional notation or array.
    #[error("expected {expected} components, got {got}")]
    Arity { expected: String, got: usize },

    /// A component token could not be read as a number.
    #[error("invalid numeric component: '{0}'")]
    InvalidNumber(String),

    /// A component carried a unit not allowed in its position.
    #[error("unexpected unit in {channel} component: '{token}'")]
    UnexpectedUnit { channel: String, token: String },

    /// A functional notation was structurally broken (missing parenthesis,
    /// misplaced separator).
    #[error("malformed color function: '{0}'")]
    Malformed(String),

    /// A keyword was looked up that is not in the named-color table.
    #[error("unknown color name: '{0}'")]
    UnknownName(String),

    /// A string was required to name a color but no format recognized it.
    #[error("unrecognized color: '{0}'")]
    Unrecognized(String),
}

//! Failures of a `chroma` invocation and their exit codes.
//!
//! Scripts can tell a typo in a color (`#12`, exit 10) from a word that is
//! no color at all (`blurple`, exit 11). Clap's own usage errors exit 2
//! before [`CliError`] is involved.

use chroma_core::ParseError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The descriptor looked like a known format but could not be read.
    Parse(ParseError),
    /// No format recognized the descriptor; holds it verbatim.
    Unrecognized(String),
    /// A flag or JSON descriptor that could not be decoded.
    Input(String),
    /// Writing `--json` output failed.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Parse(_) => 10,
            CliError::Unrecognized(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "{e}"),
            CliError::Unrecognized(input) => write!(f, "not a color: {input:?}"),
            CliError::Input(msg) | CliError::Serialization(msg) => f.write_str(msg),
        }
    }
}

/// `FromStr`-style callers report "no match" as [`ParseError::Unrecognized`];
/// that keeps its own exit code here.
impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Unrecognized(input) => CliError::Unrecognized(input),
            other => CliError::Parse(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

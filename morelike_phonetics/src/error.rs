// Load-time errors for the phonetic data files.
//
// Only loading can fail. Once a dictionary or pattern set is built, lookups
// and syllabification are infallible: an unknown word is an empty result,
// not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing or reading dictionary and pattern data.
#[derive(Debug, Error)]
pub enum PhoneticsError {
    /// A phoneme token that is not uppercase ARPABET with an optional 0-2 digit.
    #[error("invalid phoneme token `{token}`")]
    InvalidPhoneme { token: String },

    /// A dictionary line that could not be parsed.
    #[error("dictionary line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },

    /// A hyphenation pattern or directive that could not be parsed.
    #[error("pattern line {line}: {reason}")]
    MalformedPattern { line: usize, reason: String },

    /// The data file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

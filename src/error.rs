//! Error types for semejar operations.
//!
//! Failures are rare by design: per-pair scoring never errors (numeric edge
//! cases degrade to zero similarity) and catalog entries that cannot be
//! vectorized are silently excluded from the corpus. What remains fatal is a
//! vector space that cannot be fit at all and a persistence sink that refuses
//! a result mid-run.

use std::fmt;

/// Main error type for semejar operations.
///
/// # Examples
///
/// ```
/// use semejar::error::SemejarError;
///
/// let err = SemejarError::EmptyCorpus {
///     space: "tag".to_string(),
/// };
/// assert!(err.to_string().contains("tag"));
/// ```
#[derive(Debug)]
pub enum SemejarError {
    /// No documents were available to fit a vector space.
    EmptyCorpus {
        /// Which vector space was being fit ("tag" or "description")
        space: String,
    },

    /// Fitting a vector space produced no terms at all.
    EmptyVocabulary {
        /// Which vector space was being fit ("tag" or "description")
        space: String,
    },

    /// The persistence sink rejected a write. Fatal for the run.
    Sink {
        /// Sink-provided failure description
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SemejarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemejarError::EmptyCorpus { space } => {
                write!(f, "cannot fit {space} vector space: corpus is empty")
            }
            SemejarError::EmptyVocabulary { space } => {
                write!(f, "cannot fit {space} vector space: no terms in corpus")
            }
            SemejarError::Sink { message } => write!(f, "sink failure: {message}"),
            SemejarError::Io(e) => write!(f, "I/O error: {e}"),
            SemejarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SemejarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SemejarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SemejarError {
    fn from(err: std::io::Error) -> Self {
        SemejarError::Io(err)
    }
}

impl From<&str> for SemejarError {
    fn from(msg: &str) -> Self {
        SemejarError::Other(msg.to_string())
    }
}

impl From<String> for SemejarError {
    fn from(msg: String) -> Self {
        SemejarError::Other(msg)
    }
}

impl SemejarError {
    /// Create a sink failure error from any displayable cause.
    #[must_use]
    pub fn sink(cause: impl fmt::Display) -> Self {
        Self::Sink {
            message: cause.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SemejarError>;

//! Error types for the public surface of the crate.
//!
//! Internally we use `anyhow` (see `Res`) and attach context as errors bubble up. At the public
//! boundary, errors are tagged with an `ErrorType` so that callers can tell a failed network call
//! apart from a rejected file or a submission that was attempted too early.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The result type used inside the crate and by `Store` implementations.
pub type Res<T> = std::result::Result<T, anyhow::Error>;

/// The result type returned by controllers and commands.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A call into the remote store was rejected.
    Transport,
    /// Input was refused locally, e.g. a proof file with a disallowed media type.
    Validation,
    /// A record from the store could not be interpreted.
    Corruption,
    /// An operation was attempted before the state it depends on existed.
    Precondition,
    /// The configuration directory or file is missing or invalid.
    Config,
    /// The session store holds no usable identity.
    Session,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error tagged with its `ErrorType`. The message of the wrapped error, including its context
/// chain, is the only diagnostic a remote failure carries, so `Display` prints all of it.
pub struct Error {
    kind: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(kind: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            kind,
            inner: inner.into(),
        }
    }

    pub fn kind(&self) -> ErrorType {
        self.kind
    }

    /// The full message, e.g. `Unable to list bills: Erreur 404`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.inner)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.kind, self.inner)
    }
}

impl std::error::Error for Error {}

/// Converts an internal result into a public `Result` tagged with an `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, kind: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, kind: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(kind, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_display_includes_context_chain() {
        let result: Res<()> = Err(anyhow!("Erreur 500")).context("Unable to update bill");
        let err = result.pub_result(ErrorType::Transport).unwrap_err();
        assert_eq!(err.kind(), ErrorType::Transport);
        assert_eq!(err.message(), "Unable to update bill: Erreur 500");
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::Precondition.to_string(), "precondition");
        assert_eq!(
            "transport".parse::<ErrorType>().unwrap(),
            ErrorType::Transport
        );
    }
}

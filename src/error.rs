use std::fmt;

/// Errors that can occur while wiring the access gate into a host.
///
/// Gate outcomes (loading, redirect, blocked, allow) are not errors; they are
/// [`GateDecision`](crate::GateDecision) values. This type only covers
/// misconfiguration and malformed textual input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A session was requested from a scope with no provider attached.
    MissingSessionProvider,
    /// A role name did not match `buyer`, `supplier` or `both`.
    InvalidRole(String),
    /// A verification status did not match `pending`, `verified` or `rejected`.
    InvalidVerificationStatus(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingSessionProvider => write!(
                f,
                "No session provider in scope: the access gate must run inside a session-providing context"
            ),
            Error::InvalidRole(raw) => write!(f, "Invalid role '{}'", raw),
            Error::InvalidVerificationStatus(raw) => {
                write!(f, "Invalid verification status '{}'", raw)
            }
        }
    }
}

impl std::error::Error for Error {}

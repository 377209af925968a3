//! Audit event schema.
//!
//! One event is recorded per guard check. Events carry identifiers and the
//! decision only, never profile data.

use std::fmt;

use crate::decision::{DecisionKind, GateDecision};

/// A record of one access decision.
///
/// # Example
///
/// ```
/// use access_gate::audit::AuditEvent;
/// use access_gate::{BlockReason, DecisionKind, GateDecision};
///
/// let decision = GateDecision::Blocked(BlockReason::Pending);
/// let event = AuditEvent::from_decision("/orders", Some("u-1"), &decision);
///
/// assert_eq!(event.outcome(), DecisionKind::Blocked);
/// assert_eq!(event.reason(), Some("pending"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Path the visitor tried to reach
    path: String,
    /// Account identifier; None for anonymous or still-loading sessions
    user_id: Option<String>,
    /// Coarse outcome
    outcome: DecisionKind,
    /// Block reason code, for blocked outcomes
    reason: Option<String>,
}

impl AuditEvent {
    /// Creates an event with no reason attached.
    pub fn new(
        path: impl Into<String>,
        user_id: Option<impl Into<String>>,
        outcome: DecisionKind,
    ) -> Self {
        Self {
            path: path.into(),
            user_id: user_id.map(Into::into),
            outcome,
            reason: None,
        }
    }

    /// Creates an event describing `decision`.
    pub fn from_decision(
        path: impl Into<String>,
        user_id: Option<impl Into<String>>,
        decision: &GateDecision,
    ) -> Self {
        let event = Self::new(path, user_id, decision.kind());
        match decision.block_reason() {
            Some(reason) => event.with_reason(reason.code()),
            None => event,
        }
    }

    /// Sets the reason code.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns the requested path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the account identifier, if signed in.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> DecisionKind {
        self.outcome
    }

    /// Returns the reason code, if set.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[outcome={}, path={}, user={}",
            self.outcome,
            self.path,
            self.user_id.as_deref().unwrap_or("<none>")
        )?;

        if let Some(reason) = &self.reason {
            write!(f, ", reason={}", reason)?;
        }

        write!(f, "]")
    }
}

//! Recorded guard decisions, queryable by path and outcome.

use super::AuditEvent;
use crate::decision::DecisionKind;
use std::cell::RefCell;

/// Decision log shared by the guards of one application.
///
/// A guard holding the trail appends one event per check, in check order.
/// The query methods answer the questions hosts ask of it: what happened on
/// a path, how often visitors were turned away, and what the latest
/// decision was. [`drain`](Self::drain) hands everything over to a
/// persistent store and starts a fresh log.
///
/// # Example
///
/// ```
/// use access_gate::audit::{AuditEvent, AuditTrail};
/// use access_gate::DecisionKind;
///
/// let trail = AuditTrail::new();
/// trail.record(AuditEvent::new("/orders", None::<String>, DecisionKind::Redirect));
/// trail.record(AuditEvent::new("/orders", Some("u-1"), DecisionKind::Allow));
///
/// assert_eq!(trail.count(DecisionKind::Redirect), 1);
/// assert_eq!(trail.for_path("/orders").len(), 2);
/// ```
pub struct AuditTrail {
    log: RefCell<Vec<AuditEvent>>,
}

impl AuditTrail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self {
            log: RefCell::new(Vec::new()),
        }
    }

    /// Appends one decision.
    pub fn record(&self, event: AuditEvent) {
        self.log.borrow_mut().push(event);
    }

    /// Returns every decision, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.log.borrow().clone()
    }

    /// Returns the outcome of every decision, oldest first.
    pub fn outcomes(&self) -> Vec<DecisionKind> {
        self.log.borrow().iter().map(AuditEvent::outcome).collect()
    }

    /// Returns the decisions taken for exactly `path`.
    pub fn for_path(&self, path: &str) -> Vec<AuditEvent> {
        self.log
            .borrow()
            .iter()
            .filter(|event| event.path() == path)
            .cloned()
            .collect()
    }

    /// Returns the decisions with the given outcome.
    pub fn with_outcome(&self, outcome: DecisionKind) -> Vec<AuditEvent> {
        self.log
            .borrow()
            .iter()
            .filter(|event| event.outcome() == outcome)
            .cloned()
            .collect()
    }

    /// Counts the decisions with the given outcome.
    pub fn count(&self, outcome: DecisionKind) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|event| event.outcome() == outcome)
            .count()
    }

    /// Returns the most recent decision.
    pub fn last(&self) -> Option<AuditEvent> {
        self.log.borrow().last().cloned()
    }

    /// Returns the number of decisions.
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Returns true if no decision has been recorded.
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Takes every decision out, leaving the trail empty.
    pub fn drain(&self) -> Vec<AuditEvent> {
        self.log.take()
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

//! Audit trail of access decisions.
//!
//! This module provides:
//! - `AuditEvent`: what was decided for which path and account
//! - `AuditTrail`: in-memory audit event recorder
//!
//! The route guard emits every event through `tracing` under the
//! `access_gate::audit` target and, when a trail is attached, records it.

mod event;
mod trail;

pub use event::AuditEvent;
pub use trail::AuditTrail;

/// Emits `event` through tracing and records it to `trail` if present.
pub(crate) fn emit(event: &AuditEvent, trail: Option<&AuditTrail>) {
    tracing::info!(
        target: "access_gate::audit",
        path = %event.path(),
        user_id = ?event.user_id(),
        outcome = %event.outcome(),
        reason = ?event.reason(),
        "access decision"
    );

    if let Some(trail) = trail {
        trail.record(event.clone());
    }
}

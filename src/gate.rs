use crate::{
    decision::{BlockReason, GateDecision},
    policy::{GateRequirement, PolicyReq},
    session::Session,
};

/// Evaluates a session snapshot against a requirement.
///
/// Checks run in a fixed order and the first one that applies wins:
///
/// 1. a loading session yields [`GateDecision::Loading`], whatever else it holds
/// 2. a session that is not authenticated, or is authenticated without a user
///    record, yields [`GateDecision::RedirectToLogin`] carrying `current_path`
/// 3. an unverified account yields [`BlockReason::Pending`] or
///    [`BlockReason::Rejected`] when the requirement demands verification
/// 4. an account type that does not satisfy `required_role` yields
///    [`BlockReason::RoleMismatch`]
/// 5. otherwise [`GateDecision::Allow`]
///
/// The function is pure and total: it performs no I/O and never panics.
///
/// # Examples
///
/// ```
/// use access_gate::{evaluate, GateDecision, GateRequirement, Session};
///
/// let decision = evaluate(&Session::anonymous(), &GateRequirement::default(), "/orders");
///
/// assert_eq!(
///     decision,
///     GateDecision::RedirectToLogin { return_path: "/orders".to_string() }
/// );
/// ```
pub fn evaluate(
    session: &Session,
    requirement: &GateRequirement,
    current_path: &str,
) -> GateDecision {
    if session.is_loading {
        return GateDecision::Loading;
    }

    // A flag without a record (or a record without the flag) is not trusted.
    let user = match session.signed_in_user() {
        Some(user) => user,
        None => {
            return GateDecision::RedirectToLogin {
                return_path: current_path.to_string(),
            }
        }
    };

    if requirement.require_verified {
        if let Some(reason) = BlockReason::from_verification(user.verification_status) {
            return GateDecision::Blocked(reason);
        }
    }

    if let Some(required) = requirement.required_role {
        if !user.user_type.satisfies(required) {
            return GateDecision::Blocked(BlockReason::RoleMismatch {
                required,
                actual: user.user_type,
            });
        }
    }

    GateDecision::Allow
}

/// The access gate for one protected region.
///
/// `AccessGate` holds the region's [`GateRequirement`] and evaluates session
/// snapshots against it. It keeps no other state, so the same gate can be
/// evaluated on every render or navigation.
///
/// # Examples
///
/// ```
/// use access_gate::{
///     AccessGate, BlockReason, GateDecision, RequireRole, Role, Session, User,
///     VerificationStatus,
/// };
///
/// let gate = AccessGate::new().require(RequireRole(Role::Buyer));
///
/// let supplier = User::new("u-7", "Sam", Role::Supplier, VerificationStatus::Verified);
/// let decision = gate.evaluate(&Session::authenticated(supplier), "/cart");
///
/// assert_eq!(
///     decision,
///     GateDecision::Blocked(BlockReason::RoleMismatch {
///         required: Role::Buyer,
///         actual: Role::Supplier,
///     })
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessGate {
    requirement: GateRequirement,
}

impl AccessGate {
    /// Creates a gate with the default requirement (signed in, verified).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gate for an explicit requirement.
    pub fn with_requirement(requirement: GateRequirement) -> Self {
        Self { requirement }
    }

    /// Adds a policy to the gate's requirement.
    ///
    /// See [`GateRequirement::require`].
    pub fn require(mut self, policy: impl Into<PolicyReq>) -> Self {
        self.requirement = self.requirement.require(policy);
        self
    }

    /// Returns the requirement this gate enforces.
    pub fn requirement(&self) -> &GateRequirement {
        &self.requirement
    }

    /// Evaluates `session` for a visit to `current_path`.
    pub fn evaluate(&self, session: &Session, current_path: &str) -> GateDecision {
        evaluate(session, &self.requirement, current_path)
    }
}

impl From<GateRequirement> for AccessGate {
    fn from(requirement: GateRequirement) -> Self {
        Self::with_requirement(requirement)
    }
}

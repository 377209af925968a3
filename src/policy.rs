use crate::session::Role;

/// The requirements a protected region declares.
///
/// `required_role` of `None` admits any signed-in account that passes the
/// verification check. `require_verified` defaults to `true`.
///
/// # Examples
///
/// ```
/// use access_gate::{GateRequirement, RequireRole, RequireVerified, Role};
///
/// let req = GateRequirement::new()
///     .require(RequireRole(Role::Supplier))
///     .require(RequireVerified(false));
///
/// assert_eq!(req.required_role, Some(Role::Supplier));
/// assert!(!req.require_verified);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateRequirement {
    /// Role the account must satisfy, if any
    pub required_role: Option<Role>,
    /// Whether the account must be verified
    pub require_verified: bool,
}

impl Default for GateRequirement {
    fn default() -> Self {
        Self {
            required_role: None,
            require_verified: true,
        }
    }
}

impl GateRequirement {
    /// Creates the default requirement: signed in and verified, any role.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a verified account satisfying `role`.
    pub fn role(role: Role) -> Self {
        Self::new().require(RequireRole(role))
    }

    /// Adds a policy to the requirement.
    ///
    /// A later policy of the same kind replaces an earlier one, so
    /// `.require(RequireRole(Buyer)).require(RequireRole(Supplier))` requires
    /// `Supplier`.
    pub fn require(mut self, policy: impl Into<PolicyReq>) -> Self {
        match policy.into() {
            PolicyReq::Role(role) => self.required_role = Some(role),
            PolicyReq::Verified(required) => self.require_verified = required,
        }
        self
    }
}

/// A single policy that narrows a [`GateRequirement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyReq {
    /// Requires an account type compatible with the role
    Role(Role),
    /// Requires (or waives) account verification
    Verified(bool),
}

/// Policy requiring an account type compatible with the given role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireRole(pub Role);

/// Policy setting whether the account must be verified.
///
/// `RequireVerified(false)` opens a region to pending and rejected accounts,
/// for example a "verification status" page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireVerified(pub bool);

impl From<RequireRole> for PolicyReq {
    fn from(policy: RequireRole) -> Self {
        PolicyReq::Role(policy.0)
    }
}

impl From<RequireVerified> for PolicyReq {
    fn from(policy: RequireVerified) -> Self {
        PolicyReq::Verified(policy.0)
    }
}

impl From<Role> for PolicyReq {
    fn from(role: Role) -> Self {
        PolicyReq::Role(role)
    }
}

//! Session snapshot types read by the gate.
//!
//! These mirror what a session provider knows about the current visitor.
//! The gate never mutates them; it only reads a snapshot.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Coarse account category used for access partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Purchasing account
    Buyer,
    /// Selling account
    Supplier,
    /// Account that both buys and sells
    Both,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 3] = [Role::Buyer, Role::Supplier, Role::Both];

    /// Returns true if an account of this type may enter a region that
    /// requires `required`.
    ///
    /// `Both` satisfies every requirement; `Buyer` and `Supplier` satisfy only
    /// themselves. A region requiring `Both` admits only `Both`.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_gate::Role;
    ///
    /// assert!(Role::Both.satisfies(Role::Buyer));
    /// assert!(!Role::Supplier.satisfies(Role::Buyer));
    /// assert!(!Role::Buyer.satisfies(Role::Both));
    /// ```
    pub fn satisfies(self, required: Role) -> bool {
        match (required, self) {
            (Role::Buyer, Role::Buyer | Role::Both) => true,
            (Role::Supplier, Role::Supplier | Role::Both) => true,
            (Role::Both, Role::Both) => true,
            _ => false,
        }
    }

    /// Returns the lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Supplier => "supplier",
            Role::Both => "both",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "supplier" => Ok(Role::Supplier),
            "both" => Ok(Role::Both),
            _ => Err(Error::InvalidRole(s.to_string())),
        }
    }
}

/// Account approval state, distinct from authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationStatus {
    /// Awaiting review
    Pending,
    /// Approved
    Verified,
    /// Declined; may be resubmitted
    Rejected,
}

impl VerificationStatus {
    /// All statuses, in declaration order.
    pub const ALL: [VerificationStatus; 3] = [
        VerificationStatus::Pending,
        VerificationStatus::Verified,
        VerificationStatus::Rejected,
    ];

    /// Returns the lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            _ => Err(Error::InvalidVerificationStatus(s.to_string())),
        }
    }
}

/// The signed-in account, as far as gating is concerned.
///
/// Other profile fields (company, contact details) live with the session
/// provider and are not needed to compute access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable account identifier
    pub id: String,
    /// Display name
    pub display_name: String,
    /// Account category
    pub user_type: Role,
    /// Approval state
    pub verification_status: VerificationStatus,
}

impl User {
    /// Creates a user record.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        user_type: Role,
        verification_status: VerificationStatus,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            user_type,
            verification_status,
        }
    }

    /// Returns true if the account has been approved.
    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }
}

/// A read-only snapshot of the session provider's state.
///
/// A `Session` with `is_authenticated == true` but no `user`, or with a user
/// but `is_authenticated == false`, is inconsistent. The gate treats both as
/// unauthenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// A background session check is in flight
    pub is_loading: bool,
    /// The provider considers the visitor signed in
    pub is_authenticated: bool,
    /// The signed-in account, if known
    pub user: Option<User>,
}

impl Session {
    /// A session whose state is still being resolved.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            is_authenticated: false,
            user: None,
        }
    }

    /// A settled session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A settled session for `user`.
    pub fn authenticated(user: User) -> Self {
        Self {
            is_loading: false,
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// Returns the user only when the snapshot is consistently signed in.
    pub fn signed_in_user(&self) -> Option<&User> {
        if self.is_authenticated {
            self.user.as_ref()
        } else {
            None
        }
    }
}

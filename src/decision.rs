use std::fmt;

use crate::session::{Role, VerificationStatus};

/// The outcome of evaluating a session against a requirement.
///
/// Every variant is a normal, displayable state. None of them is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The session is still resolving; show a loading indicator.
    Loading,
    /// Nobody is signed in; send the visitor to the login entry point and
    /// bring them back to `return_path` afterwards.
    RedirectToLogin {
        /// Location to restore after a successful login
        return_path: String,
    },
    /// Signed in, but not allowed here (yet).
    Blocked(BlockReason),
    /// Render the protected content.
    Allow,
}

impl GateDecision {
    /// Returns true if the protected content may be rendered.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }

    /// Returns the coarse outcome, without payload.
    pub fn kind(&self) -> DecisionKind {
        match self {
            GateDecision::Loading => DecisionKind::Loading,
            GateDecision::RedirectToLogin { .. } => DecisionKind::Redirect,
            GateDecision::Blocked(_) => DecisionKind::Blocked,
            GateDecision::Allow => DecisionKind::Allow,
        }
    }

    /// Returns the block reason, if this decision blocks.
    pub fn block_reason(&self) -> Option<&BlockReason> {
        match self {
            GateDecision::Blocked(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for GateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateDecision::Loading => write!(f, "loading"),
            GateDecision::RedirectToLogin { return_path } => {
                write!(f, "redirect-to-login(return={})", return_path)
            }
            GateDecision::Blocked(reason) => write!(f, "blocked({})", reason),
            GateDecision::Allow => write!(f, "allow"),
        }
    }
}

/// Why a signed-in account was kept out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// Verification required; the account is awaiting review.
    Pending,
    /// Verification required; the account was declined.
    Rejected,
    /// The account type does not satisfy the region's role.
    RoleMismatch {
        /// Role the region requires
        required: Role,
        /// The account's own type
        actual: Role,
    },
}

impl BlockReason {
    /// Maps an unverified status to its block reason.
    ///
    /// Returns `None` for `Verified`, which never blocks.
    pub fn from_verification(status: VerificationStatus) -> Option<Self> {
        match status {
            VerificationStatus::Pending => Some(BlockReason::Pending),
            VerificationStatus::Rejected => Some(BlockReason::Rejected),
            VerificationStatus::Verified => None,
        }
    }

    /// Returns the stable reason code: `pending`, `rejected` or `role-mismatch`.
    pub fn code(&self) -> &'static str {
        match self {
            BlockReason::Pending => "pending",
            BlockReason::Rejected => "rejected",
            BlockReason::RoleMismatch { .. } => "role-mismatch",
        }
    }

    /// Returns the verification status behind a verification block.
    pub fn verification_status(&self) -> Option<VerificationStatus> {
        match self {
            BlockReason::Pending => Some(VerificationStatus::Pending),
            BlockReason::Rejected => Some(VerificationStatus::Rejected),
            BlockReason::RoleMismatch { .. } => None,
        }
    }

    /// Returns the account's own role for a role mismatch.
    pub fn actual_role(&self) -> Option<Role> {
        match self {
            BlockReason::RoleMismatch { actual, .. } => Some(*actual),
            _ => None,
        }
    }

    /// Short heading for a blocked-access notice.
    pub fn title(&self) -> &'static str {
        match self {
            BlockReason::Pending => "Account Verification Pending",
            BlockReason::Rejected => "Account Verification Rejected",
            BlockReason::RoleMismatch { .. } => "Access Restricted",
        }
    }

    /// Explanation for a blocked-access notice.
    pub fn message(&self) -> String {
        match self {
            BlockReason::Pending => {
                "Your account is being reviewed. You will get access once it has been verified."
                    .to_string()
            }
            BlockReason::Rejected => {
                "Your account verification was rejected. Update your profile or contact support to try again."
                    .to_string()
            }
            BlockReason::RoleMismatch { required, actual } => format!(
                "This area is for {} accounts. Your account type is {}.",
                required, actual
            ),
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::RoleMismatch { actual, .. } => {
                write!(f, "{} (actual role: {})", self.code(), actual)
            }
            _ => f.write_str(self.code()),
        }
    }
}

/// Coarse decision outcome, used for logging and audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    /// Session still resolving
    Loading,
    /// Sent to login
    Redirect,
    /// Kept out
    Blocked,
    /// Let through
    Allow,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionKind::Loading => write!(f, "loading"),
            DecisionKind::Redirect => write!(f, "redirect"),
            DecisionKind::Blocked => write!(f, "blocked"),
            DecisionKind::Allow => write!(f, "allow"),
        }
    }
}

//! Access gating for protected regions of a client application.
//!
//! This crate decides what a protected route should show, given the current
//! session:
//! - **Decision**: a pure function of session state and the region's requirement
//! - **Explicit session**: the session is passed in, never read from globals
//! - **Boundary adapter**: navigation, logging and audit happen outside the decision
//!
//! # Core Types
//!
//! - [`evaluate`] / [`AccessGate`]: the decision, in a fixed check order
//!   (loading, authentication, verification, role)
//! - [`Session`], [`User`], [`Role`], [`VerificationStatus`]: what the decision reads
//! - [`GateRequirement`]: what a region demands, built from [`RequireRole`] and
//!   [`RequireVerified`] policies
//! - [`GateDecision`]: loading, redirect to login, blocked, or allow
//! - [`SessionScope`]: explicit carrier of a [`SessionProvider`]
//! - [`RouteGuard`]: performs redirects through a [`Navigator`] and yields a [`View`]
//! - [`ProtectedRegions`]: per-path-prefix requirements
//!
//! # Examples
//!
//! ```
//! use access_gate::{
//!     evaluate, BlockReason, GateDecision, GateRequirement, Role, Session, User,
//!     VerificationStatus,
//! };
//!
//! let both = User::new("u-1", "Ada", Role::Both, VerificationStatus::Verified);
//! let decision = evaluate(
//!     &Session::authenticated(both),
//!     &GateRequirement::role(Role::Buyer),
//!     "/cart",
//! );
//! assert_eq!(decision, GateDecision::Allow);
//!
//! let pending = User::new("u-2", "Bo", Role::Buyer, VerificationStatus::Pending);
//! let decision = evaluate(
//!     &Session::authenticated(pending),
//!     &GateRequirement::default(),
//!     "/cart",
//! );
//! assert_eq!(decision, GateDecision::Blocked(BlockReason::Pending));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod config;
mod context;
mod decision;
mod error;
mod gate;
mod guard;
mod policy;
mod provider;
mod session;

pub use config::{GuardConfig, ProtectedRegions, DEFAULT_LOGIN_PATH};
pub use context::SessionScope;
pub use decision::{BlockReason, DecisionKind, GateDecision};
pub use error::Error;
pub use gate::{evaluate, AccessGate};
pub use guard::{BlockedNotice, Navigator, Redirect, Rendered, RouteGuard, View};
pub use policy::{GateRequirement, PolicyReq, RequireRole, RequireVerified};
pub use provider::{SessionProvider, SessionStore};
pub use session::{Role, Session, User, VerificationStatus};

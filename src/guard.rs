//! Boundary adapter between the gate and the host's router.
//!
//! [`evaluate`](crate::evaluate) only computes a decision. [`RouteGuard`] is
//! the thin layer that acts on it:
//! - resolves the session through an explicit [`SessionScope`]
//! - performs the redirect through a [`Navigator`]
//! - turns the decision into exactly one [`View`]
//! - logs and audits the outcome
//!
//! # Integration Flow
//!
//! ```text
//! navigation to /path
//!   ↓
//! RouteGuard::check(scope, "/path", navigator)
//!   ↓
//! SessionScope::session()  --no provider-->  Err(MissingSessionProvider)
//!   ↓
//! AccessGate::evaluate(session, "/path")
//!   ↓
//! View::{Loading | Redirected | Blocked | Content}
//! ```

use std::fmt;
use std::rc::Rc;

use crate::audit::{self, AuditEvent, AuditTrail};
use crate::config::GuardConfig;
use crate::context::SessionScope;
use crate::decision::{BlockReason, GateDecision};
use crate::error::Error;
use crate::gate::AccessGate;
use crate::session::{Role, VerificationStatus};

/// A navigation the guard asks the host router to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Target location (the login entry point)
    pub to: String,
    /// Location to return to after login
    pub from: String,
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
}

impl Redirect {
    /// Returns the target as a single URL carrying the return path in a
    /// `redirect` query parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_gate::Redirect;
    ///
    /// let redirect = Redirect {
    ///     to: "/login".to_string(),
    ///     from: "/orders/42".to_string(),
    ///     replace: true,
    /// };
    /// assert_eq!(redirect.location(), "/login?redirect=%2Forders%2F42");
    /// ```
    pub fn location(&self) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(self.from.as_bytes()).collect();
        let (base, fragment) = match self.to.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (self.to.as_str(), None),
        };
        let separator = if base.contains('?') { '&' } else { '?' };
        let mut location = format!("{}{}redirect={}", base, separator, encoded);
        if let Some(fragment) = fragment {
            location.push('#');
            location.push_str(fragment);
        }
        location
    }
}

/// The host router, as seen by the guard.
pub trait Navigator {
    /// Performs `redirect`.
    fn navigate(&mut self, redirect: &Redirect);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate(&mut self, redirect: &Redirect) {
        (**self).navigate(redirect)
    }
}

/// Records redirects instead of performing them.
impl Navigator for Vec<Redirect> {
    fn navigate(&mut self, redirect: &Redirect) {
        self.push(redirect.clone());
    }
}

/// What a blocked visitor should be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedNotice {
    /// Why access was refused
    pub reason: BlockReason,
    /// Heading
    pub title: &'static str,
    /// Explanation
    pub message: String,
    /// Account status, for verification blocks
    pub verification_status: Option<VerificationStatus>,
    /// Account type, for role mismatches
    pub actual_role: Option<Role>,
}

impl From<BlockReason> for BlockedNotice {
    fn from(reason: BlockReason) -> Self {
        Self {
            reason,
            title: reason.title(),
            message: reason.message(),
            verification_status: reason.verification_status(),
            actual_role: reason.actual_role(),
        }
    }
}

/// The single thing the host renders for a protected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Loading indicator
    Loading,
    /// The guard already asked the navigator to perform this redirect
    Redirected(Redirect),
    /// Blocked-access explanation
    Blocked(BlockedNotice),
    /// The protected content, unmodified
    Content,
}

/// Either the caller's content or the placeholder shown instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    /// Access allowed; the content as produced by the caller
    Content(T),
    /// Access not (yet) allowed
    Placeholder(View),
}

/// Guard for one protected region.
///
/// # Examples
///
/// ```
/// use access_gate::{AccessGate, Redirect, RouteGuard, Session, SessionScope, View};
///
/// let guard = RouteGuard::new(AccessGate::new());
/// let scope = SessionScope::new(Session::anonymous());
/// let mut navigator: Vec<Redirect> = Vec::new();
///
/// let view = guard.check(&scope, "/orders", &mut navigator).unwrap();
///
/// assert!(matches!(view, View::Redirected(_)));
/// assert_eq!(navigator[0].from, "/orders");
/// ```
#[derive(Clone)]
pub struct RouteGuard {
    gate: AccessGate,
    config: GuardConfig,
    trail: Option<Rc<AuditTrail>>,
}

impl RouteGuard {
    /// Creates a guard with the default configuration and no audit trail.
    pub fn new(gate: AccessGate) -> Self {
        Self {
            gate,
            config: GuardConfig::default(),
            trail: None,
        }
    }

    /// Sets the guard configuration.
    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    /// Records every decision into `trail`.
    pub fn with_audit_trail(mut self, trail: Rc<AuditTrail>) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Returns the gate this guard enforces.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Returns the guard configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Checks access to `current_path` and returns what to render.
    ///
    /// On a redirect decision the navigator is invoked exactly once before
    /// returning. On every other decision it is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSessionProvider`] if `scope` has no provider.
    /// Nothing is evaluated, navigated or audited in that case.
    pub fn check<N>(
        &self,
        scope: &SessionScope,
        current_path: &str,
        navigator: &mut N,
    ) -> Result<View, Error>
    where
        N: Navigator + ?Sized,
    {
        let session = scope.session()?;
        let decision = self.gate.evaluate(&session, current_path);

        let user_id = match decision {
            GateDecision::Loading => None,
            _ => session.signed_in_user().map(|user| user.id.as_str()),
        };
        log_decision(&decision, current_path, user_id);
        audit::emit(
            &AuditEvent::from_decision(current_path, user_id, &decision),
            self.trail.as_deref(),
        );

        let view = match decision {
            GateDecision::Loading => View::Loading,
            GateDecision::RedirectToLogin { return_path } => {
                let redirect = Redirect {
                    to: self.config.login_path.clone(),
                    from: return_path,
                    replace: true,
                };
                navigator.navigate(&redirect);
                View::Redirected(redirect)
            }
            GateDecision::Blocked(reason) => View::Blocked(reason.into()),
            GateDecision::Allow => View::Content,
        };

        Ok(view)
    }

    /// Checks access and, only when allowed, builds the protected content.
    ///
    /// # Errors
    ///
    /// Same as [`check`](Self::check).
    pub fn render<N, T, F>(
        &self,
        scope: &SessionScope,
        current_path: &str,
        navigator: &mut N,
        content: F,
    ) -> Result<Rendered<T>, Error>
    where
        N: Navigator + ?Sized,
        F: FnOnce() -> T,
    {
        match self.check(scope, current_path, navigator)? {
            View::Content => Ok(Rendered::Content(content())),
            placeholder => Ok(Rendered::Placeholder(placeholder)),
        }
    }
}

impl fmt::Debug for RouteGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGuard")
            .field("gate", &self.gate)
            .field("config", &self.config)
            .field("audited", &self.trail.is_some())
            .finish()
    }
}

fn log_decision(decision: &GateDecision, path: &str, user_id: Option<&str>) {
    match decision {
        GateDecision::Loading => {
            tracing::debug!(target: "access_gate", path, "session loading, deferring access decision");
        }
        GateDecision::RedirectToLogin { .. } => {
            tracing::info!(target: "access_gate", path, "not authenticated, redirecting to login");
        }
        GateDecision::Blocked(reason) => {
            tracing::warn!(
                target: "access_gate",
                path,
                user_id = ?user_id,
                reason = reason.code(),
                "access blocked"
            );
        }
        GateDecision::Allow => {
            tracing::info!(target: "access_gate", path, user_id = ?user_id, "access allowed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{GateRequirement, RequireRole};
    use crate::session::{Session, User};

    fn scope_for(user: User) -> SessionScope {
        SessionScope::new(Session::authenticated(user))
    }

    #[test]
    fn location_encodes_return_path() {
        let redirect = Redirect {
            to: "/login".to_string(),
            from: "/search?q=steel bolts".to_string(),
            replace: true,
        };
        assert_eq!(
            redirect.location(),
            "/login?redirect=%2Fsearch%3Fq%3Dsteel+bolts"
        );
    }

    #[test]
    fn location_appends_to_existing_query() {
        let redirect = Redirect {
            to: "/login?source=gate".to_string(),
            from: "/a".to_string(),
            replace: true,
        };
        assert_eq!(redirect.location(), "/login?source=gate&redirect=%2Fa");
    }

    #[test]
    fn location_keeps_fragment_last() {
        let redirect = Redirect {
            to: "/login#top".to_string(),
            from: "/a".to_string(),
            replace: true,
        };
        assert_eq!(redirect.location(), "/login?redirect=%2Fa#top");

        let redirect = Redirect {
            to: "/login?source=gate#form".to_string(),
            from: "/a#b".to_string(),
            replace: true,
        };
        assert_eq!(
            redirect.location(),
            "/login?source=gate&redirect=%2Fa%23b#form"
        );
    }

    #[test]
    fn loading_does_not_navigate() {
        let guard = RouteGuard::new(AccessGate::new());
        let mut navigator: Vec<Redirect> = Vec::new();

        let view = guard
            .check(&SessionScope::new(Session::loading()), "/p", &mut navigator)
            .unwrap();

        assert_eq!(view, View::Loading);
        assert!(navigator.is_empty());
    }

    #[test]
    fn redirect_uses_configured_login_path() {
        let guard = RouteGuard::new(AccessGate::new())
            .with_config(GuardConfig::new().with_login_path("/signin"));
        let mut navigator: Vec<Redirect> = Vec::new();

        let view = guard
            .check(&SessionScope::new(Session::anonymous()), "/orders", &mut navigator)
            .unwrap();

        let expected = Redirect {
            to: "/signin".to_string(),
            from: "/orders".to_string(),
            replace: true,
        };
        assert_eq!(view, View::Redirected(expected.clone()));
        assert_eq!(navigator, vec![expected]);
    }

    #[test]
    fn role_mismatch_notice_surfaces_actual_role() {
        let guard = RouteGuard::new(AccessGate::new().require(RequireRole(Role::Buyer)));
        let scope = scope_for(User::new(
            "u-3",
            "Sam",
            Role::Supplier,
            VerificationStatus::Verified,
        ));

        let view = guard.check(&scope, "/cart", &mut Vec::<Redirect>::new()).unwrap();

        match view {
            View::Blocked(notice) => {
                assert_eq!(notice.actual_role, Some(Role::Supplier));
                assert_eq!(notice.verification_status, None);
                assert_eq!(notice.title, "Access Restricted");
            }
            other => panic!("expected blocked view, got {:?}", other),
        }
    }

    #[test]
    fn verification_notice_surfaces_status() {
        let guard = RouteGuard::new(AccessGate::new());
        let scope = scope_for(User::new(
            "u-4",
            "Lin",
            Role::Buyer,
            VerificationStatus::Rejected,
        ));

        let view = guard.check(&scope, "/cart", &mut Vec::<Redirect>::new()).unwrap();

        let expected: BlockedNotice = BlockReason::Rejected.into();
        assert_eq!(view, View::Blocked(expected));
    }

    #[test]
    fn render_builds_content_only_when_allowed() {
        let guard = RouteGuard::new(AccessGate::with_requirement(GateRequirement::default()));
        let mut built = 0;

        let denied = guard
            .render(
                &SessionScope::new(Session::anonymous()),
                "/p",
                &mut Vec::<Redirect>::new(),
                || {
                    built += 1;
                    "secret page"
                },
            )
            .unwrap();
        assert!(matches!(denied, Rendered::Placeholder(View::Redirected(_))));
        assert_eq!(built, 0);

        let allowed = guard
            .render(
                &scope_for(User::new("u-5", "Kim", Role::Both, VerificationStatus::Verified)),
                "/p",
                &mut Vec::<Redirect>::new(),
                || "secret page",
            )
            .unwrap();
        assert_eq!(allowed, Rendered::Content("secret page"));
    }

    #[test]
    fn missing_provider_is_an_error() {
        let trail = Rc::new(AuditTrail::new());
        let guard = RouteGuard::new(AccessGate::new()).with_audit_trail(Rc::clone(&trail));
        let mut navigator: Vec<Redirect> = Vec::new();

        let result = guard.check(&SessionScope::detached(), "/p", &mut navigator);

        assert_eq!(result, Err(Error::MissingSessionProvider));
        assert!(navigator.is_empty());
        assert!(trail.is_empty());
    }

    #[test]
    fn audit_trail_records_each_check() {
        let trail = Rc::new(AuditTrail::new());
        let guard = RouteGuard::new(AccessGate::new()).with_audit_trail(Rc::clone(&trail));

        guard
            .check(&SessionScope::new(Session::loading()), "/a", &mut Vec::<Redirect>::new())
            .unwrap();
        guard
            .check(
                &scope_for(User::new("u-6", "Jo", Role::Buyer, VerificationStatus::Pending)),
                "/b",
                &mut Vec::<Redirect>::new(),
            )
            .unwrap();

        let events = trail.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].user_id(), None);
        assert_eq!(events[1].user_id(), Some("u-6"));
        assert_eq!(events[1].reason(), Some("pending"));
    }

    #[test]
    fn debug_hides_trail_contents() {
        let guard = RouteGuard::new(AccessGate::new());
        assert!(format!("{:?}", guard).contains("audited: false"));
    }
}
